//! Working with Value trees directly.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_brass::{brass, decode, encode_with_options, to_value, EncodeOptions, Primitive, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = brass!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true,
        "key": (vec![0xde_u8, 0xad, 0xbe, 0xef])
    });

    println!("Config as brass:\n{}\n", config);

    if let Value::Map(map) = &config {
        if let Some(host) = map.get_str("host").and_then(Value::as_str) {
            println!("Accessing field 'host': {}", host);
        }

        if let Some(port) = map.get_str("port").and_then(Value::as_i64) {
            println!("Accessing field 'port': {}", port);
        }

        if let Some(features) = map.get_str("features").and_then(Value::as_list) {
            println!("Accessing field 'features': {} items", features.len());
        }

        if let Some(key) = map.get_str("key").and_then(Value::as_octets) {
            println!("Accessing field 'key': {} bytes\n", key.len());
        }
    }

    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value:\n{}\n", user_value);

    let sorted = encode_with_options(&user_value, EncodeOptions::new().with_sorted_keys(true));
    println!("Sorted keys:\n{}\n", String::from_utf8_lossy(&sorted));

    println!("Kind checks:");
    println!("  kind:       {}", user_value.kind());
    println!("  is_map:     {}", user_value.is_map());
    println!("  is_list:    {}", user_value.is_list());
    println!("  is_string:  {}", user_value.is_string());

    // Map keys may be any primitive, not only strings.
    let doc = decode(b"({($1 \"one\") (nil \"nothing\") (#1$ff \"byte\")})")?;
    if let Some(map) = doc.as_list().and_then(|items| items.first()).and_then(Value::as_map) {
        for (key, value) in map {
            println!("  {} ({}) => {}", key, key.kind(), value);
        }
        println!("  lookup $1: {:?}", map.get(&Primitive::Integer(1)).and_then(Value::as_str));
    }

    Ok(())
}
