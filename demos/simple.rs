//! Basic brass serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_brass::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    let brass = to_string(&users)?;
    println!("brass output:\n{}\n", brass);

    let users_back: Vec<User> = from_str(&brass)?;
    assert_eq!(users, users_back);
    println!("Round-trip successful");

    // Anything off the canonical form is rejected with a byte offset.
    let sloppy = brass.replacen(' ', "  ", 1);
    if let Err(e) = from_str::<Vec<User>>(&sloppy) {
        println!("Rejected non-canonical input: {}", e);
    }

    Ok(())
}
