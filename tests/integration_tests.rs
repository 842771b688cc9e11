use serde::{Deserialize, Serialize};
use serde_brass::{
    from_reader, from_slice, from_str, from_value, to_string, to_string_with_options, to_value,
    to_vec, to_writer, Category, EncodeOptions, Error, Kind, Primitive, Value,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct LineItem {
    sku: String,
    quantity: u32,
    unit_cents: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u64,
    customer: User,
    items: Vec<LineItem>,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Shape {
    Point,
    Circle(i64),
    Segment(i64, i64),
    Rect { w: i64, h: i64 },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Meters(i64);

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Marker;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Rgb(u8, u8, u8);

fn sample_user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

#[test]
fn test_simple_struct() {
    let user = sample_user();

    let brass = to_string(&user).unwrap();
    assert_eq!(
        brass,
        "({(\"id\" $7b) (\"name\" \"Alice\") (\"active\" true) (\"tags\" (\"admin\" \"developer\"))})"
    );

    let user_back: User = from_str(&brass).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: sample_user(),
        items: vec![
            LineItem {
                sku: "WIDGET-001".to_string(),
                quantity: 2,
                unit_cents: 2999,
            },
            LineItem {
                sku: "GADGET-002".to_string(),
                quantity: 1,
                unit_cents: -500,
            },
        ],
        note: None,
    };

    let brass = to_vec(&order).unwrap();
    let order_back: Order = from_slice(&brass).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_option_fields() {
    let order = Order {
        order_id: 1,
        customer: sample_user(),
        items: vec![],
        note: Some("leave at door".to_string()),
    };
    let value = to_value(&order).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get_str("items"), Some(&Value::List(vec![])));
    assert_eq!(map.get_str("note").and_then(|v| v.as_str()), Some("leave at door"));

    let back: Order = from_value(value).unwrap();
    assert_eq!(back, order);
}

#[test]
fn test_enum_variants() {
    let cases = vec![
        (Shape::Point, "(\"Point\")"),
        (Shape::Circle(3), "({(\"Circle\" $3)})"),
        (Shape::Segment(1, -1), "({(\"Segment\" ($1 -$1))})"),
        (Shape::Rect { w: 16, h: 9 }, "({(\"Rect\" {(\"w\" $10) (\"h\" $9)})})"),
    ];

    for (shape, expected) in cases {
        let brass = to_string(&shape).unwrap();
        assert_eq!(brass, expected);
        let back: Shape = from_str(&brass).unwrap();
        assert_eq!(back, shape);
    }
}

#[test]
fn test_enum_shape_errors() {
    assert!(from_str::<Shape>("($1)").is_err());
    assert!(from_str::<Shape>("({})").is_err());
    assert!(from_str::<Shape>("({(\"Circle\" $1) (\"Point\" nil)})").is_err());
    assert!(from_str::<Shape>("(\"Hexagon\")").is_err());
}

#[test]
fn test_struct_shapes() {
    assert_eq!(to_string(&Meters(5)).unwrap(), "($5)");
    assert_eq!(from_str::<Meters>("($5)").unwrap(), Meters(5));

    assert_eq!(to_string(&Marker).unwrap(), "(nil)");
    assert_eq!(from_str::<Marker>("(nil)").unwrap(), Marker);

    assert_eq!(to_string(&Rgb(255, 0, 16)).unwrap(), "(($ff $0 $10))");
    assert_eq!(from_str::<Rgb>("(($ff $0 $10))").unwrap(), Rgb(255, 0, 16));
}

#[test]
fn test_maps_with_non_string_keys() {
    let mut map = BTreeMap::new();
    map.insert(-1i64, "minus".to_string());
    map.insert(2i64, "two".to_string());

    let brass = to_string(&map).unwrap();
    assert_eq!(brass, "({(-$1 \"minus\") ($2 \"two\")})");

    let back: BTreeMap<i64, String> = from_str(&brass).unwrap();
    assert_eq!(back, map);

    let flags: HashMap<bool, u8> = from_str("({(true $1) (false $0)})").unwrap();
    assert_eq!(flags.get(&true), Some(&1));
    assert_eq!(flags.get(&false), Some(&0));
}

#[test]
fn test_composite_map_key_rejected() {
    let mut map = HashMap::new();
    map.insert(vec![1i64], 1i64);
    let err = to_string(&map).unwrap_err();
    assert_eq!(
        err,
        Error::TypeMismatch {
            expected: "primitive",
            found: Kind::List
        }
    );
}

#[test]
fn test_chars_and_strings() {
    assert_eq!(to_string(&'é').unwrap(), "(\"\\xc3\\xa9\")");
    assert_eq!(from_str::<char>("(\"\\xc3\\xa9\")").unwrap(), 'é');
    assert_eq!(
        to_string("tab\there \"quoted\"").unwrap(),
        "(\"tab\\there \\\"quoted\\\"\")"
    );
}

#[test]
fn test_octets_into_byte_vectors() {
    let bytes: Vec<u8> = from_str("(#3$010203)").unwrap();
    assert_eq!(bytes, vec![1, 2, 3]);

    let array: [u8; 2] = from_str("(#2$beef)").unwrap();
    assert_eq!(array, [0xbe, 0xef]);

    // a plain Vec<u8> serializes element by element
    assert_eq!(to_string(&vec![1u8, 2]).unwrap(), "(($1 $2))");
}

#[test]
fn test_integer_ranges() {
    assert_eq!(to_string(&i64::MIN).unwrap(), "(-$8000000000000000)");
    assert_eq!(to_string(&(i64::MAX as u64)).unwrap(), "($7fffffffffffffff)");
    assert!(to_string(&u64::MAX).is_err());
    assert!(to_string(&(i128::from(i64::MAX) + 1)).is_err());

    assert_eq!(from_str::<u8>("($ff)").unwrap(), 255);
    assert!(from_str::<u8>("($100)").is_err());
    assert!(from_str::<u32>("(-$1)").is_err());
}

#[test]
fn test_floats_unsupported() {
    let err = to_string(&1.5f64).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
    assert_eq!(err.classify(), Category::Data);

    #[derive(Serialize)]
    struct Reading {
        celsius: f32,
    }
    assert!(to_value(&Reading { celsius: 21.0 }).is_err());
}

#[test]
fn test_non_utf8_string_into_bytes() {
    #[derive(Deserialize)]
    struct Raw {
        data: Vec<u8>,
    }
    // `Vec<u8>` asks for a sequence; strings only convert through byte visitors
    assert!(from_str::<Raw>("({(\"data\" \"\\xff\")})").is_err());

    let value: Value = from_str("(\"\\xff\")").unwrap();
    assert_eq!(value, Value::string(vec![0xff]));
}

#[test]
fn test_non_utf8_string_keeps_its_kind() {
    let item = Value::string(vec![0xff, b'a']);
    let bytes = to_vec(&item).unwrap();
    assert_eq!(bytes, b"(\"\\xffa\")");
    assert_eq!(from_slice::<Value>(&bytes).unwrap(), item);
    assert_eq!(to_value(&item).unwrap(), item);

    let list = Value::list(vec![item.clone(), Value::octets(vec![0xff])]);
    let bytes = to_vec(&list).unwrap();
    assert_eq!(bytes, b"((\"\\xffa\" #1$ff))");
    assert_eq!(from_slice::<Value>(&bytes).unwrap(), list);

    let key = Primitive::String(vec![0xff]);
    let map = Value::map(vec![(key.clone(), Value::Integer(1))]);
    let bytes = to_vec(&map).unwrap();
    assert_eq!(bytes, b"({(\"\\xff\" $1)})");
    let decoded = from_slice::<Value>(&bytes).unwrap();
    assert_eq!(decoded, map);
    assert_eq!(decoded.as_map().unwrap().get(&key), Some(&Value::Integer(1)));

    let through_value: Value = from_value(map.clone()).unwrap();
    assert_eq!(through_value, map);
}

#[test]
fn test_value_passthrough() {
    let text = "({(\"k\" (nil $1 #1$00))})";
    let value: Value = from_str(text).unwrap();
    assert_eq!(to_string(&value).unwrap(), text);
}

#[test]
fn test_value_with_serde_json() {
    let value = Value::map(vec![
        (Primitive::from("name"), Value::from("Alice")),
        (Primitive::from("age"), Value::from(30)),
        (
            Primitive::from("roles"),
            Value::list(vec![Value::from("admin"), Value::Nil, Value::Bool(true)]),
        ),
    ]);

    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"name":"Alice","age":30,"roles":["admin",null,true]}"#);

    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_json_float_rejected() {
    assert!(serde_json::from_str::<Value>("[1.5]").is_err());
    assert!(serde_json::from_str::<Value>("18446744073709551615").is_err());
}

#[test]
fn test_writer_and_reader() {
    let user = sample_user();
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &user).unwrap();

    let back: User = from_reader(std::io::Cursor::new(buffer)).unwrap();
    assert_eq!(back, user);
}

#[test]
fn test_trailing_and_framing_errors() {
    let err = from_str::<u32>("($1)\n").unwrap_err();
    assert_eq!(err, Error::TrailingBytes { offset: 4 });

    assert!(from_str::<u32>("$1").unwrap_err().is_syntax());
    assert!(from_str::<Vec<u32>>("()").is_err());
    assert!(from_str::<u32>("($1 $2)").is_err());
}

#[test]
fn test_sorted_keys_option() {
    let mut map = HashMap::new();
    map.insert("zeta", 1);
    map.insert("alpha", 2);
    map.insert("mid", 3);

    let brass = to_string_with_options(&map, EncodeOptions::new().with_sorted_keys(true)).unwrap();
    assert_eq!(brass, "({(\"alpha\" $2) (\"mid\" $3) (\"zeta\" $1)})");
}

#[test]
fn test_error_display_has_offset() {
    let err = from_str::<User>("({(\"id\" $7G)})").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("offset 10"), "{}", message);
}
