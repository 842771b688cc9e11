//! Byte-exact conformance tests for the brass grammar.

use serde_brass::{
    decode, decode_with_options, encode, Category, DecodeOptions, Decoder, Error, Primitive,
    Value,
};

fn list(items: Vec<Value>) -> Value {
    Value::List(items)
}

fn assert_round_trip(input: &[u8]) {
    let value = decode(input).unwrap();
    assert_eq!(
        encode(&value),
        input,
        "re-encoding {:?}",
        String::from_utf8_lossy(input)
    );
}

#[test]
fn test_empty_list() {
    assert_eq!(decode(b"()").unwrap(), list(vec![]));
}

#[test]
fn test_keywords() {
    assert_eq!(
        decode(b"(nil true false)").unwrap(),
        list(vec![Value::Nil, Value::Bool(true), Value::Bool(false)])
    );
}

#[test]
fn test_integers() {
    assert_eq!(
        decode(b"($3ff -$3ff)").unwrap(),
        list(vec![Value::Integer(1023), Value::Integer(-1023)])
    );
    assert_eq!(decode(b"($0)").unwrap(), list(vec![Value::Integer(0)]));
}

#[test]
fn test_octets() {
    assert_eq!(
        decode(b"(#3$616263)").unwrap(),
        list(vec![Value::octets(b"abc".to_vec())])
    );
    assert_eq!(decode(b"(#0$)").unwrap(), list(vec![Value::octets(vec![])]));
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        decode(b"(\"abc\\r\\n\\t\\x00\")").unwrap(),
        list(vec![Value::string(b"abc\r\n\t\x00".to_vec())])
    );
    assert_eq!(
        decode(b"(\"q\\\"b\\\\\")").unwrap(),
        list(vec![Value::string(b"q\"b\\".to_vec())])
    );
}

#[test]
fn test_raw_newline_in_string() {
    let err = decode(b"(\"ab\ncd\")").unwrap_err();
    assert_eq!(err.classify(), Category::Syntax);
    assert_eq!(err.offset(), Some(4));
    assert!(err.to_string().contains("raw newline"), "{}", err);
}

#[test]
fn test_map_of_two_entries() {
    let value = decode(b"({(\"a\" $1) (\"b\" $2)})").unwrap();
    let items = value.as_list().unwrap();
    assert_eq!(items.len(), 1);

    let map = items[0].as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get_str("a"), Some(&Value::Integer(1)));
    assert_eq!(map.get_str("b"), Some(&Value::Integer(2)));

    // decode order is kept, so canonical input re-encodes byte for byte
    assert_eq!(encode(&value), b"({(\"a\" $1) (\"b\" $2)})");
}

#[test]
fn test_map_equality_ignores_entry_order() {
    let ab = decode(b"({(\"a\" $1) (\"b\" $2)})").unwrap();
    let ba = decode(b"({(\"b\" $2) (\"a\" $1)})").unwrap();
    assert_eq!(ab, ba);
}

#[test]
fn test_truncated_input() {
    let err = decode(b"(").unwrap_err();
    assert_eq!(err, Error::unexpected_eof(1, "value or ')'"));
}

#[test]
fn test_unexpected_close() {
    let err = decode(b")").unwrap_err();
    assert_eq!(err, Error::syntax(0, "'('", b')'));
}

#[test]
fn test_octets_length_mismatch() {
    let err = decode(b"(#2$ab)").unwrap_err();
    assert_eq!(err, Error::syntax(6, "hex digit", b')'));
}

#[test]
fn test_uppercase_hex() {
    let err = decode(b"($GG)").unwrap_err();
    assert_eq!(err, Error::syntax(2, "hex digit", b'G'));
    assert!(decode(b"($AB)").is_err());
    assert!(decode(b"(#1$AB)").is_err());
    assert!(decode(b"(\"\\xAB\")").is_err());
}

#[test]
fn test_whitespace_is_not_free() {
    for input in [
        &b"( )"[..],
        b" ()",
        b"(nil  nil)",
        b"(nil\nnil)",
        b"({(\"a\"\t$1)})",
        b"({ })",
        b"({(\"a\" $1)  (\"b\" $2)})",
    ] {
        assert!(
            decode(input).is_err(),
            "accepted {:?}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_missing_separator() {
    assert!(decode(b"(()())").unwrap_err().is_syntax());
    assert!(decode(b"(\"a\"\"b\")").unwrap_err().is_syntax());
    assert!(decode(b"(#1$00#1$00)").unwrap_err().is_syntax());
}

#[test]
fn test_composite_map_key() {
    let err = decode(b"({((nil) $1)})").unwrap_err();
    assert_eq!(err, Error::NotPrimitive { offset: 3 });
    assert_eq!(err.classify(), Category::Context);
}

#[test]
fn test_map_key_kinds() {
    let value = decode(b"({(nil $0) (false $1) (-$2 $2) (\"s\" $3) (#1$73 $4)})").unwrap();
    let map = value.as_list().unwrap()[0].as_map().unwrap();
    assert_eq!(map.get(&Primitive::Nil), Some(&Value::Integer(0)));
    assert_eq!(map.get(&Primitive::Bool(false)), Some(&Value::Integer(1)));
    assert_eq!(map.get(&Primitive::Integer(-2)), Some(&Value::Integer(2)));
    // the string "s" and the octets 0x73 are distinct keys
    assert_eq!(map.get_str("s"), Some(&Value::Integer(3)));
    assert_eq!(map.get(&Primitive::Octets(vec![0x73])), Some(&Value::Integer(4)));
}

#[test]
fn test_canonical_round_trips() {
    for input in [
        &b"()"[..],
        b"(nil true false)",
        b"($3ff -$3ff $0 -$8000000000000000 $7fffffffffffffff)",
        b"(#3$616263 #0$)",
        b"(\"abc\\r\\n\\t\\x00\\xff\\\\\\\"\")",
        b"(() (()) {} {(nil ())})",
        b"({(\"a\" $1) (\"b\" {($2 (\"deep\"))})})",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn test_non_minimal_integer_normalizes() {
    let value = decode(b"($00ff -$0)").unwrap();
    assert_eq!(encode(&value), b"($ff $0)");
}

#[test]
fn test_overflow_boundaries() {
    assert_eq!(
        decode(b"($8000000000000000)").unwrap_err(),
        Error::Overflow {
            offset: 2,
            what: "integer"
        }
    );
    assert!(decode(b"(#11111111111111111$)").unwrap_err().is_overflow());
}

#[test]
fn test_depth_limit_default() {
    let deep_ok = format!("{}{}", "(".repeat(128), ")".repeat(128));
    assert!(decode(deep_ok.as_bytes()).is_ok());

    let too_deep = format!("{}{}", "(".repeat(129), ")".repeat(129));
    let err = decode(too_deep.as_bytes()).unwrap_err();
    assert_eq!(
        err,
        Error::DepthLimitExceeded {
            offset: 128,
            limit: 128
        }
    );
}

#[test]
fn test_depth_limit_disabled() {
    let deep = format!("{}{}", "(".repeat(500), ")".repeat(500));
    let options = DecodeOptions::new().with_max_depth(None);
    assert!(decode_with_options(deep.as_bytes(), options).is_ok());
}

#[test]
fn test_decoder_stops_after_document() {
    let mut decoder = Decoder::from_slice(b"($1)($2)");
    assert_eq!(decoder.decode().unwrap(), list(vec![Value::Integer(1)]));
    assert_eq!(decoder.decode().unwrap(), list(vec![Value::Integer(2)]));
    assert!(decoder.end().is_ok());
}

#[test]
fn test_io_error_surfaces() {
    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"))
        }
    }

    let err = Decoder::from_reader(Broken).decode().unwrap_err();
    assert_eq!(err.classify(), Category::Io);
    assert!(err.to_string().contains("disk on fire"));
}
