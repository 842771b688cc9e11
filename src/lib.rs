//! # serde_brass
//!
//! A codec for brass, a compact canonical s-expression encoding, with a Serde layer
//! on top.
//!
//! ## What is brass?
//!
//! Brass is a small recursive grammar of atoms (`nil`, booleans, hex integers,
//! quoted strings, hex octet strings) composed into lists and maps. Every value has
//! exactly one encoding, so two equal trees always encode to the same bytes and a
//! decoder can reject anything that is not in canonical form.
//!
//! ```text
//! ({("name" "Alice") ("id" $7b) ("key" #4$deadbeef)} nil true -$1)
//! ```
//!
//! ## Key Features
//!
//! - **Canonical**: one space between elements, lowercase hex, minimal integers;
//!   the decoder rejects every other spelling
//! - **Byte strings**: strings and octets carry arbitrary bytes, not just UTF-8
//! - **Offsets in errors**: every decode error names the byte offset it refers to
//! - **Bounded**: nesting depth is limited and hostile length prefixes cannot force
//!   large allocations
//! - **Serde Compatible**: any `#[derive(Serialize, Deserialize)]` type maps to a
//!   brass document
//!
//! ## Quick Start
//!
//! ### Decoding and encoding value trees
//!
//! ```rust
//! use serde_brass::{decode, encode, Value};
//!
//! let doc = decode(b"($1 \"two\" (nil))").unwrap();
//! let items = doc.as_list().unwrap();
//! assert_eq!(items[0].as_i64(), Some(1));
//! assert_eq!(items[1].as_str(), Some("two"));
//!
//! assert_eq!(encode(&doc), b"($1 \"two\" (nil))");
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_brass::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "({(\"id\" $7b) (\"name\" \"Alice\") (\"active\" true)})");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! A brass document is always a list, so the serde entry points wrap the value in a
//! one-element list and expect exactly that shape when reading.
//!
//! ### Dynamic Values with the brass! Macro
//!
//! ```rust
//! use serde_brass::{brass, Value};
//!
//! let data = brass!({
//!     "name": "Alice",
//!     "tags": ["rust", nil, 3]
//! });
//!
//! if let Value::Map(map) = &data {
//!     assert_eq!(map.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! assert_eq!(
//!     data.to_string(),
//!     "{(\"name\" \"Alice\") (\"tags\" (\"rust\" nil $3))}"
//! );
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics on any input: malformed bytes produce an [`Error`]
//! - Recursion is bounded by [`DecodeOptions::max_depth`]
//!
//! ## Format Reference
//!
//! See the [`format`] module for the grammar.

pub mod de;
pub mod error;
pub mod format;
pub mod lex;
pub mod macros;
pub mod map;
pub mod options;
pub mod primitive;
pub mod read;
pub mod ser;
pub mod value;

pub use de::Decoder;
pub use error::{Category, Error, Result};
pub use map::BrassMap;
pub use options::{DecodeOptions, EncodeOptions, DEFAULT_MAX_DEPTH};
pub use primitive::Primitive;
pub use read::{IoRead, Read, SliceRead};
pub use ser::{Encoder, ValueSerializer};
pub use value::{Kind, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decode one top-level list from a byte slice.
///
/// Bytes after the closing `)` are ignored; use a [`Decoder`] and
/// [`Decoder::end`] to reject them.
///
/// # Examples
///
/// ```rust
/// use serde_brass::{decode, Value};
///
/// let value = decode(b"(#3$616263 -$ff)").unwrap();
/// assert_eq!(
///     value,
///     Value::list(vec![Value::octets(b"abc".to_vec()), Value::Integer(-255)])
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a canonical brass list.
pub fn decode(input: &[u8]) -> Result<Value> {
    Decoder::from_slice(input).decode()
}

/// Decode one top-level list from a byte slice with custom options.
///
/// # Errors
///
/// Returns an error if the input is not a canonical brass list or exceeds the
/// configured limits.
pub fn decode_with_options(input: &[u8], options: DecodeOptions) -> Result<Value> {
    Decoder::from_slice(input).with_options(options).decode()
}

/// Decode one top-level list from an I/O stream.
///
/// Reading stops right after the closing `)`.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not a canonical brass list.
pub fn decode_reader<R: io::Read>(reader: R) -> Result<Value> {
    Decoder::from_reader(reader).decode()
}

/// Encode a value to its canonical bytes.
///
/// # Examples
///
/// ```rust
/// use serde_brass::{encode, Value};
///
/// let value = Value::list(vec![Value::Nil, Value::Bool(false), Value::Integer(10)]);
/// assert_eq!(encode(&value), b"(nil false $a)");
/// ```
#[must_use]
pub fn encode(value: &Value) -> Vec<u8> {
    encode_with_options(value, EncodeOptions::default())
}

/// Encode a value with custom options.
#[must_use]
pub fn encode_with_options(value: &Value, options: EncodeOptions) -> Vec<u8> {
    let mut encoder = Encoder::new(options);
    encoder.encode(value);
    encoder.into_inner()
}

/// Append the canonical bytes of `value` to `out`.
///
/// # Examples
///
/// ```rust
/// use serde_brass::{encode_into, Value};
///
/// let mut out = b"prefix:".to_vec();
/// encode_into(&Value::from("x"), &mut out);
/// assert_eq!(out, b"prefix:\"x\"");
/// ```
pub fn encode_into(value: &Value, out: &mut Vec<u8>) {
    let mut encoder = Encoder::with_buffer(std::mem::take(out), EncodeOptions::default());
    encoder.encode(value);
    *out = encoder.into_inner();
}

/// Encode a value to a `String`. Brass output is always ASCII.
#[must_use]
pub fn encode_to_string(value: &Value) -> String {
    ascii_to_string(encode(value))
}

fn ascii_to_string(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_brass::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: -2 }).unwrap();
/// assert!(value.is_map());
/// ```
///
/// # Errors
///
/// Returns an error if `T` holds something brass cannot represent, such as a
/// float or an integer outside the `i64` range.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Convert a [`Value`] into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use serde_brass::{from_value, Value};
///
/// let list = Value::list(vec![Value::from(true), Value::from("x")]);
/// let pair: (bool, String) = from_value(list).unwrap();
/// assert_eq!(pair, (true, "x".to_string()));
/// ```
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to a brass document string.
///
/// # Examples
///
/// ```rust
/// use serde_brass::to_string;
///
/// assert_eq!(to_string(&42).unwrap(), "($2a)");
/// assert_eq!(to_string(&vec!["a", "b"]).unwrap(), "((\"a\" \"b\"))");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a brass document string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_vec_with_options(value, options).map(ascii_to_string)
}

/// Serialize any `T: Serialize` to brass document bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_vec_with_options(value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to brass document bytes with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_vec_with_options<T>(value: &T, options: EncodeOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let document = Value::List(vec![to_value(value)?]);
    Ok(encode_with_options(&document, options))
}

/// Serialize any `T: Serialize` as a brass document into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_brass::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Some(true)).unwrap();
/// assert_eq!(buffer, b"(true)");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let bytes = to_vec_with_options(value, options)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from brass document bytes.
///
/// The input must be a single one-element list with nothing after it.
///
/// # Examples
///
/// ```rust
/// use serde_brass::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b"({(\"x\" $1) (\"y\" -$2)})").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a canonical brass document, has trailing
/// bytes, or cannot be deserialized to type `T`.
pub fn from_slice<T>(input: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice_with_options(input, DecodeOptions::default())
}

/// Deserialize an instance of type `T` from brass document bytes with custom
/// options.
///
/// # Errors
///
/// Same as [`from_slice`].
pub fn from_slice_with_options<T>(input: &[u8], options: DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_decoder(Decoder::from_slice(input).with_options(options))
}

/// Deserialize an instance of type `T` from a brass document string.
///
/// # Errors
///
/// Same as [`from_slice`].
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice(s.as_bytes())
}

/// Deserialize an instance of type `T` from an I/O stream holding a brass document.
///
/// # Examples
///
/// ```rust
/// use serde_brass::from_reader;
/// use std::io::Cursor;
///
/// let numbers: Vec<u8> = from_reader(Cursor::new(b"(($1 $2 $3))")).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not a brass document, or the data
/// cannot be deserialized to type `T`.
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_reader_with_options(reader, DecodeOptions::default())
}

/// Deserialize an instance of type `T` from an I/O stream with custom options.
///
/// # Errors
///
/// Same as [`from_reader`].
pub fn from_reader_with_options<R, T>(reader: R, options: DecodeOptions) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_decoder(Decoder::from_reader(reader).with_options(options))
}

fn from_decoder<R: Read, T: DeserializeOwned>(mut decoder: Decoder<R>) -> Result<T> {
    let document = decoder.decode()?;
    decoder.end()?;
    from_value(unwrap_document(document)?)
}

/// Takes the single value out of a serde document.
fn unwrap_document(document: Value) -> Result<Value> {
    match document {
        Value::List(items) => {
            let count = items.len();
            let mut iter = items.into_iter();
            match (iter.next(), iter.next()) {
                (Some(value), None) => Ok(value),
                _ => Err(Error::custom(format!(
                    "expected a document holding exactly one value, found {} values",
                    count
                ))),
            }
        }
        other => Err(Error::type_mismatch("list", other.kind())),
    }
}
