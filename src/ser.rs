//! Brass serialization.
//!
//! This module provides two things:
//!
//! - [`Encoder`], which writes a [`Value`] tree in its canonical text form
//! - [`ValueSerializer`], a serde serializer that turns any `T: Serialize` into
//!   a [`Value`] tree
//!
//! ## Canonical output
//!
//! | kind | output |
//! |------|--------|
//! | nil | `nil` |
//! | bool | `true` / `false` |
//! | integer | `$3ff`, `-$3ff` (minimal lowercase hex) |
//! | octets | `#3$616263` (hex byte count, `$`, hex data) |
//! | string | `"a\tb\x00"` |
//! | list | `(a b c)` |
//! | map | `{(k1 v1) (k2 v2)}` |
//!
//! Strings escape `\`, `"`, CR, LF and TAB with short escapes and every other
//! byte below 32 or above 127 as `\xHH`, so the output is always ASCII.
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use serde_brass::{EncodeOptions, Encoder, Value};
//!
//! let mut encoder = Encoder::new(EncodeOptions::default());
//! encoder.encode(&Value::list(vec![Value::from(1), Value::from("x")]));
//! assert_eq!(encoder.into_inner(), b"($1 \"x\")");
//! ```

use crate::value::STRING_TOKEN;
use crate::{BrassMap, EncodeOptions, Error, Primitive, Result, Value};
use serde::{ser, Serialize};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// The canonical brass writer.
///
/// Output is appended to an owned buffer; writing never fails.
pub struct Encoder {
    output: Vec<u8>,
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Encoder {
            output: Vec::with_capacity(256),
            options,
        }
    }

    /// Appends to `buffer` instead of starting from an empty one.
    pub fn with_buffer(buffer: Vec<u8>, options: EncodeOptions) -> Self {
        Encoder {
            output: buffer,
            options,
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    pub fn encode(&mut self, value: &Value) {
        write_value(&mut self.output, value, &self.options);
    }

    pub fn encode_primitive(&mut self, value: &Primitive) {
        write_primitive(&mut self.output, value);
    }
}

fn write_value(out: &mut Vec<u8>, value: &Value, options: &EncodeOptions) {
    match value {
        Value::Nil => out.extend_from_slice(b"nil"),
        Value::Bool(b) => write_bool(out, *b),
        Value::Integer(i) => write_integer(out, *i),
        Value::String(s) => write_string(out, s),
        Value::Octets(o) => write_octets(out, o),
        Value::List(items) => {
            out.push(b'(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                write_value(out, item, options);
            }
            out.push(b')');
        }
        Value::Map(map) => write_map(out, map, options),
    }
}

fn write_map(out: &mut Vec<u8>, map: &BrassMap, options: &EncodeOptions) {
    let mut entries: Vec<(&Primitive, &Value)> = map.iter().collect();
    if options.sort_map_keys {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }

    out.push(b'{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(b' ');
        }
        out.push(b'(');
        write_primitive(out, key);
        out.push(b' ');
        write_value(out, value, options);
        out.push(b')');
    }
    out.push(b'}');
}

pub(crate) fn write_primitive(out: &mut Vec<u8>, value: &Primitive) {
    match value {
        Primitive::Nil => out.extend_from_slice(b"nil"),
        Primitive::Bool(b) => write_bool(out, *b),
        Primitive::Integer(i) => write_integer(out, *i),
        Primitive::String(s) => write_string(out, s),
        Primitive::Octets(o) => write_octets(out, o),
    }
}

#[inline]
fn write_bool(out: &mut Vec<u8>, b: bool) {
    out.extend_from_slice(if b { b"true" } else { b"false" });
}

fn write_integer(out: &mut Vec<u8>, i: i64) {
    if i < 0 {
        out.push(b'-');
    }
    out.push(b'$');
    write_hex_u64(out, i.unsigned_abs());
}

fn write_hex_u64(out: &mut Vec<u8>, mut n: u64) {
    let mut buf = [0u8; 16];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = HEX[(n & 0xf) as usize];
        n >>= 4;
        if n == 0 {
            break;
        }
    }
    out.extend_from_slice(&buf[pos..]);
}

#[inline]
fn write_hex_byte(out: &mut Vec<u8>, b: u8) {
    out.push(HEX[(b >> 4) as usize]);
    out.push(HEX[(b & 0xf) as usize]);
}

fn write_octets(out: &mut Vec<u8>, data: &[u8]) {
    out.push(b'#');
    write_hex_u64(out, data.len() as u64);
    out.push(b'$');
    out.reserve(data.len() * 2);
    for &b in data {
        write_hex_byte(out, b);
    }
}

fn write_string(out: &mut Vec<u8>, s: &[u8]) {
    out.push(b'"');
    for &b in s {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'"' => out.extend_from_slice(b"\\\""),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0..=31 | 128..=255 => {
                out.extend_from_slice(b"\\x");
                write_hex_byte(out, b);
            }
            _ => out.push(b),
        }
    }
    out.push(b'"');
}

/// Serializes Rust values into a [`Value`] tree.
///
/// Used by [`to_value`](crate::to_value) and, through it, by every `to_*`
/// function of the crate.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_brass::{Primitive, Value, ValueSerializer};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = Point { x: 1, y: -2 }.serialize(ValueSerializer).unwrap();
/// let map = value.as_map().unwrap();
/// assert_eq!(map.get(&Primitive::from("y")), Some(&Value::Integer(-2)));
/// ```
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

/// Collects the fields of a tuple variant, wrapped under the variant name.
pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: BrassMap,
    current_key: Option<Primitive>,
}

/// Collects the fields of a struct variant, wrapped under the variant name.
pub struct SerializeStructVariant {
    name: &'static str,
    map: BrassMap,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::custom(format!("integer {} does not fit in i64", v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::custom(format!("integer {} does not fit in i64", v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::custom(format!("integer {} does not fit in i64", v)))
    }

    fn serialize_f32(self, _v: f32) -> Result<Value> {
        Err(Error::unsupported_type("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Value> {
        Err(Error::unsupported_type("f64"))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        let mut buf = [0u8; 4];
        Ok(Value::String(v.encode_utf8(&mut buf).as_bytes().to_vec()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.as_bytes().to_vec()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Octets(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.as_bytes().to_vec()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(self)? {
            Value::Octets(bytes) if name == STRING_TOKEN => Ok(Value::String(bytes)),
            other => Ok(other),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: BrassMap::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(len: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(len),
        }
    }
}

impl SerializeMap {
    fn new(len: usize) -> Self {
        SerializeMap {
            map: BrassMap::with_capacity(len),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.name, Value::List(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(Primitive::try_from(to_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(Primitive::from(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(Primitive::from(key), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.name, Value::Map(self.map)))
    }
}

/// `{("Variant" payload)}`: the externally tagged form of a non-unit variant.
fn tagged(variant: &'static str, payload: Value) -> Value {
    let mut map = BrassMap::with_capacity(1);
    map.insert(Primitive::from(variant), payload);
    Value::Map(map)
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
