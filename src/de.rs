//! Brass deserialization.
//!
//! This module provides the [`Decoder`], a recursive-descent parser that turns
//! brass text into a [`Value`] tree, and the serde glue that turns a [`Value`]
//! tree into any `T: Deserialize`.
//!
//! ## Overview
//!
//! - **One byte of lookahead**: the decoder reads through a [`Read`] cursor and
//!   pushes back at most one byte
//! - **Canonical only**: exactly one space between elements, lowercase hex,
//!   no alternative spellings; anything else is an error
//! - **Terminal errors**: the first error ends the decode and no partial tree
//!   is returned
//! - **Bounded nesting**: [`DecodeOptions::max_depth`] caps recursion
//!
//! ## Usage
//!
//! ```rust
//! use serde_brass::{Decoder, Primitive, Value};
//!
//! let mut decoder = Decoder::from_slice(b"({(\"a\" $1)} #2$beef) trailing");
//! let doc = decoder.decode().unwrap();
//! let items = doc.as_list().unwrap();
//! assert_eq!(
//!     items[0].as_map().unwrap().get(&Primitive::from("a")),
//!     Some(&Value::Integer(1))
//! );
//! assert_eq!(items[1], Value::octets(vec![0xbe, 0xef]));
//! // bytes after the closing ')' are left alone
//! assert!(decoder.end().is_err());
//! ```

use crate::lex::{hex_value, is_hex_digit, is_token_remainder, is_token_start};
use crate::read::{IoRead, Read, SliceRead};
use crate::{BrassMap, DecodeOptions, Error, Primitive, Result, Value};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::io;

/// Octets payloads reserve at most this much up front; longer payloads grow as
/// their digits actually arrive.
const MAX_PREALLOC: usize = 64 * 1024;

/// Longest keyword (`false`).
const MAX_KEYWORD: usize = 5;

/// The brass decoder.
///
/// One decoder owns one byte cursor. It keeps no state between calls other than
/// the cursor position.
pub struct Decoder<R> {
    read: R,
    options: DecodeOptions,
    depth: usize,
}

impl<'a> Decoder<SliceRead<'a>> {
    /// Creates a decoder over an in-memory buffer.
    pub fn from_slice(input: &'a [u8]) -> Self {
        Decoder::new(SliceRead::new(input))
    }
}

impl<R: io::Read> Decoder<IoRead<R>> {
    /// Creates a decoder over any [`std::io::Read`].
    pub fn from_reader(reader: R) -> Self {
        Decoder::new(IoRead::new(reader))
    }
}

impl<R: Read> Decoder<R> {
    pub fn new(read: R) -> Self {
        Decoder {
            read,
            options: DecodeOptions::default(),
            depth: 0,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.read.offset()
    }

    pub fn into_inner(self) -> R {
        self.read
    }

    /// Decodes one top-level list.
    ///
    /// Reading stops right after the closing `)`; whatever follows is left in
    /// the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a canonical brass list.
    pub fn decode(&mut self) -> Result<Value> {
        let c = self.next_or_eof("'('")?;
        if c != b'(' {
            return Err(self.unexpected(c, "'('"));
        }
        self.parse_list()
    }

    /// Decodes a single primitive (anything but a list or map).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotPrimitive`] when the input holds a list or map.
    pub fn decode_primitive(&mut self) -> Result<Primitive> {
        let mut slot = Primitive::Nil;
        self.decode_primitive_into(&mut slot)?;
        Ok(slot)
    }

    /// Decodes a single primitive into `slot`, reusing the byte buffer of a
    /// previous string or octets payload.
    ///
    /// On error `slot` is left as `Nil`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_brass::{Decoder, Primitive};
    ///
    /// let mut slot = Primitive::Nil;
    /// let mut decoder = Decoder::from_slice(b"\"first\"");
    /// decoder.decode_primitive_into(&mut slot).unwrap();
    /// assert_eq!(slot, Primitive::from("first"));
    ///
    /// let mut decoder = Decoder::from_slice(b"#2$0102");
    /// decoder.decode_primitive_into(&mut slot).unwrap();
    /// assert_eq!(slot, Primitive::Octets(vec![1, 2]));
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::decode_primitive`].
    pub fn decode_primitive_into(&mut self, slot: &mut Primitive) -> Result<()> {
        let c = self.next_or_eof("primitive")?;
        self.parse_primitive(c, slot)
    }

    /// Checks that the input has been fully consumed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrailingBytes`] if any byte remains.
    pub fn end(&mut self) -> Result<()> {
        match self.read.next()? {
            None => Ok(()),
            Some(_) => Err(Error::TrailingBytes {
                offset: self.read.offset() - 1,
            }),
        }
    }

    fn next_or_eof(&mut self, expected: &'static str) -> Result<u8> {
        match self.read.next()? {
            Some(b) => Ok(b),
            None => Err(Error::unexpected_eof(self.read.offset(), expected)),
        }
    }

    fn expect(&mut self, want: u8, expected: &'static str) -> Result<()> {
        let c = self.next_or_eof(expected)?;
        if c == want {
            Ok(())
        } else {
            Err(self.unexpected(c, expected))
        }
    }

    /// Error for the byte just read.
    fn unexpected(&self, c: u8, expected: &'static str) -> Error {
        Error::syntax(self.last_offset(), expected, c)
    }

    fn last_offset(&self) -> usize {
        self.read.offset().saturating_sub(1)
    }

    fn hex_digit(&mut self) -> Result<u8> {
        let c = self.next_or_eof("hex digit")?;
        if !is_hex_digit(c) {
            return Err(self.unexpected(c, "hex digit"));
        }
        Ok(hex_value(c))
    }

    fn enter(&mut self) -> Result<()> {
        if let Some(limit) = self.options.max_depth {
            if self.depth >= limit {
                return Err(Error::DepthLimitExceeded {
                    offset: self.last_offset(),
                    limit,
                });
            }
        }
        self.depth += 1;
        Ok(())
    }

    /// Parses any value whose first byte `c` has already been read.
    fn parse_value(&mut self, c: u8) -> Result<Value> {
        match c {
            b'(' => self.parse_list(),
            b'{' => self.parse_map(),
            _ => {
                let mut primitive = Primitive::Nil;
                self.parse_primitive(c, &mut primitive)?;
                Ok(primitive.into())
            }
        }
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.enter()?;
        let items = self.parse_list_items();
        self.depth -= 1;
        items.map(Value::List)
    }

    fn parse_list_items(&mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let c = self.next_or_eof("value or ')'")?;
        if c == b')' {
            return Ok(items);
        }
        items.push(self.parse_value(c)?);
        loop {
            match self.next_or_eof("' ' or ')'")? {
                b')' => return Ok(items),
                b' ' => {
                    let c = self.next_or_eof("value")?;
                    items.push(self.parse_value(c)?);
                }
                c => return Err(self.unexpected(c, "' ' or ')'")),
            }
        }
    }

    fn parse_map(&mut self) -> Result<Value> {
        self.enter()?;
        let map = self.parse_map_entries();
        self.depth -= 1;
        map.map(Value::Map)
    }

    fn parse_map_entries(&mut self) -> Result<BrassMap> {
        let mut map = BrassMap::new();
        let c = self.next_or_eof("'(' or '}'")?;
        if c == b'}' {
            return Ok(map);
        }
        self.parse_entry(c, &mut map)?;
        loop {
            match self.next_or_eof("' ' or '}'")? {
                b'}' => return Ok(map),
                b' ' => {
                    let c = self.next_or_eof("'('")?;
                    self.parse_entry(c, &mut map)?;
                }
                c => return Err(self.unexpected(c, "' ' or '}'")),
            }
        }
    }

    /// `(` key ` ` value `)`, with `c` the already-read first byte.
    fn parse_entry(&mut self, c: u8, map: &mut BrassMap) -> Result<()> {
        if c != b'(' {
            return Err(self.unexpected(c, "'('"));
        }
        let c = self.next_or_eof("map key")?;
        let mut key = Primitive::Nil;
        self.parse_primitive(c, &mut key)?;
        self.expect(b' ', "' '")?;
        let c = self.next_or_eof("map value")?;
        let value = self.parse_value(c)?;
        self.expect(b')', "')'")?;
        map.insert(key, value);
        Ok(())
    }

    fn parse_primitive(&mut self, c: u8, slot: &mut Primitive) -> Result<()> {
        match c {
            b'"' => {
                let mut buf = slot.take_buffer();
                self.parse_string(&mut buf)?;
                *slot = Primitive::String(buf);
            }
            b'#' => {
                let mut buf = slot.take_buffer();
                self.parse_octets(&mut buf)?;
                *slot = Primitive::Octets(buf);
            }
            b'$' => *slot = Primitive::Integer(self.parse_integer(false)?),
            b'-' => {
                self.expect(b'$', "'$'")?;
                *slot = Primitive::Integer(self.parse_integer(true)?);
            }
            b'(' | b'{' => {
                return Err(Error::NotPrimitive {
                    offset: self.last_offset(),
                })
            }
            c if is_token_start(c) => *slot = self.parse_keyword(c)?,
            c => return Err(self.unexpected(c, "value")),
        }
        Ok(())
    }

    /// Hex digits after `$`. Any number of leading zeros is accepted.
    fn parse_integer(&mut self, negative: bool) -> Result<i64> {
        let start = self.read.offset();
        let mut digit = self.hex_digit()?;
        let mut magnitude: u64 = 0;
        loop {
            magnitude = magnitude
                .checked_mul(16)
                .and_then(|m| m.checked_add(u64::from(digit)))
                .ok_or_else(|| Error::overflow(start, "integer"))?;
            match self.read.next()? {
                Some(c) if is_hex_digit(c) => digit = hex_value(c),
                Some(_) => {
                    self.read.push_back();
                    break;
                }
                None => break,
            }
        }

        let value = if negative {
            -i128::from(magnitude)
        } else {
            i128::from(magnitude)
        };
        i64::try_from(value).map_err(|_| Error::overflow(start, "integer"))
    }

    /// `<hexlen> $ <2*len hex digits>`, after the leading `#`.
    fn parse_octets(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let start = self.last_offset();
        let mut len = u64::from(self.hex_digit()?);
        loop {
            let c = self.next_or_eof("'$'")?;
            if c == b'$' {
                break;
            }
            if !is_hex_digit(c) {
                return Err(self.unexpected(c, "hex digit or '$'"));
            }
            len = len
                .checked_mul(16)
                .and_then(|l| l.checked_add(u64::from(hex_value(c))))
                .ok_or_else(|| Error::overflow(start, "octets length"))?;
        }
        let len = usize::try_from(len).map_err(|_| Error::overflow(start, "octets length"))?;

        buf.reserve(len.min(MAX_PREALLOC));
        for _ in 0..len {
            let hi = self.hex_digit()?;
            let lo = self.hex_digit()?;
            buf.push(hi << 4 | lo);
        }
        Ok(())
    }

    /// String body after the opening quote.
    fn parse_string(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        loop {
            let c = self.next_or_eof("'\"'")?;
            match c {
                b'"' => return Ok(()),
                b'\\' => {
                    let e = self.next_or_eof("escape character")?;
                    match e {
                        b'\\' => buf.push(b'\\'),
                        b'"' => buf.push(b'"'),
                        b'r' => buf.push(b'\r'),
                        b'n' => buf.push(b'\n'),
                        b't' => buf.push(b'\t'),
                        b'x' => {
                            let hi = self.hex_digit()?;
                            let lo = self.hex_digit()?;
                            buf.push(hi << 4 | lo);
                        }
                        b'\r' | b'\n' => return Err(self.unexpected(e, "escape character")),
                        _ if self.options.strict_escapes => {
                            return Err(self.unexpected(e, "escape character"))
                        }
                        // Unknown escapes are consumed and produce no byte.
                        _ => {}
                    }
                }
                b'\r' | b'\n' => return Err(self.unexpected(c, "string byte or '\"'")),
                _ => buf.push(c),
            }
        }
    }

    fn parse_keyword(&mut self, first: u8) -> Result<Primitive> {
        let start = self.last_offset();
        let mut word = [0u8; MAX_KEYWORD];
        word[0] = first;
        let mut len = 1;
        loop {
            match self.read.next()? {
                Some(c) if is_token_remainder(c) => {
                    if len == MAX_KEYWORD {
                        return Err(Error::syntax_msg(
                            start,
                            "nil, true or false",
                            "unknown keyword",
                        ));
                    }
                    word[len] = c;
                    len += 1;
                }
                Some(_) => {
                    self.read.push_back();
                    break;
                }
                None => break,
            }
        }

        match &word[..len] {
            b"nil" => Ok(Primitive::Nil),
            b"true" => Ok(Primitive::Bool(true)),
            b"false" => Ok(Primitive::Bool(false)),
            other => Err(Error::syntax_msg(
                start,
                "nil, true or false",
                &format!("'{}'", String::from_utf8_lossy(other)),
            )),
        }
    }
}

/// Feeds an owned [`Value`] tree to a serde visitor.
pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Nil => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::String(s) => match String::from_utf8(s) {
                Ok(text) => visitor.visit_string(text),
                Err(e) => visitor
                    .visit_newtype_struct(ValueDeserializer::new(Value::Octets(e.into_bytes()))),
            },
            Value::Octets(o) => visitor.visit_byte_buf(o),
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) | Value::Octets(s) => visitor.visit_byte_buf(s),
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Nil => visitor.visit_none(),
            other => visitor.visit_some(ValueDeserializer::new(other)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            // `Vec<u8>` and `[u8; N]` without serde_bytes ask for a sequence.
            Value::Octets(o) => {
                let mut seq = de::value::SeqDeserializer::<_, Error>::new(o.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => {
                let variant = String::from_utf8(s)
                    .map_err(|_| Error::custom("enum variant name is not valid UTF-8"))?;
                let de: de::value::StringDeserializer<Error> = variant.into_deserializer();
                visitor.visit_enum(de)
            }
            Value::Map(map) => {
                if map.len() != 1 {
                    return Err(Error::custom(format!(
                        "expected a map with a single variant entry, found {} entries",
                        map.len()
                    )));
                }
                let mut iter = map.into_iter();
                match iter.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(Value::from(variant), value))
                    }
                    None => Err(Error::custom("expected enum variant")),
                }
            }
            other => Err(Error::type_mismatch("string or map", other.kind())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        unit unit_struct tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<Primitive, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: BrassMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::from(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: Value,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: Value, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Nil => Ok(()),
            other => Err(Error::type_mismatch("nil", other.kind())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            other => Err(Error::type_mismatch("list", other.kind())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
            other => Err(Error::type_mismatch("map", other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn decode(input: &[u8]) -> Result<Value> {
        Decoder::from_slice(input).decode()
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(decode(b"()").unwrap(), Value::List(vec![]));
        assert_eq!(
            decode(b"(() ())").unwrap(),
            Value::list(vec![Value::list(vec![]), Value::list(vec![])])
        );
    }

    #[test]
    fn test_separator_is_exactly_one_space() {
        for input in [&b"( )"[..], b"(nil  nil)", b"(nil )", b"( nil)", b"(()())", b"(nil\tnil)"] {
            let err = decode(input).unwrap_err();
            assert_eq!(err.classify(), Category::Syntax, "{:?}", input);
        }
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(
            decode(b"($7fffffffffffffff -$8000000000000000)").unwrap(),
            Value::list(vec![Value::Integer(i64::MAX), Value::Integer(i64::MIN)])
        );
        assert!(decode(b"($8000000000000000)").unwrap_err().is_overflow());
        assert!(decode(b"(-$8000000000000001)").unwrap_err().is_overflow());
        assert!(decode(b"($10000000000000000)").unwrap_err().is_overflow());
    }

    #[test]
    fn test_integer_leading_zeros() {
        assert_eq!(
            decode(b"($0010 -$0)").unwrap(),
            Value::list(vec![Value::Integer(16), Value::Integer(0)])
        );
    }

    #[test]
    fn test_integer_errors() {
        assert!(decode(b"($)").unwrap_err().is_syntax());
        assert!(decode(b"(-3)").unwrap_err().is_syntax());
        assert!(decode(b"($3FF)").unwrap_err().is_syntax());
        assert!(decode(b"($3ff").unwrap_err().is_eof());
    }

    #[test]
    fn test_octets_errors() {
        assert!(decode(b"(#2$ab)").unwrap_err().is_syntax());
        assert!(decode(b"(#1$abcd)").unwrap_err().is_syntax());
        assert!(decode(b"(#1$a)").unwrap_err().is_syntax());
        assert!(decode(b"(#$)").unwrap_err().is_syntax());
        assert!(decode(b"(#1$AB)").unwrap_err().is_syntax());
        assert!(decode(b"(#1x00)").unwrap_err().is_syntax());
        assert!(decode(b"(#10000000000000000$)").unwrap_err().is_overflow());
        assert!(decode(b"(#ffffffff$00").unwrap_err().is_eof());
    }

    #[test]
    fn test_keywords_are_exact() {
        for input in [&b"(nul)"[..], b"(nill)", b"(True)", b"(falsey)", b"(t)", b"(abc)"] {
            assert!(decode(input).unwrap_err().is_syntax(), "{:?}", input);
        }
    }

    #[test]
    fn test_unknown_escape_is_dropped() {
        assert_eq!(
            decode(b"(\"a\\qb\")").unwrap(),
            Value::list(vec![Value::from("ab")])
        );
        let strict = DecodeOptions::new().with_strict_escapes(true);
        let err = Decoder::from_slice(b"(\"a\\qb\")")
            .with_options(strict)
            .decode()
            .unwrap_err();
        assert_eq!(err, Error::syntax(4, "escape character", b'q'));
    }

    #[test]
    fn test_string_hex_escape() {
        assert_eq!(
            decode(b"(\"\\xff\\x00\\x7e\")").unwrap(),
            Value::list(vec![Value::string(vec![0xff, 0x00, 0x7e])])
        );
        assert!(decode(b"(\"\\xFF\")").unwrap_err().is_syntax());
        assert!(decode(b"(\"\\x0\")").unwrap_err().is_syntax());
    }

    #[test]
    fn test_raw_bytes_in_string() {
        assert_eq!(
            decode(b"(\"\xc3\xa9\t\")").unwrap(),
            Value::list(vec![Value::string(vec![0xc3, 0xa9, b'\t'])])
        );
        assert!(decode(b"(\"a\rb\")").unwrap_err().is_syntax());
    }

    #[test]
    fn test_map_entries() {
        let value = decode(b"({(nil $1) (true $2) ($3 $3) (#1$00 $4) (\"k\" {})})").unwrap();
        let map = value.as_list().unwrap()[0].as_map().unwrap();
        assert_eq!(map.len(), 5);
        assert_eq!(map.get(&Primitive::Nil), Some(&Value::Integer(1)));
        assert_eq!(map.get(&Primitive::Octets(vec![0])), Some(&Value::Integer(4)));
        assert_eq!(map.get_str("k"), Some(&Value::map(vec![])));
    }

    #[test]
    fn test_map_duplicate_key_last_wins() {
        let value = decode(b"({(\"a\" $1) (\"a\" $2)})").unwrap();
        let map = value.as_list().unwrap()[0].as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_str("a"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_map_composite_key() {
        let err = decode(b"({(() $1)})").unwrap_err();
        assert_eq!(err, Error::NotPrimitive { offset: 3 });
        let err = decode(b"({({} $1)})").unwrap_err();
        assert_eq!(err.classify(), Category::Context);
    }

    #[test]
    fn test_map_entry_shape() {
        for input in [
            &b"({(\"a\")})"[..],
            b"({(\"a\" $1 $2)})",
            b"({\"a\"})",
            b"({(\"a\"  $1)})",
            b"({(\"a\" $1)(\"b\" $2)})",
        ] {
            assert!(decode(input).unwrap_err().is_syntax(), "{:?}", input);
        }
    }

    #[test]
    fn test_top_level_must_be_list() {
        assert_eq!(decode(b"nil").unwrap_err(), Error::syntax(0, "'('", b'n'));
        assert!(decode(b"{}").unwrap_err().is_syntax());
        assert_eq!(decode(b"").unwrap_err(), Error::unexpected_eof(0, "'('"));
    }

    #[test]
    fn test_depth_limit() {
        let options = DecodeOptions::new().with_max_depth(Some(3));
        assert!(Decoder::from_slice(b"((()))")
            .with_options(options.clone())
            .decode()
            .is_ok());
        let err = Decoder::from_slice(b"(({(nil ())}))")
            .with_options(options)
            .decode()
            .unwrap_err();
        assert_eq!(
            err,
            Error::DepthLimitExceeded {
                offset: 8,
                limit: 3
            }
        );
    }

    #[test]
    fn test_depth_resets_after_limit_error() {
        let options = DecodeOptions::new().with_max_depth(Some(2));
        let mut decoder = Decoder::from_slice(b"((((())").with_options(options);
        let err = decoder.decode().unwrap_err();
        assert_eq!(
            err,
            Error::DepthLimitExceeded {
                offset: 2,
                limit: 2
            }
        );
        assert_eq!(decoder.depth, 0);
        // the rest of the input, "(())", sits exactly at the limit
        assert_eq!(
            decoder.decode().unwrap(),
            Value::list(vec![Value::list(vec![])])
        );
    }

    #[test]
    fn test_integer_stops_at_uppercase_hex() {
        let mut decoder = Decoder::from_slice(b"$1fA");
        assert_eq!(decoder.decode_primitive().unwrap(), Primitive::Integer(0x1f));
        assert_eq!(decoder.offset(), 3);
        assert!(decode(b"(#1$fF)").is_err());
        assert!(decode(b"(#A$)").is_err());
    }

    #[test]
    fn test_trailing_bytes_left_in_cursor() {
        let mut decoder = Decoder::from_slice(b"(nil) rest");
        assert_eq!(decoder.decode().unwrap(), Value::list(vec![Value::Nil]));
        assert_eq!(decoder.offset(), 5);
        assert_eq!(decoder.into_inner().remaining(), b" rest");
    }

    #[test]
    fn test_decode_primitive() {
        let mut decoder = Decoder::from_slice(b"-$10");
        assert_eq!(decoder.decode_primitive().unwrap(), Primitive::Integer(-16));
        assert!(decoder.end().is_ok());

        let err = Decoder::from_slice(b"(nil)").decode_primitive().unwrap_err();
        assert_eq!(err, Error::NotPrimitive { offset: 0 });
    }

    #[test]
    fn test_decode_primitive_into_reuses_buffer() {
        let mut slot = Primitive::String(Vec::with_capacity(32));
        Decoder::from_slice(b"#3$616263")
            .decode_primitive_into(&mut slot)
            .unwrap();
        match &slot {
            Primitive::Octets(buf) => {
                assert_eq!(buf, b"abc");
                assert!(buf.capacity() >= 32);
            }
            other => panic!("Expected octets, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_source() {
        let input: &[u8] = b"($1 \"two\")";
        let value = Decoder::from_reader(input).decode().unwrap();
        assert_eq!(
            value,
            Value::list(vec![Value::Integer(1), Value::from("two")])
        );
    }
}
