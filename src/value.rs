//! Dynamic value representation for brass data.
//!
//! [`Value`] is the tree every decode produces and every encode consumes. It is
//! a plain owned tree: lists own their children, maps own their keys and values,
//! and nothing points back up, so dropping a tree needs no special care.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_brass::{brass, Value};
//!
//! let empty = Value::nil();
//! let flag = Value::from(true);
//! let count = Value::integer(1023);
//! let text = Value::from("hello");
//! let blob = Value::octets(b"\x00\x01".to_vec());
//!
//! let tree = brass!([empty, flag, count, text, blob]);
//! assert_eq!(tree.to_string(), "(nil true $3ff \"hello\" #2$0001)");
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use serde_brass::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::integer(-7);
//! assert_eq!(value.as_i64(), Some(-7));
//! assert_eq!(value.as_bool(), None);
//!
//! let n = i64::try_from(value).unwrap();
//! assert_eq!(n, -7);
//! ```

use crate::{BrassMap, Error, Primitive, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The kind of a brass value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Nil,
    Bool,
    Integer,
    String,
    Octets,
    List,
    Map,
}

impl Kind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::String => "string",
            Kind::Octets => "octets",
            Kind::List => "list",
            Kind::Map => "map",
        }
    }

    /// Returns `true` for lists and maps.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Kind::List | Kind::Map)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any brass value.
///
/// `String` and `Octets` both hold raw bytes; they differ only in how they are
/// written (quoted with escapes versus length-prefixed hex).
///
/// # Examples
///
/// ```rust
/// use serde_brass::{decode, Kind, Value};
///
/// let doc = decode(b"(nil true $3ff)").unwrap();
/// assert_eq!(doc.kind(), Kind::List);
/// assert_eq!(
///     doc.as_list().unwrap(),
///     &[Value::Nil, Value::Bool(true), Value::Integer(1023)]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Integer(i64),
    String(Vec<u8>),
    Octets(Vec<u8>),
    List(Vec<Value>),
    Map(BrassMap),
}

impl Value {
    #[must_use]
    pub const fn nil() -> Self {
        Value::Nil
    }

    #[must_use]
    pub const fn bool(value: bool) -> Self {
        Value::Bool(value)
    }

    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    /// A quoted string holding arbitrary bytes.
    #[must_use]
    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Value::String(bytes.into())
    }

    /// A hex-encoded octet string.
    #[must_use]
    pub fn octets(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Octets(bytes.into())
    }

    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Builds a map; later duplicates of a key overwrite earlier ones.
    #[must_use]
    pub fn map(entries: impl IntoIterator<Item = (Primitive, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Integer(_) => Kind::Integer,
            Value::String(_) => Kind::String,
            Value::Octets(_) => Kind::Octets,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_octets(&self) -> bool {
        matches!(self, Value::Octets(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` for every kind that may key a map.
    #[inline]
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !self.kind().is_composite()
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_brass::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_bool(), Some(true));
    /// assert_eq!(Value::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The raw bytes of a string value.
    #[inline]
    #[must_use]
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// A string value as `&str`. Returns `None` for other kinds and for strings
    /// that are not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_brass::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::string(vec![0xff]).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_string().and_then(|s| std::str::from_utf8(s).ok())
    }

    #[inline]
    #[must_use]
    pub fn as_octets(&self) -> Option<&[u8]> {
        match self {
            Value::Octets(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&BrassMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Writes the canonical encoding, which is always ASCII.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode_to_string(self))
    }
}

/// Newtype name that tags a string whose bytes are not valid UTF-8.
///
/// Such a string is serialized as this newtype around its raw bytes, so
/// [`ValueSerializer`](crate::ser::ValueSerializer) and the `Value` visitor can
/// tell it apart from octets.
pub(crate) const STRING_TOKEN: &str = "$serde_brass::private::String";

struct RawString<'a>(&'a [u8]);

impl Serialize for RawString<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.0)
    }
}

pub(crate) fn serialize_string<S>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match std::str::from_utf8(bytes) {
        Ok(text) => serializer.serialize_str(text),
        Err(_) => serializer.serialize_newtype_struct(STRING_TOKEN, &RawString(bytes)),
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::String(s) => serialize_string(s, serializer),
            Value::Octets(o) => serializer.serialize_bytes(o),
            Value::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid brass value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {} does not fit in i64", value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                Err(E::custom(format!(
                    "brass has no floating point values, found {}",
                    value
                )))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.as_bytes().to_vec()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value.into_bytes()))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> std::result::Result<Value, E> {
                Ok(Value::Octets(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> std::result::Result<Value, E> {
                Ok(Value::Octets(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Nil)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Nil)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            // Non-UTF-8 strings arrive as a newtype around their bytes.
            fn visit_newtype_struct<D>(
                self,
                deserializer: D,
            ) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                match Value::deserialize(deserializer)? {
                    Value::Octets(bytes) => Ok(Value::String(bytes)),
                    other => Ok(other),
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = BrassMap::new();
                while let Some((key, value)) = map.next_entry::<Primitive, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Map(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::type_mismatch("bool", other.kind())),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(Error::type_mismatch("integer", other.kind())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => String::from_utf8(s)
                .map_err(|e| Error::custom(format!("string is not valid UTF-8: {}", e))),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Octets(o) => Ok(o),
            other => Err(Error::type_mismatch("octets", other.kind())),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(Error::type_mismatch("list", other.kind())),
        }
    }
}

impl TryFrom<Value> for BrassMap {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(Error::type_mismatch("map", other.kind())),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into_bytes())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Octets(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Octets(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<BrassMap> for Value {
    fn from(value: BrassMap) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
