//! Non-composite values, usable as map keys.

use crate::error::{Error, Result};
use crate::value::{serialize_string, Kind, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A brass atom: every kind except lists and maps.
///
/// Primitives compare structurally, which is what lets them key a
/// [`BrassMap`](crate::BrassMap). The derived ordering sorts by kind first
/// (nil, bool, integer, string, octets) and then by payload, with byte strings
/// compared lexicographically.
///
/// # Examples
///
/// ```rust
/// use serde_brass::Primitive;
///
/// let key = Primitive::from("name");
/// assert_eq!(key.to_string(), "\"name\"");
/// assert!(Primitive::Nil < Primitive::Bool(false));
/// assert!(Primitive::Integer(9) < Primitive::from("a"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    #[default]
    Nil,
    Bool(bool),
    Integer(i64),
    String(Vec<u8>),
    Octets(Vec<u8>),
}

impl Primitive {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Primitive::Nil => Kind::Nil,
            Primitive::Bool(_) => Kind::Bool,
            Primitive::Integer(_) => Kind::Integer,
            Primitive::String(_) => Kind::String,
            Primitive::Octets(_) => Kind::Octets,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Primitive::Nil)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Primitive::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The raw bytes of a string primitive.
    #[inline]
    #[must_use]
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }

    /// A string primitive as `&str`, if it holds valid UTF-8.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_string().and_then(|s| std::str::from_utf8(s).ok())
    }

    #[inline]
    #[must_use]
    pub fn as_octets(&self) -> Option<&[u8]> {
        match self {
            Primitive::Octets(o) => Some(o),
            _ => None,
        }
    }

    /// Takes the byte buffer of a string or octets payload, cleared, leaving
    /// `self` as `Nil`. Other kinds yield a fresh buffer.
    pub(crate) fn take_buffer(&mut self) -> Vec<u8> {
        let mut buf = match std::mem::take(self) {
            Primitive::String(b) | Primitive::Octets(b) => b,
            _ => Vec::new(),
        };
        buf.clear();
        buf
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::new();
        crate::ser::write_primitive(&mut out, self);
        f.write_str(&String::from_utf8_lossy(&out))
    }
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        match value {
            Primitive::Nil => Value::Nil,
            Primitive::Bool(b) => Value::Bool(b),
            Primitive::Integer(i) => Value::Integer(i),
            Primitive::String(s) => Value::String(s),
            Primitive::Octets(o) => Value::Octets(o),
        }
    }
}

impl TryFrom<Value> for Primitive {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(Primitive::Nil),
            Value::Bool(b) => Ok(Primitive::Bool(b)),
            Value::Integer(i) => Ok(Primitive::Integer(i)),
            Value::String(s) => Ok(Primitive::String(s)),
            Value::Octets(o) => Ok(Primitive::Octets(o)),
            other => Err(Error::type_mismatch("primitive", other.kind())),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Integer(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Integer(value as i64)
    }
}

impl From<u32> for Primitive {
    fn from(value: u32) -> Self {
        Primitive::Integer(value as i64)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.as_bytes().to_vec())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value.into_bytes())
    }
}

impl From<&[u8]> for Primitive {
    fn from(value: &[u8]) -> Self {
        Primitive::Octets(value.to_vec())
    }
}

impl Serialize for Primitive {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Primitive::Nil => serializer.serialize_unit(),
            Primitive::Bool(b) => serializer.serialize_bool(*b),
            Primitive::Integer(i) => serializer.serialize_i64(*i),
            Primitive::String(s) => serialize_string(s, serializer),
            Primitive::Octets(o) => serializer.serialize_bytes(o),
        }
    }
}

impl<'de> Deserialize<'de> for Primitive {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Primitive::try_from(value).map_err(serde::de::Error::custom)
    }
}
