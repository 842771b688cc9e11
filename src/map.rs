//! Map type for brass `{...}` values.
//!
//! This module provides [`BrassMap`], a wrapper around [`IndexMap`] keyed by
//! [`Primitive`]. The wire format attaches no meaning to entry order, but the
//! encoder has to write the entries in *some* order.
//!
//! ## Why IndexMap?
//!
//! - **Stable output**: entries are written in the order they were decoded or
//!   inserted, so re-encoding canonical input reproduces it byte for byte
//! - **Order-insensitive equality**: two maps with the same entries compare equal
//!   regardless of insertion order
//! - **Opt-in canonical order**: [`BrassMap::sort_keys`] (or
//!   [`EncodeOptions::with_sorted_keys`](crate::EncodeOptions::with_sorted_keys))
//!   gives output independent of how the map was built
//!
//! ## Examples
//!
//! ```rust
//! use serde_brass::{BrassMap, Primitive, Value};
//!
//! let mut map = BrassMap::new();
//! map.insert(Primitive::from("name"), Value::from("Alice"));
//! map.insert(Primitive::from("age"), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::{Primitive, Value};
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map from primitive keys to brass values.
///
/// Inserting an existing key replaces its value and keeps the entry's position.
///
/// # Examples
///
/// ```rust
/// use serde_brass::{BrassMap, Primitive, Value};
///
/// let mut map = BrassMap::new();
/// map.insert(Primitive::Integer(2), Value::Nil);
/// map.insert(Primitive::Integer(1), Value::Nil);
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec![Primitive::Integer(2), Primitive::Integer(1)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BrassMap(IndexMap<Primitive, Value>);

impl BrassMap {
    /// Creates an empty `BrassMap`.
    #[must_use]
    pub fn new() -> Self {
        BrassMap(IndexMap::new())
    }

    /// Creates an empty `BrassMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BrassMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_brass::{BrassMap, Primitive, Value};
    ///
    /// let mut map = BrassMap::new();
    /// assert!(map.insert(Primitive::from("key"), Value::from(42)).is_none());
    /// assert_eq!(
    ///     map.insert(Primitive::from("key"), Value::from(43)),
    ///     Some(Value::from(42))
    /// );
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: Primitive, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &Primitive) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a string key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.0.get(&Primitive::String(key.as_bytes().to_vec()))
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &Primitive) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Primitive) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reorders the entries by key (kind first, then payload).
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Primitive, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Primitive, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Primitive, Value> {
        self.0.iter()
    }
}

impl Default for BrassMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<Primitive, Value>> for BrassMap {
    fn from(map: HashMap<Primitive, Value>) -> Self {
        BrassMap(map.into_iter().collect())
    }
}

impl From<BrassMap> for HashMap<Primitive, Value> {
    fn from(map: BrassMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for BrassMap {
    type Item = (Primitive, Value);
    type IntoIter = indexmap::map::IntoIter<Primitive, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BrassMap {
    type Item = (&'a Primitive, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Primitive, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Primitive, Value)> for BrassMap {
    fn from_iter<T: IntoIterator<Item = (Primitive, Value)>>(iter: T) -> Self {
        BrassMap(IndexMap::from_iter(iter))
    }
}
