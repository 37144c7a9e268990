//! Ordered map type for dotenv documents.
//!
//! This module provides [`EnvMap`], a wrapper around [`IndexMap`] keyed by
//! variable name. Iteration follows insertion order, so serializing a parsed
//! document emits keys in the order they first appeared in the source.
//!
//! ## Duplicate keys
//!
//! Assigning a key twice keeps one entry: the later value replaces the
//! earlier one in place, and the key keeps the position of its first
//! assignment.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::{parse, EnvMap};
//!
//! let map: EnvMap = parse("B=1\nA=2\nB=3").unwrap();
//! let pairs: Vec<(&str, &str)> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
//! assert_eq!(pairs, vec![("B", "3"), ("A", "2")]);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered map of variable names to values.
///
/// `V` is `String` for plain documents and [`crate::Entry`] for documents
/// with descriptions.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::EnvMap;
///
/// let mut map = EnvMap::new();
/// map.insert("FIRST".to_string(), "1".to_string());
/// map.insert("SECOND".to_string(), "2".to_string());
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["FIRST", "SECOND"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvMap<V = String>(IndexMap<String, V>);

impl<V> EnvMap<V> {
    /// Creates an empty `EnvMap`.
    #[must_use]
    pub fn new() -> Self {
        EnvMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        EnvMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotenv::EnvMap;
    ///
    /// let mut map = EnvMap::new();
    /// assert!(map.insert("KEY".to_string(), "1".to_string()).is_none());
    /// assert_eq!(map.insert("KEY".to_string(), "2".to_string()), Some("1".to_string()));
    /// ```
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<V> {
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

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }
}

impl<V> Default for EnvMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<HashMap<String, V>> for EnvMap<V> {
    fn from(map: HashMap<String, V>) -> Self {
        EnvMap(map.into_iter().collect())
    }
}

impl<V> From<EnvMap<V>> for HashMap<String, V> {
    fn from(map: EnvMap<V>) -> Self {
        map.0.into_iter().collect()
    }
}

impl<V> IntoIterator for EnvMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a EnvMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for EnvMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        EnvMap(IndexMap::from_iter(iter))
    }
}

impl<V> Extend<(String, V)> for EnvMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
