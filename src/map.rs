//! Ordered map type for cDIF objects.
//!
//! [`CdifMap`] wraps an [`IndexMap`] so object properties keep the order they
//! were written or inserted in. Parsing preserves source order, serialization
//! emits properties in map order, and an object spread that overwrites a key
//! leaves it at its first position.
//!
//! ```rust
//! use serde_cdif::{CdifMap, Value};
//!
//! let mut map = CdifMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of property names to values.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{CdifMap, Value};
///
/// let mut map = CdifMap::new();
/// map.insert("second".to_string(), Value::from(2));
/// map.insert("first".to_string(), Value::from(1));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["second", "first"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CdifMap(IndexMap<String, Value>);

impl CdifMap {
    #[must_use]
    pub fn new() -> Self {
        CdifMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        CdifMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    /// An existing key keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cdif::{CdifMap, Value};
    ///
    /// let mut map = CdifMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
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

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }
}

impl From<IndexMap<String, Value>> for CdifMap {
    fn from(map: IndexMap<String, Value>) -> Self {
        CdifMap(map)
    }
}

impl From<HashMap<String, Value>> for CdifMap {
    fn from(map: HashMap<String, Value>) -> Self {
        CdifMap(map.into_iter().collect())
    }
}

impl From<CdifMap> for IndexMap<String, Value> {
    fn from(map: CdifMap) -> Self {
        map.0
    }
}

impl IntoIterator for CdifMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CdifMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for CdifMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        CdifMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for CdifMap {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
