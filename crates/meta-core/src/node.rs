//! Owned, order-preserving data tree.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::errors::TreeError;

/// The dynamic kind of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Array,
    Map,
    Text,
    Integer,
    Boolean,
    Null,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Array => "array",
            Self::Map => "map",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        };
        f.write_str(s)
    }
}

/// A single value in the metadata tree.
///
/// Every node exclusively owns its children, so a tree has no sharing and no
/// cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Array(Vec<Node>),
    Map(Map),
    Text(String),
    Integer(i64),
    Boolean(bool),
    /// Marks a `NULL` list terminator that is dropped before emission.
    Null,
}

impl Node {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    #[must_use]
    pub const fn int(n: i64) -> Self {
        Self::Integer(n)
    }

    #[must_use]
    pub const fn bool(b: bool) -> Self {
        Self::Boolean(b)
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    #[must_use]
    pub const fn array() -> Self {
        Self::Array(Vec::new())
    }

    #[must_use]
    pub fn map() -> Self {
        Self::Map(Map::new())
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Array(_) => NodeKind::Array,
            Self::Map(_) => NodeKind::Map,
            Self::Text(_) => NodeKind::Text,
            Self::Integer(_) => NodeKind::Integer,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Null => NodeKind::Null,
        }
    }

    /// True for arrays and maps without children. Scalars, including empty
    /// text, are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Array(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Insert `value` under `key`.
    ///
    /// # Errors
    /// Returns [`TreeError::NotAMap`] if `self` is not a map, or
    /// [`TreeError::EmptyKey`] for an empty key.
    pub fn map_insert(&mut self, key: impl Into<String>, value: Node) -> Result<(), TreeError> {
        match self {
            Self::Map(map) => map.insert(key, value).map(|_| ()),
            other => Err(TreeError::NotAMap { found: other.kind() }),
        }
    }

    /// Remove the entry for `key`. Returns `false` if absent or not a map.
    pub fn map_remove(&mut self, key: &str) -> bool {
        match self {
            Self::Map(map) => map.remove(key).is_some(),
            _ => false,
        }
    }

    /// Append `value` to an array node.
    ///
    /// # Errors
    /// Returns [`TreeError::NotAnArray`] if `self` is not an array.
    pub fn array_push(&mut self, value: Node) -> Result<(), TreeError> {
        match self {
            Self::Array(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(TreeError::NotAnArray { found: other.kind() }),
        }
    }

    #[must_use]
    pub fn array_len(&self) -> Option<usize> {
        self.as_array().map(<[Node]>::len)
    }

    #[must_use]
    pub fn array_last(&self) -> Option<&Node> {
        self.as_array().and_then(<[Node]>::last)
    }

    /// Drop the last array element, returning it.
    pub fn array_remove_last(&mut self) -> Option<Node> {
        match self {
            Self::Array(items) => items.pop(),
            _ => None,
        }
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Array(items)
    }
}

/// Ordered map of unique, non-empty text keys to owned nodes.
///
/// Lookups scan in insertion order and return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map {
    entries: Vec<(String, Node)>,
}

impl Map {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `value` under `key`.
    ///
    /// A new key is appended. An existing key keeps its position and gets the
    /// new value; the previous value is returned.
    ///
    /// # Errors
    /// Returns [`TreeError::EmptyKey`] if `key` is empty.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> Result<Option<Node>, TreeError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TreeError::EmptyKey);
        }
        if let Some(slot) = self.get_mut(&key) {
            return Ok(Some(std::mem::replace(slot, value)));
        }
        self.entries.push((key, value));
        Ok(None)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove the entry for `key`, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => map.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}
