//! Format-neutral document tree shared by conversion and validation

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// Leaf value of a canonical tree
#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    pub fn string(value: impl Into<String>) -> Self {
        Scalar::String(value.into())
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Number(a), Scalar::Number(b)) => numbers_equal(a, b),
            // Strings and numbers never unify, even when they print alike
            _ => false,
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// String-keyed mapping that remembers insertion order.
///
/// Order is kept for serialization only; equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, CanonicalDocument>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert or replace the value under `key`, keeping the original position
    /// when the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: CanonicalDocument) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalDocument> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CanonicalDocument> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalDocument)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| value == theirs))
    }
}

impl IntoIterator for Mapping {
    type Item = (String, CanonicalDocument);
    type IntoIter = indexmap::map::IntoIter<String, CanonicalDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, CanonicalDocument)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, CanonicalDocument)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut mapping = Mapping::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// Canonical in-memory tree produced by every structural parser.
///
/// Equality is structural: mappings compare by key set and per-key value,
/// sequences compare pairwise in order, and scalars compare by type and value.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalDocument {
    Scalar(Scalar),
    Sequence(Vec<CanonicalDocument>),
    Mapping(Mapping),
}

impl CanonicalDocument {
    pub fn null() -> Self {
        CanonicalDocument::Scalar(Scalar::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        CanonicalDocument::Scalar(Scalar::string(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalDocument::Scalar(Scalar::Null))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            CanonicalDocument::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Number of structural nodes directly under the root
    pub fn top_level_nodes(&self) -> usize {
        match self {
            CanonicalDocument::Mapping(mapping) => mapping.len(),
            CanonicalDocument::Sequence(items) => items.len(),
            CanonicalDocument::Scalar(_) => 1,
        }
    }

    /// Render the tree as a JSON value, preserving mapping order
    pub fn to_json_value(&self) -> Value {
        match self {
            CanonicalDocument::Scalar(scalar) => match scalar {
                Scalar::Null => Value::Null,
                Scalar::Bool(b) => Value::Bool(*b),
                Scalar::Number(n) => Value::Number(n.clone()),
                Scalar::String(s) => Value::String(s.clone()),
            },
            CanonicalDocument::Sequence(items) => {
                Value::Array(items.iter().map(CanonicalDocument::to_json_value).collect())
            }
            CanonicalDocument::Mapping(mapping) => {
                let mut object = Map::with_capacity(mapping.len());
                for (key, value) in mapping.iter() {
                    object.insert(key.to_string(), value.to_json_value());
                }
                Value::Object(object)
            }
        }
    }
}

impl From<Value> for CanonicalDocument {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CanonicalDocument::Scalar(Scalar::Null),
            Value::Bool(b) => CanonicalDocument::Scalar(Scalar::Bool(b)),
            Value::Number(n) => CanonicalDocument::Scalar(Scalar::Number(n)),
            Value::String(s) => CanonicalDocument::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                CanonicalDocument::Sequence(items.into_iter().map(CanonicalDocument::from).collect())
            }
            Value::Object(object) => CanonicalDocument::Mapping(
                object
                    .into_iter()
                    .map(|(k, v)| (k, CanonicalDocument::from(v)))
                    .collect(),
            ),
        }
    }
}
