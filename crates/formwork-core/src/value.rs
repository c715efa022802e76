//! The dynamic [`Value`] algebra shared by leaf fields and aggregates.
//!
//! Leaf fields hold scalar-ish values (`Text`, `Number`, `Flag`), while
//! composite groups derive `Group` mappings keyed by registry key and
//! array groups derive ordered `List`s. `Unset` is the canonical
//! "no value" state: it is what a cleared field holds, and it is the
//! only variant that serializes to something other than itself.

use indexmap::IndexMap;

/// A dynamically typed form value.
///
/// The same type covers leaf values and derived aggregates: a composite
/// node's value is a [`Value::Group`] whose entries are its members'
/// values, recursively. Key order in a `Group` is insertion order, which
/// for aggregates means registry order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value. A cleared or never-filled field.
    Unset,
    /// A text value, possibly empty.
    Text(String),
    /// A numeric value. `Number(0.0)` is a real value, not "empty".
    Number(f64),
    /// A boolean value (checkbox-like). `Flag(false)` is not "empty".
    Flag(bool),
    /// An ordered sequence, e.g. an array group's member values.
    List(Vec<Value>),
    /// An ordered key-value mapping, e.g. a composite's aggregate value.
    Group(IndexMap<String, Value>),
}

impl Value {
    /// Build a [`Value::Group`] from key/value pairs, preserving order.
    pub fn group<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Group(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a [`Value::List`] from an iterator of values.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Whether this value counts as "empty" for prefill detection.
    ///
    /// `Unset`, the empty string, and zero-length lists/groups are empty.
    /// `Number` and `Flag` are never empty: `0` and `false` are values.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unset => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) | Self::Flag(_) => false,
            Self::List(items) => items.is_empty(),
            Self::Group(entries) => entries.is_empty(),
        }
    }

    /// The default leaf serialization of this value.
    ///
    /// `Unset` serializes to the empty string; everything else passes
    /// through unchanged. Composite serialization (disabled exclusion,
    /// recursion) is the aggregator's job, not this method's.
    pub fn serialized(&self) -> Value {
        match self {
            Self::Unset => Self::Text(String::new()),
            other => other.clone(),
        }
    }

    /// Borrow the entries if this is a [`Value::Group`].
    pub fn as_group(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Group(entries) => Some(entries),
            _ => None,
        }
    }

    /// Borrow the items if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the string if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key if this is a [`Value::Group`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_group().and_then(|entries| entries.get(key))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Unset
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}
