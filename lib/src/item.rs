use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::Error;

/// A single candidate: the `key` is shown to the human and echoed back by the
/// finder, the `value` is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<V> {
    pub key: String,
    pub value: V,
}

impl<V> Item<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Ordered collection of [`Item`]s. Insertion order is the order the finder
/// displays them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Items<V> {
    inner: Vec<Item<V>>,
}

impl<V> Default for Items<V> {
    fn default() -> Self {
        Self { inner: Vec::new() }
    }
}

impl<V> Items<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: V) {
        self.inner.push(Item::new(key, value));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item<V>> {
        self.inner.iter()
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|item| item.key.as_str())
    }

    /// Every value whose key equals `key`, in insertion order.
    pub fn values_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a V> + 'a {
        self.inner
            .iter()
            .filter(move |item| item.key == key)
            .map(|item| &item.value)
    }
}

impl<V> FromIterator<Item<V>> for Items<V> {
    fn from_iter<T: IntoIterator<Item = Item<V>>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Items<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(key, value)| Item::new(key, value))
            .collect()
    }
}

impl<'a, V> IntoIterator for &'a Items<V> {
    type Item = &'a Item<V>;
    type IntoIter = std::slice::Iter<'a, Item<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What can be handed to [`Finder::select`](crate::Finder::select).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates<V> {
    /// Key/value pairs; selected keys are mapped back to their values.
    Keyed(Items<V>),
    /// Plain lines; selected lines are returned as-is.
    Bare(Vec<String>),
}

impl<V> Candidates<V> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(items) => items.len(),
            Self::Bare(lines) => lines.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> From<Items<V>> for Candidates<V> {
    fn from(items: Items<V>) -> Self {
        Self::Keyed(items)
    }
}

impl<V> From<Vec<String>> for Candidates<V> {
    fn from(lines: Vec<String>) -> Self {
        Self::Bare(lines)
    }
}

/// One element of a [`Finder::select`](crate::Finder::select) result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selected<V> {
    /// Value of a keyed item whose key was picked.
    Value(V),
    /// A picked bare line.
    Line(String),
}

impl<V> Selected<V> {
    #[must_use]
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Value(value) => Some(value),
            Self::Line(_) => None,
        }
    }

    #[must_use]
    pub fn into_line(self) -> Option<String> {
        match self {
            Self::Value(_) => None,
            Self::Line(line) => Some(line),
        }
    }
}

impl TryFrom<Value> for Candidates<Value> {
    type Error = Error;

    /// Accepts an array of strings, an array of `{"key", "value"}` objects, or
    /// an object whose property names are the keys.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(elements) if elements.iter().all(Value::is_string) => {
                let lines = elements
                    .into_iter()
                    .filter_map(|element| match element {
                        Value::String(line) => Some(line),
                        _ => None,
                    })
                    .collect();
                Ok(Self::Bare(lines))
            }
            Value::Array(elements) => {
                let items = elements
                    .into_iter()
                    .map(serde_json::from_value::<Item<Value>>)
                    .collect::<Result<Items<Value>, _>>()
                    .map_err(|error| Error::InvalidShape(error.to_string()))?;
                Ok(Self::Keyed(items))
            }
            Value::Object(map) => Ok(Self::Keyed(map.into_iter().collect())),
            other => Err(Error::InvalidShape(format!("expected array or object, got {other}"))),
        }
    }
}
