//! Prop trees with deferred leaves.
//!
//! Props travel through the render pipeline unresolved so that partial
//! reloads can drop expensive entries before any work happens. Resolution
//! walks the tree once, invoking every surviving deferred producer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Zero-argument producer for a prop value, invoked only if the prop
/// survives partial-reload filtering.
pub type DeferredProp = Arc<dyn Fn() -> Value + Send + Sync>;

/// One prop: materialized data, or a computation deferred until the
/// response is actually built.
#[derive(Clone)]
pub enum PropValue {
    /// Immediate JSON data.
    Value(Value),
    /// Lazily computed leaf.
    Deferred(DeferredProp),
    /// Nested mapping that may contain deferred leaves.
    Map(BTreeMap<String, PropValue>),
    /// Nested sequence that may contain deferred leaves.
    List(Vec<PropValue>),
}

impl PropValue {
    /// Wrap a closure as a deferred prop.
    pub fn deferred<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(producer))
    }

    /// Materialize this value, invoking every deferred leaf exactly once.
    pub fn resolve(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Deferred(producer) => producer(),
            Self::Map(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.resolve()))
                    .collect(),
            ),
            Self::List(items) => {
                Value::Array(items.into_iter().map(PropValue::resolve).collect())
            }
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<u64> for PropValue {
    fn from(value: u64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<Props> for PropValue {
    fn from(props: Props) -> Self {
        Self::Map(props.entries)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(items: Vec<PropValue>) -> Self {
        Self::List(items)
    }
}

/// Ordered property bag for one render call.
///
/// Keys are held in lexicographic order so envelopes serialize
/// deterministically regardless of insertion order.
#[derive(Clone, Debug, Default)]
pub struct Props {
    entries: BTreeMap<String, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated key overwrites the earlier value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Builder-style insert of a deferred producer.
    pub fn with_deferred<F>(mut self, key: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.entries.insert(key.into(), PropValue::deferred(producer));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keep only the listed top-level keys. Requested keys with no matching
    /// prop are ignored; dropped deferred props are never invoked.
    pub fn retain_keys(&mut self, keys: &[String]) {
        self.entries.retain(|key, _| keys.iter().any(|k| k == key));
    }

    /// Materialize the bag, invoking every surviving deferred producer
    /// exactly once.
    pub fn resolve(self) -> Map<String, Value> {
        self.entries
            .into_iter()
            .map(|(key, value)| (key, value.resolve()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: Into<PropValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<Map<String, Value>> for Props {
    fn from(object: Map<String, Value>) -> Self {
        Self {
            entries: object
                .into_iter()
                .map(|(key, value)| (key, PropValue::Value(value)))
                .collect(),
        }
    }
}
