//! Namespaced flash storage.
//!
//! Flash values live exactly across the redirect that follows a form
//! submission: a handler stashes validation errors or a status message,
//! the next render pulls them back out and they are gone.

use std::sync::Arc;

use serde_json::Value;

use crate::error::SessionResult;
use crate::store::SessionStore;

/// Default key prefix for flash data.
pub const DEFAULT_NAMESPACE: &str = "inertia";

/// Namespaced view over a session store.
///
/// Every key is stored as `{namespace}.{key}`, keeping flash data clear of
/// unrelated session entries. The wrapper holds no state of its own; two
/// stores with the same namespace over the same backend see the same data.
#[derive(Clone)]
pub struct FlashStore {
    store: Arc<dyn SessionStore>,
    namespace: String,
}

impl FlashStore {
    /// Wrap `store` under `namespace`. An empty namespace falls back to
    /// [`DEFAULT_NAMESPACE`] so keys never start with a bare `.`.
    pub fn new(store: Arc<dyn SessionStore>, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let namespace = if namespace.is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            namespace
        };
        Self { store, namespace }
    }

    /// Namespace this store prefixes keys with.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}.{}", self.namespace, key)
    }

    /// Unconditionally overwrite `key`.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> SessionResult<()> {
        self.store.set(&self.scoped(key), value.into())
    }

    /// Current value at `key`, left in place.
    pub fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        self.store.get(&self.scoped(key))
    }

    /// Read and delete `key` in one step.
    pub fn pull(&self, key: &str) -> SessionResult<Option<Value>> {
        self.store.take(&self.scoped(key))
    }

    /// Delete `key`; absent keys are ignored.
    pub fn remove(&self, key: &str) -> SessionResult<()> {
        self.store.remove(&self.scoped(key))
    }

    /// Accumulate `value` under `key` without the caller knowing whether a
    /// prior value exists or what shape it has.
    ///
    /// A stored sequence grows by one element, a stored single value is
    /// promoted to a two-element sequence, and anything else becomes a
    /// one-element sequence.
    pub fn append(&self, key: &str, value: impl Into<Value>) -> SessionResult<()> {
        let scoped = self.scoped(key);
        let value = value.into();
        let next = match self.store.get(&scoped)? {
            Some(Value::Array(mut items)) => {
                items.push(value);
                Value::Array(items)
            }
            Some(current) if !is_vacant(&current) => Value::Array(vec![current, value]),
            _ => Value::Array(vec![value]),
        };
        self.store.set(&scoped, next)
    }

    /// Merge `value` into `key`.
    ///
    /// Sequences concatenate and mappings union with the new entries
    /// winning. A scalar `value` degrades to [`FlashStore::append`], so a
    /// chain of redirects can mix single messages and batches under one
    /// key and always end up with a sequence.
    pub fn merge(&self, key: &str, value: impl Into<Value>) -> SessionResult<()> {
        let scoped = self.scoped(key);
        match value.into() {
            Value::Array(new_items) => {
                let merged = match self.store.get(&scoped)? {
                    Some(Value::Array(mut items)) => {
                        items.extend(new_items);
                        Value::Array(items)
                    }
                    Some(current) if !is_vacant(&current) => {
                        let mut items = Vec::with_capacity(new_items.len() + 1);
                        items.push(current);
                        items.extend(new_items);
                        Value::Array(items)
                    }
                    _ => Value::Array(new_items),
                };
                self.store.set(&scoped, merged)
            }
            Value::Object(new_entries) => match self.store.get(&scoped)? {
                Some(Value::Object(mut entries)) => {
                    entries.extend(new_entries);
                    self.store.set(&scoped, Value::Object(entries))
                }
                Some(current) if !is_vacant(&current) => {
                    self.append(key, Value::Object(new_entries))
                }
                _ => self.store.set(&scoped, Value::Object(new_entries)),
            },
            scalar => self.append(key, scalar),
        }
    }
}

/// Values `append` and `merge` treat as "nothing stored yet". Numbers and
/// booleans are always real values; `0` and `false` are kept.
fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
