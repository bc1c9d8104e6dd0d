//! In-memory reference implementation of [`SessionStore`].
//!
//! Deterministic and test-friendly. Production deployments back sessions
//! with their own store; this one keeps everything in a locked map.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{SessionError, SessionResult};
use crate::store::SessionStore;

/// In-memory session store guarded by a read-write lock.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SessionError::Backend("session lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> SessionResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SessionError::Backend("session lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SessionError::Backend("session lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn take(&self, key: &str) -> SessionResult<Option<Value>> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SessionError::Backend("session lock poisoned".to_string()))?;
        Ok(entries.remove(key))
    }
}
