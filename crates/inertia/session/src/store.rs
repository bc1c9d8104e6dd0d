//! The session store abstraction.

use serde_json::Value;

use crate::error::SessionResult;

/// String-keyed value store backing one client session.
///
/// How a session is correlated with a client (cookie, token) and where its
/// data lives (cookie payload, database row, cache entry) is the host's
/// business; implementations only need these four primitives. The crate
/// ships [`crate::memory::InMemorySessionStore`] as the reference backend.
pub trait SessionStore: Send + Sync {
    /// Current value at `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> SessionResult<Option<Value>>;

    /// Unconditionally overwrite `key` with `value`.
    fn set(&self, key: &str, value: Value) -> SessionResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> SessionResult<()>;

    /// Read and delete `key` in one step. After `take` returns a value, no
    /// later operation on the same key may still observe it.
    fn take(&self, key: &str) -> SessionResult<Option<Value>>;
}
