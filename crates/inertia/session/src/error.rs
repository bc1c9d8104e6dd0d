//! Session error types.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by session stores.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("backend error: {0}")]
    Backend(String),
}
