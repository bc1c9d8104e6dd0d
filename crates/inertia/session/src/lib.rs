//! Session-scoped flash storage for the Inertia adapter.
//!
//! A namespaced wrapper ([`FlashStore`]) over an external session store
//! ([`SessionStore`]) carries ephemeral data such as validation errors and
//! status messages across the redirect that follows a form submission. The
//! wrapper never touches keys outside its namespace, so flash data coexists
//! with whatever else the host keeps in the session.

#![deny(unsafe_code)]

mod error;
mod flash;
pub mod memory;
mod store;

pub use error::{SessionError, SessionResult};
pub use flash::{FlashStore, DEFAULT_NAMESPACE};
pub use memory::InMemorySessionStore;
pub use store::SessionStore;
