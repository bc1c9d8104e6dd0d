//! Axum bindings for the Inertia adapter.
//!
//! [`InertiaRequest`] captures the protocol headers on the way in;
//! [`JsonEnvelope`] and [`respond`] terminate the response on the way out.
//! Routing, templates, and session backing stay with the host application.

#![deny(unsafe_code)]

mod extract;
mod respond;

pub use extract::InertiaRequest;
pub use respond::{respond, JsonEnvelope};
