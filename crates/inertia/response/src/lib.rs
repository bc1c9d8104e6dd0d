//! Response building for the Inertia client-server protocol.
//!
//! One [`ResponseBuilder::render`] call per request runs the whole
//! pipeline: resolve the component name, filter props for partial reloads,
//! resolve deferred props, stamp the asset version, merge shared props, and
//! negotiate between a raw JSON envelope and full-page view data. The
//! outcome is a [`Rendered`] value the host terminates however its
//! framework terminates responses.
//!
//! This crate is framework-agnostic; `inertia-axum` binds it to axum.

#![deny(unsafe_code)]

mod config;
mod error;
mod render;
mod request;
mod templates;

pub use config::{InertiaConfig, SharedProps, DEFAULT_FLASH_NAMESPACE};
pub use error::RenderError;
pub use render::{Rendered, ResponseBuilder, ViewData};
pub use request::RequestSnapshot;
pub use templates::assign_templates;
