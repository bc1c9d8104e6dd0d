//! Core types for the Inertia client-server protocol.
//!
//! An Inertia server answers every page navigation with the same value
//! object: a page envelope carrying the component name, its props, the
//! request URL, and an optional asset version. This crate defines that
//! envelope, the prop tree fed into it (including deferred props that are
//! only computed when a response actually needs them), and the component
//! identifier, together with the protocol header names every edge uses.

#![deny(unsafe_code)]

mod component;
mod envelope;
mod props;

pub use component::{Component, ComponentError, TemplateRef};
pub use envelope::{
    Envelope, HEADER_INERTIA, HEADER_INERTIA_VALUE, HEADER_PARTIAL_COMPONENT, HEADER_PARTIAL_DATA,
    VIEW_DATA_KEY,
};
pub use props::{DeferredProp, PropValue, Props};
