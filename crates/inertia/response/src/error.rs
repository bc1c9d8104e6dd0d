//! Response-building errors.

use inertia_types::ComponentError;
use thiserror::Error;

/// Errors from building a response. These are caller-contract violations;
/// the pipeline itself has no fallible steps.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Component(#[from] ComponentError),
}
