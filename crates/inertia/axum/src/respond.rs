//! Response-side termination.

use axum::http::{header, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;

use inertia_response::{Rendered, ViewData};
use inertia_types::{Envelope, HEADER_INERTIA, HEADER_INERTIA_VALUE};

/// JSON termination of a protocol-aware navigation.
///
/// Emits the envelope with the headers the protocol requires:
/// `Vary: Accept` and `X-Inertia: true`.
#[derive(Debug, Clone)]
pub struct JsonEnvelope(pub Envelope);

impl IntoResponse for JsonEnvelope {
    fn into_response(self) -> Response {
        (
            [
                (header::VARY, HeaderValue::from_static("Accept")),
                (
                    HeaderName::from_static(HEADER_INERTIA),
                    HeaderValue::from_static(HEADER_INERTIA_VALUE),
                ),
            ],
            Json(self.0),
        )
            .into_response()
    }
}

/// Terminate a render outcome: JSON envelopes go out as-is, view data goes
/// through the caller's template closure.
pub fn respond<F>(rendered: Rendered, view: F) -> Response
where
    F: FnOnce(ViewData) -> Response,
{
    match rendered {
        Rendered::Json(envelope) => JsonEnvelope(envelope).into_response(),
        Rendered::View(data) => view(data),
    }
}
