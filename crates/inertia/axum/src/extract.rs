//! Request-side extraction.

use std::convert::Infallible;
use std::ops::Deref;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use inertia_response::RequestSnapshot;
use inertia_types::{HEADER_INERTIA, HEADER_PARTIAL_COMPONENT, HEADER_PARTIAL_DATA};

/// Extractor capturing the request attributes the protocol consults.
///
/// Dereferences to [`RequestSnapshot`]; extraction never fails, so it can
/// sit in any handler signature without changing the error surface.
#[derive(Debug, Clone)]
pub struct InertiaRequest(pub RequestSnapshot);

impl InertiaRequest {
    pub fn into_inner(self) -> RequestSnapshot {
        self.0
    }
}

impl Deref for InertiaRequest {
    type Target = RequestSnapshot;

    fn deref(&self) -> &RequestSnapshot {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for InertiaRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut snapshot = RequestSnapshot::new(parts.method.as_str(), request_url(parts));
        // Presence with a non-empty value counts; an empty header does not.
        if header_str(parts, HEADER_INERTIA).is_some_and(|value| !value.is_empty()) {
            snapshot = snapshot.with_inertia(true);
        }
        if let Some(component) = header_str(parts, HEADER_PARTIAL_COMPONENT) {
            snapshot = snapshot.with_partial_component(component);
        }
        if let Some(keys) = header_str(parts, HEADER_PARTIAL_DATA) {
            snapshot = snapshot.with_partial_data(keys);
        }
        Ok(Self(snapshot))
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

/// URL of the request as the client sees it. The URI is used verbatim when
/// absolute; otherwise the authority comes from the `Host` header and the
/// scheme from `X-Forwarded-Proto`, falling back to the bare path.
fn request_url(parts: &Parts) -> String {
    let uri = &parts.uri;
    if uri.scheme().is_some() {
        return uri.to_string();
    }
    let path = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or("/");
    let host = uri
        .authority()
        .map(|authority| authority.as_str())
        .or_else(|| header_str(parts, "host"));
    match host {
        Some(host) => {
            let scheme = header_str(parts, "x-forwarded-proto").unwrap_or("http");
            format!("{}://{}{}", scheme, host, path)
        }
        None => path.to_string(),
    }
}
