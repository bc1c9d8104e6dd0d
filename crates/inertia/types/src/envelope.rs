//! The page envelope and the protocol's header vocabulary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request header a protocol-aware client sends on every Inertia visit.
pub const HEADER_INERTIA: &str = "x-inertia";

/// Request header listing the prop keys a partial reload wants recomputed.
pub const HEADER_PARTIAL_DATA: &str = "x-inertia-partial-data";

/// Request header naming the component the client believes it is reloading.
pub const HEADER_PARTIAL_COMPONENT: &str = "x-inertia-partial-component";

/// Value of the `X-Inertia` response header on protocol responses.
pub const HEADER_INERTIA_VALUE: &str = "true";

/// Reserved view-data key the envelope is published under on full page loads.
pub const VIEW_DATA_KEY: &str = "inertia";

/// One rendered page, ready for client-side hydration.
///
/// On protocol navigations the envelope is the entire response body; on
/// first visits it is embedded in the host's view data under
/// [`VIEW_DATA_KEY`] so the document shell can bootstrap the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Logical identifier of the page component to render client-side.
    pub component: String,
    /// Fully resolved props the component hydrates with.
    pub props: Map<String, Value>,
    /// URL of the request that produced this envelope.
    pub url: String,
    /// Asset fingerprint; omitted entirely (not null) when unversioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Envelope {
    /// Wire form of the envelope as a JSON value.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "component".to_string(),
            Value::String(self.component.clone()),
        );
        object.insert("props".to_string(), Value::Object(self.props.clone()));
        object.insert("url".to_string(), Value::String(self.url.clone()));
        if let Some(version) = &self.version {
            object.insert("version".to_string(), Value::String(version.clone()));
        }
        Value::Object(object)
    }
}
