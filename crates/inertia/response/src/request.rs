//! Read-only view of the inbound request attributes the protocol consults.

/// Attributes of one inbound request, captured at the host boundary.
///
/// The framework edge fills this in from the real request; the response
/// builder never sees the request itself.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    method: String,
    url: String,
    inertia: bool,
    partial_component: Option<String>,
    partial_data: Option<String>,
}

impl RequestSnapshot {
    /// Capture a request. `method` is canonicalized to uppercase; `url`
    /// should be the full URL of the request as the client sees it.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            url: url.into(),
            inertia: false,
            partial_component: None,
            partial_data: None,
        }
    }

    /// Mark the request as sent by a protocol-aware client (`X-Inertia`).
    pub fn with_inertia(mut self, inertia: bool) -> Self {
        self.inertia = inertia;
        self
    }

    /// Component name from `X-Inertia-Partial-Component`.
    pub fn with_partial_component(mut self, component: impl Into<String>) -> Self {
        self.partial_component = Some(component.into());
        self
    }

    /// Raw comma-separated key list from `X-Inertia-Partial-Data`.
    pub fn with_partial_data(mut self, keys: impl Into<String>) -> Self {
        self.partial_data = Some(keys.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the client signalled protocol awareness.
    pub fn is_inertia(&self) -> bool {
        self.inertia
    }

    /// Whether mode negotiation treats this request as a read. Only GET
    /// qualifies; HEAD and everything else renders full view data.
    pub fn is_read(&self) -> bool {
        self.method == "GET"
    }

    pub fn partial_component(&self) -> Option<&str> {
        self.partial_component.as_deref()
    }

    /// Prop keys a partial reload asks for: comma-split, trimmed, empty
    /// entries dropped. An absent header yields an empty list.
    pub fn partial_keys(&self) -> Vec<String> {
        self.partial_data
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_are_canonicalized_to_uppercase() {
        let request = RequestSnapshot::new("get", "/");
        assert_eq!(request.method(), "GET");
        assert!(request.is_read());
    }

    #[test]
    fn only_get_counts_as_a_read() {
        for method in ["POST", "PUT", "PATCH", "DELETE", "HEAD"] {
            assert!(!RequestSnapshot::new(method, "/").is_read());
        }
    }

    #[test]
    fn partial_keys_are_split_and_trimmed() {
        let request = RequestSnapshot::new("GET", "/").with_partial_data(" a, b ,, c,");
        assert_eq!(request.partial_keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn absent_partial_data_yields_no_keys() {
        let request = RequestSnapshot::new("GET", "/");
        assert!(request.partial_keys().is_empty());
    }

    #[test]
    fn blank_partial_data_yields_no_keys() {
        let request = RequestSnapshot::new("GET", "/").with_partial_data("  ,  ");
        assert!(request.partial_keys().is_empty());
    }
}
