//! The render pipeline.

use serde_json::{Map, Value};
use tracing::debug;

use inertia_types::{Component, Envelope, Props, VIEW_DATA_KEY};

use crate::config::InertiaConfig;
use crate::error::RenderError;
use crate::request::RequestSnapshot;

/// Builds protocol responses from page-render calls.
///
/// The builder is cheap to clone and carries only configuration; every
/// request-specific input arrives through the render call itself.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    config: InertiaConfig,
}

impl ResponseBuilder {
    pub fn new(config: InertiaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InertiaConfig {
        &self.config
    }

    /// Render `component` with `props` and no extra view data.
    pub fn render(
        &self,
        request: &RequestSnapshot,
        component: impl Into<Component>,
        props: Props,
    ) -> Result<Rendered, RenderError> {
        self.render_with_view(request, component, props, Map::new())
    }

    /// Render `component` with `props`, carrying `view_data` alongside the
    /// envelope on full page loads. Protocol navigations ignore the view
    /// data entirely.
    pub fn render_with_view(
        &self,
        request: &RequestSnapshot,
        component: impl Into<Component>,
        mut props: Props,
        view_data: Map<String, Value>,
    ) -> Result<Rendered, RenderError> {
        let component = component.into().resolve()?;

        // Partial reload: only when the client asked for specific keys and
        // is reloading the component it thinks it is.
        let partial_keys = request.partial_keys();
        if !partial_keys.is_empty() && request.partial_component() == Some(component.as_str()) {
            props.retain_keys(&partial_keys);
            debug!(
                component = %component,
                keys = partial_keys.len(),
                "partial reload filter applied"
            );
        }

        // Deferred producers run only now, after filtering, so props a
        // partial reload excluded are never computed.
        let mut resolved = props.resolve();

        if let Some(shared) = self.config.shared() {
            merge_shared(&mut resolved, shared.bag().resolve());
        }

        let envelope = Envelope {
            component,
            props: resolved,
            url: request.url().to_string(),
            version: self.config.version().map(str::to_string),
        };

        if request.is_read() && request.is_inertia() {
            debug!(component = %envelope.component, "responding with protocol envelope");
            Ok(Rendered::Json(envelope))
        } else {
            debug!(component = %envelope.component, "responding with full-page view data");
            Ok(Rendered::View(ViewData::new(envelope, view_data)))
        }
    }
}

/// Fill in shared values under keys the call props left unset. Explicit
/// call props always win.
fn merge_shared(props: &mut Map<String, Value>, shared: Map<String, Value>) {
    for (key, value) in shared {
        props.entry(key).or_insert(value);
    }
}

/// Outcome of one render call.
///
/// The call site terminates the response: `Json` goes out as the raw
/// protocol reply, `View` feeds the host's template layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Protocol-aware GET: emit the envelope as JSON and stop.
    Json(Envelope),
    /// Full page load: hand the view data to the template renderer.
    View(ViewData),
}

impl Rendered {
    /// Envelope carried by either outcome.
    pub fn envelope(&self) -> &Envelope {
        match self {
            Self::Json(envelope) => envelope,
            Self::View(view) => view.envelope(),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// View data for a full page load: the envelope under the reserved
/// `inertia` key plus any caller-supplied extras.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewData {
    envelope: Envelope,
    extra: Map<String, Value>,
}

impl ViewData {
    pub(crate) fn new(envelope: Envelope, mut extra: Map<String, Value>) -> Self {
        // The envelope key is reserved; a caller entry under it is dropped.
        extra.remove(VIEW_DATA_KEY);
        Self { envelope, extra }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Caller-supplied view data, without the reserved envelope entry.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Flat mapping handed to the template renderer:
    /// `{ "inertia": <envelope>, ...extra }`.
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(VIEW_DATA_KEY.to_string(), self.envelope.to_value());
        map.extend(self.extra);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SharedProps;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn plain_get() -> RequestSnapshot {
        RequestSnapshot::new("GET", "https://example.test/guestbook")
    }

    fn inertia_get() -> RequestSnapshot {
        plain_get().with_inertia(true)
    }

    fn builder() -> ResponseBuilder {
        ResponseBuilder::new(InertiaConfig::new())
    }

    #[test]
    fn protocol_get_yields_a_json_envelope() {
        let rendered = builder()
            .render(&inertia_get(), "guestbook/index", Props::new().with("n", 1_i64))
            .unwrap();
        let Rendered::Json(envelope) = rendered else {
            panic!("expected a JSON envelope");
        };
        assert_eq!(envelope.component, "guestbook/index");
        assert_eq!(envelope.props["n"], json!(1));
        assert_eq!(envelope.url, "https://example.test/guestbook");
        assert_eq!(envelope.version, None);
    }

    #[test]
    fn first_visit_yields_view_data() {
        let rendered = builder()
            .render(&plain_get(), "guestbook/index", Props::new())
            .unwrap();
        assert!(!rendered.is_json());
    }

    #[test]
    fn post_with_protocol_header_still_yields_view_data() {
        let request =
            RequestSnapshot::new("POST", "https://example.test/guestbook").with_inertia(true);
        let rendered = builder()
            .render(&request, "guestbook/index", Props::new())
            .unwrap();
        assert!(!rendered.is_json());
    }

    #[test]
    fn partial_reload_keeps_only_the_requested_keys() {
        let request = inertia_get()
            .with_partial_component("guestbook/index")
            .with_partial_data("entries,total");
        let props = Props::new()
            .with("entries", json!(["a"]))
            .with("total", 1_i64)
            .with("banner", "unrelated");
        let rendered = builder().render(&request, "guestbook/index", props).unwrap();
        let envelope = rendered.envelope();
        assert!(envelope.props.contains_key("entries"));
        assert!(envelope.props.contains_key("total"));
        assert!(!envelope.props.contains_key("banner"));
    }

    #[test]
    fn partial_reload_ignores_keys_with_no_matching_prop() {
        let request = inertia_get()
            .with_partial_component("guestbook/index")
            .with_partial_data("total,ghost");
        let props = Props::new().with("total", 1_i64).with("banner", "x");
        let rendered = builder().render(&request, "guestbook/index", props).unwrap();
        assert_eq!(rendered.envelope().props.len(), 1);
        assert!(rendered.envelope().props.contains_key("total"));
    }

    #[test]
    fn partial_reload_requires_a_matching_component() {
        let request = inertia_get()
            .with_partial_component("other/page")
            .with_partial_data("total");
        let props = Props::new().with("total", 1_i64).with("banner", "x");
        let rendered = builder().render(&request, "guestbook/index", props).unwrap();
        assert_eq!(rendered.envelope().props.len(), 2);
    }

    #[test]
    fn partial_reload_requires_a_component_header_at_all() {
        let request = inertia_get().with_partial_data("total");
        let props = Props::new().with("total", 1_i64).with("banner", "x");
        let rendered = builder().render(&request, "guestbook/index", props).unwrap();
        assert_eq!(rendered.envelope().props.len(), 2);
    }

    #[test]
    fn blank_partial_data_means_a_full_reload() {
        let request = inertia_get()
            .with_partial_component("guestbook/index")
            .with_partial_data(" , ");
        let props = Props::new().with("total", 1_i64).with("banner", "x");
        let rendered = builder().render(&request, "guestbook/index", props).unwrap();
        assert_eq!(rendered.envelope().props.len(), 2);
    }

    #[test]
    fn excluded_deferred_props_are_never_computed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let request = inertia_get()
            .with_partial_component("guestbook/index")
            .with_partial_data("total");
        let props = Props::new()
            .with("total", 1_i64)
            .with_deferred("expensive", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                json!("costly")
            });
        let rendered = builder().render(&request, "guestbook/index", props).unwrap();
        assert!(!rendered.envelope().props.contains_key("expensive"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn surviving_deferred_props_are_computed_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let props = Props::new().with_deferred("expensive", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            json!("costly")
        });
        let rendered = builder().render(&inertia_get(), "guestbook/index", props).unwrap();
        assert_eq!(rendered.envelope().props["expensive"], json!("costly"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn configured_version_is_stamped_on_every_envelope() {
        let builder = ResponseBuilder::new(InertiaConfig::new().with_version("3f2a"));
        let rendered = builder
            .render(&inertia_get(), "guestbook/index", Props::new())
            .unwrap();
        assert_eq!(rendered.envelope().version.as_deref(), Some("3f2a"));
    }

    #[test]
    fn shared_props_fill_in_missing_keys() {
        let builder = ResponseBuilder::new(
            InertiaConfig::new().with_shared(Props::new().with("app", "guestbook")),
        );
        let rendered = builder
            .render(&inertia_get(), "guestbook/index", Props::new().with("n", 1_i64))
            .unwrap();
        assert_eq!(rendered.envelope().props["app"], json!("guestbook"));
        assert_eq!(rendered.envelope().props["n"], json!(1));
    }

    #[test]
    fn explicit_call_props_beat_shared_props() {
        let builder = ResponseBuilder::new(
            InertiaConfig::new().with_shared(Props::new().with("user", "guest")),
        );
        let rendered = builder
            .render(
                &inertia_get(),
                "guestbook/index",
                Props::new().with("user", "alice"),
            )
            .unwrap();
        assert_eq!(rendered.envelope().props["user"], json!("alice"));
    }

    #[test]
    fn shared_producers_run_fresh_on_every_render() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let builder = ResponseBuilder::new(InertiaConfig::new().with_shared(
            SharedProps::producer(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Props::new().with("render_count", n as i64)
            }),
        ));
        let first = builder
            .render(&inertia_get(), "guestbook/index", Props::new())
            .unwrap();
        let second = builder
            .render(&inertia_get(), "guestbook/index", Props::new())
            .unwrap();
        assert_eq!(first.envelope().props["render_count"], json!(1));
        assert_eq!(second.envelope().props["render_count"], json!(2));
    }

    #[test]
    fn shared_deferred_leaves_are_resolved() {
        let builder = ResponseBuilder::new(InertiaConfig::new().with_shared(
            Props::new().with_deferred("now", || json!("later")),
        ));
        let rendered = builder
            .render(&inertia_get(), "guestbook/index", Props::new())
            .unwrap();
        assert_eq!(rendered.envelope().props["now"], json!("later"));
    }

    #[test]
    fn shared_props_survive_partial_reloads() {
        let builder = ResponseBuilder::new(
            InertiaConfig::new().with_shared(Props::new().with("app", "guestbook")),
        );
        let request = inertia_get()
            .with_partial_component("guestbook/index")
            .with_partial_data("total");
        let props = Props::new().with("total", 1_i64).with("banner", "x");
        let rendered = builder.render(&request, "guestbook/index", props).unwrap();
        assert_eq!(rendered.envelope().props["app"], json!("guestbook"));
        assert!(!rendered.envelope().props.contains_key("banner"));
    }

    #[test]
    fn view_data_nests_the_envelope_under_the_reserved_key() {
        let mut extra = Map::new();
        extra.insert("title".to_string(), json!("Guestbook"));
        let rendered = builder()
            .render_with_view(&plain_get(), "guestbook/index", Props::new(), extra)
            .unwrap();
        let Rendered::View(view) = rendered else {
            panic!("expected view data");
        };
        let map = view.into_map();
        assert_eq!(map["title"], json!("Guestbook"));
        assert_eq!(map["inertia"]["component"], json!("guestbook/index"));
    }

    #[test]
    fn caller_view_data_cannot_shadow_the_envelope() {
        let mut extra = Map::new();
        extra.insert("inertia".to_string(), json!("impostor"));
        let rendered = builder()
            .render_with_view(&plain_get(), "guestbook/index", Props::new(), extra)
            .unwrap();
        let Rendered::View(view) = rendered else {
            panic!("expected view data");
        };
        assert!(view.extra().is_empty());
        let map = view.into_map();
        assert_eq!(map["inertia"]["component"], json!("guestbook/index"));
    }

    #[test]
    fn empty_component_names_are_an_error() {
        let result = builder().render(&inertia_get(), "", Props::new());
        assert!(result.is_err());
    }
}
