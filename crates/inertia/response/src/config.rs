//! Adapter configuration.
//!
//! Everything the response builder needs is constructed once at startup
//! and passed in explicitly; there is no global option registry to consult
//! at render time.

use std::fmt;
use std::sync::Arc;

use inertia_types::Props;

/// Default session key prefix for flash data.
pub const DEFAULT_FLASH_NAMESPACE: &str = "inertia";

/// Props merged into every envelope.
#[derive(Clone)]
pub enum SharedProps {
    /// Fixed bag. Deferred leaves inside it are still resolved fresh on
    /// every render.
    Bag(Props),
    /// Producer invoked fresh on every render; it may read whatever state
    /// it captured at construction time.
    Producer(Arc<dyn Fn() -> Props + Send + Sync>),
}

impl SharedProps {
    /// Wrap a closure as a shared-props producer.
    pub fn producer<F>(producer: F) -> Self
    where
        F: Fn() -> Props + Send + Sync + 'static,
    {
        Self::Producer(Arc::new(producer))
    }

    /// Fresh bag for this render.
    pub(crate) fn bag(&self) -> Props {
        match self {
            Self::Bag(props) => props.clone(),
            Self::Producer(producer) => producer(),
        }
    }
}

impl From<Props> for SharedProps {
    fn from(props: Props) -> Self {
        Self::Bag(props)
    }
}

impl fmt::Debug for SharedProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bag(props) => f.debug_tuple("Bag").field(props).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Process-wide adapter options.
///
/// Defaults mean "feature off": no asset version stamped, no shared props
/// merged, flash data under the default namespace.
#[derive(Debug, Clone)]
pub struct InertiaConfig {
    version: Option<String>,
    shared: Option<SharedProps>,
    flash_namespace: String,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            version: None,
            shared: None,
            flash_namespace: DEFAULT_FLASH_NAMESPACE.to_string(),
        }
    }
}

impl InertiaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every envelope with an asset version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Merge `shared` into every envelope. Explicit render-call props win
    /// over shared entries with the same key.
    pub fn with_shared(mut self, shared: impl Into<SharedProps>) -> Self {
        self.shared = Some(shared.into());
        self
    }

    /// Session key prefix for flash data. An empty prefix is ignored in
    /// favor of the default.
    pub fn with_flash_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !namespace.is_empty() {
            self.flash_namespace = namespace;
        }
        self
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn shared(&self) -> Option<&SharedProps> {
        self.shared.as_ref()
    }

    pub fn flash_namespace(&self) -> &str {
        &self.flash_namespace
    }
}
