//! Component identifiers.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from resolving a component identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComponentError {
    #[error("component name is empty")]
    EmptyName,
    #[error("template has no usable name: {0}")]
    UnnamedTemplate(String),
}

/// Reference to a server-side template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    path: PathBuf,
}

impl TemplateRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Template name: the file stem of the backing path.
    pub fn name(&self) -> Option<&str> {
        self.path.file_stem().and_then(|stem| stem.to_str())
    }
}

/// Identifier of the page component a render call targets.
///
/// Callers either name the component directly or hand over a host template
/// reference, in which case the component takes the template's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Plain component identifier, e.g. `guestbook/index`.
    Name(String),
    /// Host template whose name identifies the component.
    Template(TemplateRef),
}

impl Component {
    /// Canonical component name. An empty or nameless identifier is a
    /// caller error, not a silent fallback.
    pub fn resolve(&self) -> Result<String, ComponentError> {
        match self {
            Self::Name(name) if name.is_empty() => Err(ComponentError::EmptyName),
            Self::Name(name) => Ok(name.clone()),
            Self::Template(template) => match template.name() {
                Some(name) if !name.is_empty() => Ok(name.to_string()),
                _ => Err(ComponentError::UnnamedTemplate(
                    template.path().display().to_string(),
                )),
            },
        }
    }
}

impl From<&str> for Component {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Component {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<TemplateRef> for Component {
    fn from(template: TemplateRef) -> Self {
        Self::Template(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_resolve_to_themselves() {
        let component = Component::from("guestbook/index");
        assert_eq!(component.resolve().unwrap(), "guestbook/index");
    }

    #[test]
    fn empty_names_are_rejected() {
        let component = Component::from("");
        assert_eq!(component.resolve(), Err(ComponentError::EmptyName));
    }

    #[test]
    fn templates_resolve_to_their_file_stem() {
        let component = Component::from(TemplateRef::new("site/templates/about.html"));
        assert_eq!(component.resolve().unwrap(), "about");
    }

    #[test]
    fn extensionless_templates_keep_their_full_file_name() {
        let component = Component::from(TemplateRef::new("site/templates/about"));
        assert_eq!(component.resolve().unwrap(), "about");
    }

    #[test]
    fn nameless_template_paths_are_rejected() {
        let component = Component::from(TemplateRef::new(""));
        assert!(matches!(
            component.resolve(),
            Err(ComponentError::UnnamedTemplate(_))
        ));
    }
}
