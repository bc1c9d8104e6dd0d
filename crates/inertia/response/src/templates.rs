//! Controller-to-template assignment.

use std::collections::{BTreeMap, HashSet};

/// Map every controller with no identically-named template to `fallback`.
///
/// Hosts that drive pages purely from controllers render them all through
/// one application-shell template; this computes the fill-in assignments at
/// registration time. Controllers that already have their own template are
/// left alone.
pub fn assign_templates(
    controllers: &[String],
    templates: &[String],
    fallback: &str,
) -> BTreeMap<String, String> {
    let known: HashSet<&str> = templates.iter().map(String::as_str).collect();
    controllers
        .iter()
        .filter(|controller| !known.contains(controller.as_str()))
        .map(|controller| (controller.clone(), fallback.to_string()))
        .collect()
}
