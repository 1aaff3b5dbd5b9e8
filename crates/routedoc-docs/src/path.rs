//! Translation of URL patterns into OpenAPI path templates.
//!
//! Placeholders are `:name` segments where `name` is one or more word
//! characters followed by `/` or the end of the string. Each is rewritten to
//! `{name}` in a single left-to-right pass.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{DocsError, DocsResult};

/// Marker that makes a URL pattern a wildcard route.
pub const WILDCARD: char = '*';

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r":(\w+)(/|$)").expect("valid regex"))
}

/// Translate `:name` placeholders into `{name}`.
///
/// ```rust
/// use routedoc_docs::translate_path;
///
/// assert_eq!(translate_path("/users/:id/orders/:orderId"), "/users/{id}/orders/{orderId}");
/// assert_eq!(translate_path("/files/:name.json"), "/files/:name.json");
/// ```
#[must_use]
pub fn translate_path(url: &str) -> String {
    placeholder().replace_all(url, "{$1}$2").into_owned()
}

/// Placeholder names in order of appearance.
#[must_use]
pub fn path_parameter_names(url: &str) -> Vec<&str> {
    placeholder()
        .captures_iter(url)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .collect()
}

/// Whether the URL pattern contains a wildcard.
#[must_use]
pub fn is_wildcard(url: &str) -> bool {
    url.contains(WILDCARD)
}

/// Check that a URL pattern can become an OpenAPI path.
///
/// # Errors
///
/// Returns `DocsError::InvalidPath` if the pattern does not start with `/`,
/// and `DocsError::DuplicatePathParameter` if a placeholder repeats.
pub fn validate_template(url: &str) -> DocsResult<()> {
    if !url.starts_with('/') {
        return Err(DocsError::invalid_path(url, "must start with '/'"));
    }

    let mut seen = HashSet::new();
    for name in path_parameter_names(url) {
        if !seen.insert(name) {
            return Err(DocsError::DuplicatePathParameter {
                url: url.to_string(),
                name: name.to_string(),
            });
        }
    }

    Ok(())
}
