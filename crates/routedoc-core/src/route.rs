//! Route descriptors and the registration feed.

use std::fmt;

use tracing::trace;

use crate::method::HttpMethod;
use crate::schema::RouteSchema;

/// Identity of a route in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    /// HTTP method.
    pub method: HttpMethod,
    /// URL pattern exactly as registered.
    pub url: String,
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// One captured (method, URL pattern) registration.
///
/// The URL pattern uses `:name` placeholders for path parameters and may
/// contain a `*` wildcard. Descriptors are immutable once created.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    method: HttpMethod,
    url: String,
    schema: Option<RouteSchema>,
    tags: Vec<String>,
}

impl RouteDescriptor {
    /// Create a descriptor without a schema bundle.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            schema: None,
            tags: Vec::new(),
        }
    }

    /// Attach a schema bundle. Tags declared in the bundle become the route's
    /// tags; a bundle without tags keeps the ones already set.
    #[must_use]
    pub fn with_schema(mut self, schema: RouteSchema) -> Self {
        if !schema.tags.is_empty() {
            self.tags = schema.tags.clone();
        }
        self.schema = Some(schema);
        self
    }

    /// Replace the route's tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// URL pattern as registered.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Schema bundle, if the route declared one.
    #[must_use]
    pub fn schema(&self) -> Option<&RouteSchema> {
        self.schema.as_ref()
    }

    /// Tags, empty when none were declared.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Registry key of this descriptor.
    #[must_use]
    pub fn key(&self) -> RouteKey {
        RouteKey {
            method: self.method,
            url: self.url.clone(),
        }
    }
}

/// A route registration event as emitted by the host.
///
/// The host may register a single method or a list of method aliases. Only
/// methods in [`HttpMethod::ALL`] produce descriptors.
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// Method names as supplied by the host.
    pub methods: Vec<String>,
    /// URL pattern.
    pub url: String,
    /// Optional schema bundle.
    pub schema: Option<RouteSchema>,
}

impl RouteOptions {
    /// Create a registration event for one or more methods.
    pub fn new<I, S>(methods: I, url: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            url: url.into(),
            schema: None,
        }
    }

    /// Create a registration event for a single method.
    pub fn single(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new([method.into()], url)
    }

    /// Attach a schema bundle.
    #[must_use]
    pub fn schema(mut self, schema: RouteSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Expand the event into one descriptor per documented method.
    #[must_use]
    pub fn into_descriptors(self) -> Vec<RouteDescriptor> {
        let mut seen: Vec<HttpMethod> = Vec::with_capacity(self.methods.len());
        for name in &self.methods {
            match name.parse::<HttpMethod>() {
                Ok(method) if !seen.contains(&method) => seen.push(method),
                Ok(_) => {}
                Err(err) => trace!(url = %self.url, error = %err, "Ignoring method"),
            }
        }

        seen.into_iter()
            .map(|method| {
                let descriptor = RouteDescriptor::new(method, self.url.clone());
                match &self.schema {
                    Some(schema) => descriptor.with_schema(schema.clone()),
                    None => descriptor,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_defaults() {
        let descriptor = RouteDescriptor::new(HttpMethod::Get, "/health");
        assert_eq!(descriptor.method(), HttpMethod::Get);
        assert_eq!(descriptor.url(), "/health");
        assert!(descriptor.schema().is_none());
        assert!(descriptor.tags().is_empty());
    }

    #[test]
    fn test_schema_tags_become_descriptor_tags() {
        let descriptor = RouteDescriptor::new(HttpMethod::Post, "/users")
            .with_schema(RouteSchema::new().tag("users").tag("admin"));
        assert_eq!(descriptor.tags(), ["users", "admin"]);
    }

    #[test]
    fn test_untagged_schema_keeps_explicit_tags() {
        let descriptor = RouteDescriptor::new(HttpMethod::Get, "/items")
            .with_tags(["items"])
            .with_schema(RouteSchema::new());
        assert_eq!(descriptor.tags(), ["items"]);

        let descriptor = RouteDescriptor::new(HttpMethod::Get, "/items")
            .with_schema(RouteSchema::new())
            .with_tags(["items"]);
        assert_eq!(descriptor.tags(), ["items"]);
    }

    #[test]
    fn test_key_display() {
        let key = RouteDescriptor::new(HttpMethod::Delete, "/users/:id").key();
        assert_eq!(key.to_string(), "DELETE /users/:id");
    }

    #[test]
    fn test_options_filter_unknown_methods() {
        let descriptors = RouteOptions::new(["GET", "HEAD", "post", "get"], "/items")
            .schema(RouteSchema::from_json(&json!({ "tags": ["items"] })))
            .into_descriptors();

        let methods: Vec<_> = descriptors.iter().map(RouteDescriptor::method).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
        assert!(descriptors.iter().all(|d| d.tags() == ["items"]));
    }

    #[test]
    fn test_options_only_unknown_methods() {
        let descriptors = RouteOptions::single("TRACE", "/debug").into_descriptors();
        assert!(descriptors.is_empty());
    }
}
