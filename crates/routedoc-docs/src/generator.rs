//! Document assembly and the generator facade.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use routedoc_core::{RouteRegistry, RouteSnapshot};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::builder::{BuildOutcome, OperationBuilder, SkipReason};
use crate::error::{DocsError, GenerationFailure};
use crate::openapi::{Components, Info, OpenApi, PathItem, Server, OPENAPI_VERSION};

/// Default prefix the documentation is served under.
pub const DEFAULT_ROUTE_PREFIX: &str = "/docs";

/// Default marker for internal routes.
pub const DEFAULT_INTERNAL_PREFIX: &str = "/__";

/// Generator settings, resolved once at construction.
///
/// # Example
///
/// ```rust
/// use routedoc_docs::GeneratorConfig;
///
/// let config = GeneratorConfig::new()
///     .title("Widgets")
///     .version("2.1.0")
///     .server("https://api.example.com", Some("Production".to_string()));
///
/// assert_eq!(config.info.title, "Widgets");
/// assert_eq!(config.route_prefix, "/docs");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// `info` block of the document.
    pub info: Info,
    /// `servers` list of the document.
    pub servers: Vec<Server>,
    /// Routes under this prefix are not documented.
    pub route_prefix: String,
    /// Routes under this prefix are internal and not documented.
    pub internal_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            info: Info::default(),
            servers: Vec::new(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            internal_prefix: DEFAULT_INTERNAL_PREFIX.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    /// Add a server.
    #[must_use]
    pub fn server(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.servers.push(Server {
            url: url.into(),
            description,
        });
        self
    }

    /// Set the documentation route prefix.
    #[must_use]
    pub fn route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = prefix.into();
        self
    }

    /// Set the internal route prefix.
    #[must_use]
    pub fn internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.internal_prefix = prefix.into();
        self
    }
}

/// Counts from one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Descriptors examined.
    pub processed: usize,
    /// Operations placed in the document.
    pub documented: usize,
    /// Descriptors left out.
    pub skipped: usize,
    /// Skips broken down by reason.
    pub skipped_by_reason: BTreeMap<SkipReason, usize>,
}

impl GenerationStats {
    /// Number of skips with the given reason.
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped_by_reason.get(&reason).copied().unwrap_or(0)
    }

    fn record_skip(&mut self, reason: SkipReason) {
        self.skipped += 1;
        *self.skipped_by_reason.entry(reason).or_insert(0) += 1;
    }
}

/// Merges built operations into one document.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    builder: OperationBuilder,
    info: Info,
    servers: Vec<Server>,
}

impl DocumentAssembler {
    /// Create an assembler for the given configuration.
    #[must_use]
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            builder: OperationBuilder::new(&config.route_prefix, &config.internal_prefix),
            info: config.info.clone(),
            servers: config.servers.clone(),
        }
    }

    /// Build a document from a snapshot, in snapshot order.
    ///
    /// When two routes yield the same path and method the later one wins.
    #[must_use]
    pub fn assemble(&self, snapshot: &RouteSnapshot) -> (OpenApi, GenerationStats) {
        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        let mut stats = GenerationStats::default();

        for descriptor in snapshot.iter() {
            stats.processed += 1;
            match self.builder.build(descriptor) {
                BuildOutcome::Built { path, operation } => {
                    let item = paths.entry(path).or_default();
                    if item.set(descriptor.method(), operation).is_some() {
                        warn!(
                            http.method = %descriptor.method(),
                            route.url = descriptor.url(),
                            "Operation replaces an earlier route with the same path"
                        );
                    } else {
                        stats.documented += 1;
                    }
                }
                BuildOutcome::Skipped(reason) => stats.record_skip(reason),
            }
        }

        let document = OpenApi {
            openapi: OPENAPI_VERSION.to_string(),
            info: self.info.clone(),
            servers: self.servers.clone(),
            paths,
            components: Components::default(),
        };
        (document, stats)
    }
}

/// Generates OpenAPI documents from a route registry.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use routedoc_core::{HttpMethod, RouteDescriptor, RouteRegistry, RouteSchema};
/// use routedoc_docs::{GeneratorConfig, OpenApiGenerator};
/// use serde_json::json;
///
/// let registry = Arc::new(RouteRegistry::new());
/// registry.register(
///     RouteDescriptor::new(HttpMethod::Get, "/users/:id")
///         .with_schema(RouteSchema::from_json(&json!({}))),
/// );
///
/// let generator = OpenApiGenerator::new(registry, GeneratorConfig::new());
/// let document = generator.generate().unwrap();
///
/// assert!(document["paths"]["/users/{id}"]["get"].is_object());
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    registry: Arc<RouteRegistry>,
    config: GeneratorConfig,
    assembler: DocumentAssembler,
}

impl OpenApiGenerator {
    /// Create a generator over a registry.
    #[must_use]
    pub fn new(registry: Arc<RouteRegistry>, config: GeneratorConfig) -> Self {
        let assembler = DocumentAssembler::new(&config);
        Self {
            registry,
            config,
            assembler,
        }
    }

    /// The registry this generator reads.
    #[must_use]
    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// The configuration this generator was built with.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the typed document from the current registry contents.
    #[must_use]
    pub fn document(&self) -> OpenApi {
        self.document_with_stats().0
    }

    /// Build the typed document along with generation counts.
    #[must_use]
    pub fn document_with_stats(&self) -> (OpenApi, GenerationStats) {
        let snapshot = self.registry.snapshot();
        let (document, stats) = self.assembler.assemble(&snapshot);

        debug!(
            registry.version = snapshot.version(),
            processed = stats.processed,
            documented = stats.documented,
            skipped = stats.skipped,
            "Generated OpenAPI document"
        );
        (document, stats)
    }

    /// Generate the document as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationFailure`] if the document cannot be rendered.
    pub fn generate(&self) -> Result<Value, GenerationFailure> {
        let document = self.document();
        let value = serde_json::to_value(&document).map_err(|err| failure(err.into()))?;
        routedoc_telemetry::metrics::record_document_generated();
        Ok(value)
    }

    /// Generate the document as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationFailure`] if the document cannot be rendered.
    pub fn generate_json(&self) -> Result<String, GenerationFailure> {
        let document = self.document();
        let json = serde_json::to_string(&document).map_err(|err| failure(err.into()))?;
        routedoc_telemetry::metrics::record_document_generated();
        Ok(json)
    }
}

fn failure(err: DocsError) -> GenerationFailure {
    error!(error = %err, "OpenAPI generation failed");
    routedoc_telemetry::metrics::record_generation_failure();
    GenerationFailure::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use routedoc_core::{HttpMethod, RouteDescriptor, RouteSchema};
    use serde_json::json;

    fn with_schema(method: HttpMethod, url: &str) -> RouteDescriptor {
        RouteDescriptor::new(method, url).with_schema(RouteSchema::default())
    }

    fn generator(routes: Vec<RouteDescriptor>) -> OpenApiGenerator {
        let registry = Arc::new(RouteRegistry::new());
        for route in routes {
            registry.register(route);
        }
        OpenApiGenerator::new(registry, GeneratorConfig::new())
    }

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.info.title, "API Documentation");
        assert_eq!(config.info.version, "1.0.0");
        assert!(config.info.description.is_none());
        assert!(config.servers.is_empty());
        assert_eq!(config.route_prefix, DEFAULT_ROUTE_PREFIX);
        assert_eq!(config.internal_prefix, DEFAULT_INTERNAL_PREFIX);
    }

    #[test]
    fn test_empty_registry_document() {
        let document = generator(Vec::new()).generate().unwrap();
        assert_eq!(
            document,
            json!({
                "openapi": "3.0.0",
                "info": { "title": "API Documentation", "version": "1.0.0" },
                "paths": {},
                "components": { "schemas": {} }
            })
        );
    }

    #[test]
    fn test_methods_accumulate_under_one_path() {
        let docs = generator(vec![
            with_schema(HttpMethod::Get, "/items/:id"),
            with_schema(HttpMethod::Put, "/items/:id"),
            with_schema(HttpMethod::Delete, "/items/:id"),
        ]);
        let document = docs.document();

        assert_eq!(document.paths.len(), 1);
        assert_eq!(document.paths["/items/{id}"].len(), 3);
    }

    #[test]
    fn test_stats_count_skips_by_reason() {
        let docs = generator(vec![
            with_schema(HttpMethod::Get, "/items"),
            with_schema(HttpMethod::Get, "/docs"),
            with_schema(HttpMethod::Get, "/files/*"),
            with_schema(HttpMethod::Get, "/__status"),
            RouteDescriptor::new(HttpMethod::Get, "/bare"),
            with_schema(HttpMethod::Get, "/a/:x/:x"),
        ]);
        let (document, stats) = docs.document_with_stats();

        assert_eq!(document.operation_count(), 1);
        assert_eq!(stats.processed, 6);
        assert_eq!(stats.documented, 1);
        assert_eq!(stats.skipped, 5);
        for reason in [
            SkipReason::DocumentationRoute,
            SkipReason::Wildcard,
            SkipReason::InternalRoute,
            SkipReason::NoSchema,
            SkipReason::ProcessingError,
        ] {
            assert_eq!(stats.skipped_for(reason), 1, "{reason}");
        }
    }

    #[test]
    fn test_later_route_replaces_same_path_and_method() {
        let docs = generator(vec![
            RouteDescriptor::new(HttpMethod::Get, "/a/:id")
                .with_schema(RouteSchema::new().summary("first")),
            RouteDescriptor::new(HttpMethod::Get, "/a/{id}")
                .with_schema(RouteSchema::new().summary("second")),
        ]);
        let (document, stats) = docs.document_with_stats();

        let operation = document.operation("/a/{id}", HttpMethod::Get).unwrap();
        assert_eq!(operation.summary, "second");
        assert_eq!(stats.documented, 1);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_info_and_servers_are_copied() {
        let registry = Arc::new(RouteRegistry::new());
        let config = GeneratorConfig::new()
            .title("Shop")
            .version("3.0.0")
            .description("Shop API")
            .server("https://shop.example.com", None);
        let document = OpenApiGenerator::new(registry, config).generate().unwrap();

        assert_eq!(document["info"]["title"], "Shop");
        assert_eq!(document["info"]["description"], "Shop API");
        assert_eq!(document["servers"][0]["url"], "https://shop.example.com");
    }

    #[test]
    fn test_generate_json_matches_generate() {
        let docs = generator(vec![with_schema(HttpMethod::Post, "/items")]);
        let parsed: Value = serde_json::from_str(&docs.generate_json().unwrap()).unwrap();
        assert_eq!(parsed, docs.generate().unwrap());
    }

    #[test]
    fn test_custom_prefixes() {
        let registry = Arc::new(RouteRegistry::new());
        registry.register(with_schema(HttpMethod::Get, "/docs"));
        registry.register(with_schema(HttpMethod::Get, "/api-docs/json"));
        registry.register(with_schema(HttpMethod::Get, "/_internal/ping"));

        let config = GeneratorConfig::new()
            .route_prefix("/api-docs")
            .internal_prefix("/_internal");
        let document = OpenApiGenerator::new(registry, config).document();

        assert!(document.paths.contains_key("/docs"));
        assert_eq!(document.paths.len(), 1);
    }
}
