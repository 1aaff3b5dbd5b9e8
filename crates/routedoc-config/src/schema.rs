//! Configuration section types.

use routedoc_docs::{DocExpansion, DEFAULT_INTERNAL_PREFIX, DEFAULT_ROUTE_PREFIX, DEFAULT_SWAGGER_VERSION};
use serde::{Deserialize, Serialize};

/// Document metadata and route filtering.
///
/// # Example
///
/// ```
/// use routedoc_config::OpenApiSection;
///
/// let section = OpenApiSection::default();
/// assert_eq!(section.title, "API Documentation");
/// assert_eq!(section.route_prefix, "/docs");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OpenApiSection {
    /// API title.
    #[serde(default = "default_title")]
    pub title: String,

    /// API version.
    #[serde(default = "default_version")]
    pub version: String,

    /// API description.
    #[serde(default)]
    pub description: Option<String>,

    /// Prefix the documentation is served under. Routes below it are not documented.
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Prefix of internal routes, which are not documented.
    #[serde(default = "default_internal_prefix")]
    pub internal_prefix: String,

    /// Reuse the rendered document until the registry changes.
    #[serde(default)]
    pub cache: bool,
}

impl Default for OpenApiSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            route_prefix: default_route_prefix(),
            internal_prefix: default_internal_prefix(),
            cache: false,
        }
    }
}

fn default_title() -> String {
    "API Documentation".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_route_prefix() -> String {
    DEFAULT_ROUTE_PREFIX.to_string()
}

fn default_internal_prefix() -> String {
    DEFAULT_INTERNAL_PREFIX.to_string()
}

/// One entry of the document's `servers` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerEntry {
    /// Server URL.
    pub url: String,

    /// Server description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Swagger UI and route listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UiSection {
    /// Serve the Swagger UI page.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Serve the route listing.
    #[serde(default = "default_true")]
    pub listing_enabled: bool,

    /// Update the URL as operations are expanded.
    #[serde(default = "default_true")]
    pub deep_linking: bool,

    /// Initial expansion of operations.
    #[serde(default)]
    pub doc_expansion: DocExpansion,

    /// Swagger UI release loaded from the CDN.
    #[serde(default = "default_swagger_version")]
    pub swagger_version: String,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            enabled: true,
            listing_enabled: true,
            deep_linking: true,
            doc_expansion: DocExpansion::default(),
            swagger_version: default_swagger_version(),
        }
    }
}

fn default_swagger_version() -> String {
    DEFAULT_SWAGGER_VERSION.to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Install the Prometheus recorder.
    #[serde(default)]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}
