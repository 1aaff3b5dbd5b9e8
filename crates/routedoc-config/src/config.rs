//! Root configuration type.

use routedoc_docs::{EndpointConfig, GeneratorConfig, Info, Server, SwaggerUi};
use routedoc_telemetry::{LogConfig, MetricsConfig};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingSection, MetricsSection, OpenApiSection, ServerEntry, UiSection};

/// Complete Routedoc configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use routedoc_config::RoutedocConfig;
///
/// let config = RoutedocConfig::default();
/// let generator = config.generator_config();
///
/// assert_eq!(generator.info.title, "API Documentation");
/// assert_eq!(generator.route_prefix, "/docs");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RoutedocConfig {
    /// Document metadata and route filtering.
    #[serde(default)]
    pub openapi: OpenApiSection,

    /// Servers listed in the document.
    #[serde(default)]
    pub servers: Vec<ServerEntry>,

    /// Swagger UI and route listing.
    #[serde(default)]
    pub ui: UiSection,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Metrics.
    #[serde(default)]
    pub metrics: MetricsSection,
}

impl RoutedocConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - A prefix does not start with `/`
    /// - The title or version is empty
    /// - A server URL is empty
    /// - The log level is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, prefix) in [
            ("openapi.route_prefix", &self.openapi.route_prefix),
            ("openapi.internal_prefix", &self.openapi.internal_prefix),
        ] {
            if !prefix.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    field,
                    format!("must start with '/', got '{prefix}'"),
                ));
            }
        }

        if self.openapi.title.trim().is_empty() {
            return Err(ConfigError::invalid_value("openapi.title", "must not be empty"));
        }
        if self.openapi.version.trim().is_empty() {
            return Err(ConfigError::invalid_value("openapi.version", "must not be empty"));
        }

        if let Some(index) = self.servers.iter().position(|server| server.url.trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                format!("servers[{index}].url"),
                "must not be empty",
            ));
        }

        if self.logging.enabled && self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value("logging.level", "must not be empty"));
        }

        Ok(())
    }

    /// Development preset: pretty debug logs, no caching.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingSection {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: true,
                ..LoggingSection::default()
            },
            ..Self::default()
        }
    }

    /// Production preset: JSON logs, cached document, no route listing.
    #[must_use]
    pub fn production() -> Self {
        Self {
            openapi: OpenApiSection {
                cache: true,
                ..OpenApiSection::default()
            },
            ui: UiSection {
                listing_enabled: false,
                ..UiSection::default()
            },
            metrics: MetricsSection { enabled: true },
            ..Self::default()
        }
    }

    /// Generator settings.
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            info: Info {
                title: self.openapi.title.clone(),
                version: self.openapi.version.clone(),
                description: self.openapi.description.clone(),
            },
            servers: self
                .servers
                .iter()
                .map(|server| Server {
                    url: server.url.clone(),
                    description: server.description.clone(),
                })
                .collect(),
            route_prefix: self.openapi.route_prefix.clone(),
            internal_prefix: self.openapi.internal_prefix.clone(),
        }
    }

    /// Endpoint settings.
    #[must_use]
    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig {
            ui_enabled: self.ui.enabled,
            listing_enabled: self.ui.listing_enabled,
            cache: self.openapi.cache,
        }
    }

    /// Swagger UI page settings.
    #[must_use]
    pub fn swagger_ui(&self) -> SwaggerUi {
        SwaggerUi::new(self.openapi.route_prefix.clone(), &self.openapi.title)
            .deep_linking(self.ui.deep_linking)
            .doc_expansion(self.ui.doc_expansion)
            .swagger_version(self.ui.swagger_version.clone())
    }

    /// Logging settings.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.logging.enabled,
            level: self.logging.level.clone(),
            json_format: self.logging.format == LogFormat::Json,
            file_line_info: self.logging.include_location,
            include_target: true,
        }
    }

    /// Metrics settings.
    #[must_use]
    pub fn metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            enabled: self.metrics.enabled,
        }
    }
}
