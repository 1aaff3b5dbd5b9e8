//! Wiring of one registry, one generator and one endpoint from configuration.

use std::sync::Arc;

use bytes::Bytes;
use http::{Request, Response};
use routedoc_config::{ConfigError, ConfigLoader, RoutedocConfig, DEFAULT_ENV_PREFIX};
use routedoc_core::{RouteDescriptor, RouteOptions, RouteRegistry};
use routedoc_docs::{DocsEndpoint, GenerationFailure, OpenApiGenerator};
use routedoc_telemetry::TelemetryError;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Configuration file read by [`Routedoc::load`] when present.
pub const DEFAULT_CONFIG_FILE: &str = "routedoc.toml";

/// Errors raised while setting up Routedoc.
#[derive(Debug, Error)]
pub enum RoutedocError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging or metrics could not be initialized.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Initialize logging and metrics as configured.
///
/// # Errors
///
/// Returns `RoutedocError::Telemetry` if a global subscriber or recorder is
/// already installed.
pub fn init_telemetry(config: &RoutedocConfig) -> Result<(), RoutedocError> {
    routedoc_telemetry::init_logging(&config.log_config())?;
    routedoc_telemetry::init_metrics(&config.metrics_config())?;
    Ok(())
}

/// One route registry with its generator and documentation endpoint.
///
/// Hosts feed route registrations in and serve the endpoint's responses.
#[derive(Debug)]
pub struct Routedoc {
    registry: Arc<RouteRegistry>,
    endpoint: DocsEndpoint,
}

impl Routedoc {
    /// Build from a configuration. The configuration is read once.
    #[must_use]
    pub fn new(config: &RoutedocConfig) -> Self {
        let registry = Arc::new(RouteRegistry::new());
        let generator = OpenApiGenerator::new(Arc::clone(&registry), config.generator_config());
        let endpoint = DocsEndpoint::new(generator, config.endpoint_config())
            .with_swagger(&config.swagger_ui());

        info!(
            route.path = %config.openapi.route_prefix,
            ui = config.ui.enabled,
            cache = config.openapi.cache,
            "Documentation endpoint configured"
        );

        Self { registry, endpoint }
    }

    /// Load configuration from `routedoc.toml` (if present), `.env` and
    /// `ROUTEDOC__*` variables, then build.
    ///
    /// # Errors
    ///
    /// Returns `RoutedocError::Config` if loading or validation fails.
    pub fn load() -> Result<Self, RoutedocError> {
        let config = ConfigLoader::new()
            .with_optional_file(DEFAULT_CONFIG_FILE)?
            .with_dotenv()?
            .with_env_prefix(DEFAULT_ENV_PREFIX)
            .load()?;
        Ok(Self::new(&config))
    }

    /// The route registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// The document generator.
    #[must_use]
    pub fn generator(&self) -> &OpenApiGenerator {
        self.endpoint.generator()
    }

    /// The documentation endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &DocsEndpoint {
        &self.endpoint
    }

    /// Feed a route registration event from the host.
    pub fn on_route(&self, options: RouteOptions) {
        self.registry.on_route(options);
    }

    /// Register one route descriptor.
    pub fn register(&self, descriptor: RouteDescriptor) {
        self.registry.register(descriptor);
    }

    /// Generate the document from the current registry.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationFailure`] if the document cannot be rendered.
    pub fn generate(&self) -> Result<Value, GenerationFailure> {
        self.generator().generate()
    }

    /// Answer a documentation request, or `None` if the host should route it.
    pub fn handle<B>(&self, request: &Request<B>) -> Option<Response<Bytes>> {
        self.endpoint.handle(request)
    }
}
