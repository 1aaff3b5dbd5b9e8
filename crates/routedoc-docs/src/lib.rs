//! # Routedoc Docs
//!
//! OpenAPI 3.0 document generation from captured routes.
//!
//! This crate provides:
//! - **Path translation** from `:name` placeholders to `{name}` templates
//! - **Schema normalization** of declarative and structured schemas
//! - **Operation building** with per-field failure containment
//! - **Document assembly** behind the [`OpenApiGenerator`] facade
//! - **Serving** of the document, a Swagger UI page and a route listing
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use routedoc_core::{HttpMethod, RouteDescriptor, RouteRegistry, RouteSchema};
//! use routedoc_docs::{DocsEndpoint, EndpointConfig, GeneratorConfig, OpenApiGenerator};
//! use serde_json::json;
//!
//! let registry = Arc::new(RouteRegistry::new());
//! registry.register(
//!     RouteDescriptor::new(HttpMethod::Get, "/widgets/:id").with_schema(RouteSchema::from_json(&json!({
//!         "params": { "properties": { "id": { "type": "number" } } }
//!     }))),
//! );
//!
//! let generator = OpenApiGenerator::new(registry, GeneratorConfig::new().title("Widgets"));
//! let document = generator.document();
//! assert!(document.operation("/widgets/{id}", HttpMethod::Get).is_some());
//!
//! let endpoint = DocsEndpoint::new(generator, EndpointConfig::default());
//! let response = endpoint.respond(&http::Method::GET, "/docs/json").unwrap();
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```

mod builder;
mod endpoint;
mod error;
mod generator;
mod normalize;
mod openapi;
mod path;
mod swagger;

pub use builder::{
    fallback_responses, is_status_key, status_description, status_key, BuildOutcome,
    OperationBuilder, SkipReason, DEFAULT_TAG,
};
pub use endpoint::{apply_cors, DocsEndpoint, EndpointConfig, ListedRoute, RouteListing};
pub use error::{DocsError, DocsResult, FieldError, GenerationFailure};
pub use generator::{
    DocumentAssembler, GenerationStats, GeneratorConfig, OpenApiGenerator,
    DEFAULT_INTERNAL_PREFIX, DEFAULT_ROUTE_PREFIX,
};
pub use normalize::{conversion_failed, SchemaNormalizer, CONVERSION_FAILED};
pub use openapi::{
    Components, Info, MediaType, OpenApi, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, Response, Server, JSON_MEDIA_TYPE, OPENAPI_VERSION,
};
pub use path::{is_wildcard, path_parameter_names, translate_path, validate_template, WILDCARD};
pub use swagger::{DocExpansion, SwaggerUi, DEFAULT_SWAGGER_VERSION};
