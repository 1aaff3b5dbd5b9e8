//! # Routedoc
//!
//! **Route registry and OpenAPI 3.0 document generator**
//!
//! Routedoc watches the routes a host server registers, keeps them in a
//! registry and compiles them, with their validation schemas, into one
//! OpenAPI 3.0 document:
//!
//! - **Registry** – deduplicated, ordered capture of (method, URL) routes
//! - **Schemas** – declarative JSON Schema or `schemars` types, normalized for OpenAPI 3.0
//! - **Containment** – a bad field or route never takes the whole document down
//! - **Serving** – the document, a Swagger UI page and a route listing as `http` responses
//!
//! ## Quick Start
//!
//! ```rust
//! use routedoc::prelude::*;
//! use serde_json::json;
//!
//! let docs = Routedoc::new(&RoutedocConfig::default());
//!
//! docs.on_route(
//!     RouteOptions::single("GET", "/widgets/:id").schema(RouteSchema::from_json(&json!({
//!         "params": { "properties": { "id": { "type": "number" } } },
//!         "response": { "200": { "type": "object" } }
//!     }))),
//! );
//!
//! let document = docs.generate().unwrap();
//! assert_eq!(document["paths"]["/widgets/{id}"]["get"]["parameters"][0]["in"], "path");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! host routes → RouteRegistry → snapshot → OperationBuilder → DocumentAssembler → OpenAPI JSON
//!                                              ↑        ↑
//!                                   path translation  schema normalization
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;

pub use app::{init_telemetry, Routedoc, RoutedocError};

// Re-export the data model and registry
pub use routedoc_core as core;

// Re-export document generation and serving
pub use routedoc_docs as docs;

// Re-export configuration
pub use routedoc_config as config;

// Re-export logging and metrics
pub use routedoc_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use routedoc::prelude::*;
///
/// let registry = RouteRegistry::new();
/// registry.register(RouteDescriptor::new(HttpMethod::Get, "/health"));
/// assert_eq!(registry.len(), 1);
/// ```
pub mod prelude {
    pub use crate::{Routedoc, RoutedocError};

    pub use routedoc_core::{
        HttpMethod, RouteDescriptor, RouteOptions, RouteRegistry, RouteSchema,
        SchemaRepresentation, StructuredSchema, Typed,
    };

    pub use routedoc_docs::{
        DocsEndpoint, EndpointConfig, GenerationFailure, GeneratorConfig, OpenApi,
        OpenApiGenerator, SwaggerUi,
    };

    pub use routedoc_config::{ConfigLoader, RoutedocConfig};
}
