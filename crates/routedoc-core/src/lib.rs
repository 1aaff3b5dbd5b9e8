//! # Routedoc Core
//!
//! Core types for the Routedoc documentation engine.
//!
//! This crate provides the data the rest of Routedoc works on:
//!
//! - [`HttpMethod`] - The fixed set of HTTP methods that can be documented
//! - [`RouteDescriptor`] - One captured (method, URL pattern) registration
//! - [`RouteSchema`] - The validation-schema bundle attached to a route
//! - [`SchemaRepresentation`] - Declarative JSON Schema or a structured schema
//! - [`RouteRegistry`] - Append-only, deduplicated store of descriptors
//!
//! ## Registration Feed
//!
//! ```rust
//! use routedoc_core::{RouteOptions, RouteRegistry, RouteSchema};
//! use serde_json::json;
//!
//! let registry = RouteRegistry::new();
//! registry.on_route(
//!     RouteOptions::new(["GET", "HEAD"], "/users/:id").schema(RouteSchema::from_json(&json!({
//!         "params": { "type": "object", "properties": { "id": { "type": "string" } } }
//!     }))),
//! );
//!
//! // HEAD is not a documented method and is ignored.
//! assert_eq!(registry.len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/routedoc-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod method;
mod registry;
mod route;
pub mod schema;

pub use error::{ConversionError, CoreError, CoreResult};
pub use method::HttpMethod;
pub use registry::{RouteRegistry, RouteSnapshot};
pub use route::{RouteDescriptor, RouteKey, RouteOptions};
pub use schema::{ResponseSchemas, RouteSchema, SchemaRepresentation, StructuredSchema, Typed};

/// Re-exported so hosts can derive [`schemars::JsonSchema`] without a direct dependency.
pub use schemars;
