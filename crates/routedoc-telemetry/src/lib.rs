//! Observability for Routedoc.
//!
//! - **Logging**: structured logs through `tracing`, JSON or pretty output
//! - **Metrics**: counters for registrations, generations and skipped routes
//!   via the `metrics` facade, optionally rendered in Prometheus text format
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `routedoc_routes_registered_total` | Counter | - | Routes accepted by a registry |
//! | `routedoc_routes_skipped_total` | Counter | `reason` | Routes left out of a document |
//! | `routedoc_documents_generated_total` | Counter | - | Documents generated |
//! | `routedoc_generation_failures_total` | Counter | - | Generation calls that failed |
//!
//! # Example
//!
//! ```rust,ignore
//! use routedoc_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(route.url = "/users/:id", "Route registered");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, render_metrics, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
