//! Typed configuration for Routedoc.
//!
//! Supports:
//! - TOML and JSON configuration files
//! - `.env` files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//!
//! # Example
//!
//! ```no_run
//! use routedoc_config::ConfigLoader;
//!
//! # fn main() -> Result<(), routedoc_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_file("routedoc.toml")?
//!     .with_env_prefix("ROUTEDOC")
//!     .load()?;
//!
//! let generator = config.generator_config();
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [openapi]
//! title = "API Documentation"
//! version = "1.0.0"
//! description = "Public API"
//! route_prefix = "/docs"
//! internal_prefix = "/__"
//! cache = false
//!
//! [[servers]]
//! url = "https://api.example.com"
//! description = "Production"
//!
//! [ui]
//! enabled = true
//! listing_enabled = true
//! deep_linking = true
//! doc_expansion = "list"
//! swagger_version = "5.18.2"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [metrics]
//! enabled = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! Scalar values can be overridden with `PREFIX__SECTION__KEY`:
//!
//! - `ROUTEDOC__OPENAPI__TITLE=Shop`
//! - `ROUTEDOC__UI__DOC_EXPANSION=full`
//! - `ROUTEDOC__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::RoutedocConfig;
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::{LogFormat, LoggingSection, MetricsSection, OpenApiSection, ServerEntry, UiSection};
