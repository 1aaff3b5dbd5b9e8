//! Error types for document generation.
//!
//! Failures are contained at the narrowest scope that can recover:
//!
//! - [`FieldError`] - one field of one operation; the field falls back to its default
//! - [`DocsError`] - one route; the route is skipped
//! - [`GenerationFailure`] - the whole call; returned instead of a document

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;

/// A failure while building one field of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// `properties` is present but is not an object.
    #[error("`properties` of the {section} schema must be an object")]
    MalformedProperties {
        /// Schema section (`querystring`, `params`).
        section: &'static str,
    },

    /// `required` is present but is not a list of names.
    #[error("`required` of the {section} schema must be an array of strings")]
    MalformedRequired {
        /// Schema section.
        section: &'static str,
    },

    /// The normalized schema is neither an object nor a boolean.
    #[error("{section} schema must be a JSON object or boolean")]
    InvalidSchema {
        /// Schema section, with the status code for responses.
        section: String,
    },

    /// A response key is not a status code, a status range or `default`.
    #[error("invalid response status code: {status}")]
    InvalidStatusCode {
        /// The offending key.
        status: String,
    },
}

/// A failure that prevents a whole route from being documented.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The URL pattern cannot be turned into an OpenAPI path.
    #[error("invalid route url '{url}': {reason}")]
    InvalidPath {
        /// URL pattern as registered.
        url: String,
        /// Why the pattern is invalid.
        reason: String,
    },

    /// The same placeholder appears twice in one URL pattern.
    #[error("path parameter '{name}' appears more than once in '{url}'")]
    DuplicatePathParameter {
        /// URL pattern as registered.
        url: String,
        /// Repeated placeholder name.
        name: String,
    },

    /// Failed to serialize the document.
    #[error("failed to serialize OpenAPI document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DocsError {
    /// Create a new invalid path error.
    pub fn invalid_path(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Payload returned instead of a document when generation fails as a whole.
///
/// Serializes as `{ "error": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}: {message}")]
pub struct GenerationFailure {
    /// Fixed error summary.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

impl GenerationFailure {
    /// Summary carried in the `error` field.
    pub const SUMMARY: &'static str = "Failed to generate OpenAPI specification";

    /// Create a failure payload with the given detail.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Self::SUMMARY.to_string(),
            message: message.into(),
        }
    }
}

impl From<DocsError> for GenerationFailure {
    fn from(err: DocsError) -> Self {
        Self::new(err.to_string())
    }
}
