//! Error types for route capture and schema conversion.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while interpreting the registration feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The method is not one of the documented HTTP methods.
    #[error("unsupported HTTP method: {method}")]
    UnknownMethod {
        /// The method name as supplied by the host.
        method: String,
    },
}

impl CoreError {
    /// Create a new unknown method error.
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }
}

/// A structured schema could not be converted to JSON Schema.
///
/// Conversion errors never leave the normalizer: they are replaced by a
/// placeholder fragment there.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The generated schema could not be serialized.
    #[error("failed to serialize schema `{schema}`: {source}")]
    Serialization {
        /// Name of the schema being converted.
        schema: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// The schema cannot be expressed in the target dialect.
    #[error("schema `{schema}` is not representable: {reason}")]
    Unsupported {
        /// Name of the schema being converted.
        schema: String,
        /// Why conversion is impossible.
        reason: String,
    },
}

impl ConversionError {
    /// Create a new unsupported-schema error.
    pub fn unsupported(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            schema: schema.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_method_error() {
        let err = CoreError::unknown_method("TRACE");
        assert!(err.to_string().contains("TRACE"));
    }

    #[test]
    fn test_unsupported_conversion_error() {
        let err = ConversionError::unsupported("Widget", "recursive type");
        assert!(err.to_string().contains("Widget"));
        assert!(err.to_string().contains("recursive type"));
    }

    #[test]
    fn test_serialization_conversion_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConversionError::Serialization {
            schema: "Order".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("failed to serialize schema `Order`"));
    }
}
