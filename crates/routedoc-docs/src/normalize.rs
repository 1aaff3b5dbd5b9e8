//! Normalization of route schemas into OpenAPI-compatible JSON Schema.
//!
//! Declarative schemas pass through unchanged. Structured schemas are
//! converted with generator settings for the OpenAPI 3.0 dialect, subschemas
//! inlined, and the `$schema` key removed. A conversion that fails is
//! replaced by [`conversion_failed`]; callers always get a usable fragment.

use routedoc_core::{ConversionError, SchemaRepresentation, StructuredSchema};
use schemars::generate::SchemaSettings;
use serde_json::{json, Value};
use tracing::warn;

/// Description carried by the placeholder for a failed conversion.
pub const CONVERSION_FAILED: &str = "schema conversion failed";

/// Meta key identifying the JSON Schema dialect, invalid inside OpenAPI 3.0.
const DIALECT_KEY: &str = "$schema";

/// Placeholder fragment used when a structured schema cannot be converted.
#[must_use]
pub fn conversion_failed() -> Value {
    json!({ "type": "object", "description": CONVERSION_FAILED })
}

/// Converts [`SchemaRepresentation`]s into plain JSON Schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaNormalizer;

impl SchemaNormalizer {
    /// Create a normalizer targeting OpenAPI 3.0.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Normalize a schema. Never fails.
    #[must_use]
    pub fn normalize(&self, schema: &SchemaRepresentation) -> Value {
        match schema {
            SchemaRepresentation::Declarative(value) => value.clone(),
            SchemaRepresentation::Structured(structured) => {
                self.convert(structured.as_ref()).unwrap_or_else(|err| {
                    warn!(
                        schema = %structured.schema_name(),
                        error = %err,
                        "Schema conversion failed"
                    );
                    conversion_failed()
                })
            }
        }
    }

    /// Convert a structured schema, surfacing the error.
    ///
    /// # Errors
    ///
    /// Returns the schema's own conversion error, or `Unsupported` if the
    /// result is neither an object nor a boolean schema.
    pub fn convert(&self, schema: &dyn StructuredSchema) -> Result<Value, ConversionError> {
        let mut generator = Self::settings().into_generator();
        let mut value = schema.to_json_schema(&mut generator)?;

        match &mut value {
            Value::Object(obj) => {
                obj.remove(DIALECT_KEY);
            }
            Value::Bool(_) => {}
            other => {
                return Err(ConversionError::unsupported(
                    schema.schema_name(),
                    format!("expected an object or boolean schema, got {other}"),
                ))
            }
        }

        Ok(value)
    }

    fn settings() -> SchemaSettings {
        SchemaSettings::openapi3().with(|settings| settings.inline_subschemas = true)
    }
}
