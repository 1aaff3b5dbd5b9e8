//! Schema representations attached to route registrations.
//!
//! A route may describe its inputs and outputs either with plain declarative
//! JSON Schema or with a structured schema object that knows how to render
//! itself. The two cases are distinguished by the variant of
//! [`SchemaRepresentation`], so the normalizer performs a single tagged check
//! instead of sniffing properties.
//!
//! ## Example
//!
//! ```rust
//! use routedoc_core::{RouteSchema, SchemaRepresentation};
//! use serde_json::json;
//!
//! let schema = RouteSchema::new()
//!     .body(SchemaRepresentation::of::<Vec<String>>())
//!     .response("201", json!({ "type": "object" }))
//!     .tag("widgets");
//!
//! assert!(schema.body.as_ref().is_some_and(SchemaRepresentation::is_structured));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use schemars::{JsonSchema, SchemaGenerator};
use serde_json::Value;

use crate::error::ConversionError;

/// Response schemas keyed by status code string (`"200"`, `"4XX"`, `"default"`).
pub type ResponseSchemas = IndexMap<String, SchemaRepresentation>;

/// A schema object that must be converted before it can be documented.
///
/// Implementations render themselves through the supplied generator, which is
/// configured for the OpenAPI 3.0 dialect. Conversion may fail; the caller
/// is responsible for containing the failure.
pub trait StructuredSchema: fmt::Debug + Send + Sync {
    /// Human readable name used in diagnostics.
    fn schema_name(&self) -> Cow<'static, str>;

    /// Render this schema as a JSON Schema value.
    fn to_json_schema(&self, generator: &mut SchemaGenerator) -> Result<Value, ConversionError>;
}

/// Structured schema backed by a type implementing [`JsonSchema`].
pub struct Typed<T: ?Sized>(PhantomData<fn() -> T>);

impl<T: ?Sized> Typed<T> {
    /// Create a structured schema for `T`.
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Typed")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T: JsonSchema + ?Sized> StructuredSchema for Typed<T> {
    fn schema_name(&self) -> Cow<'static, str> {
        T::schema_name()
    }

    fn to_json_schema(&self, generator: &mut SchemaGenerator) -> Result<Value, ConversionError> {
        let schema = generator.root_schema_for::<T>();
        serde_json::to_value(&schema).map_err(|source| ConversionError::Serialization {
            schema: T::schema_name().into_owned(),
            source,
        })
    }
}

/// A schema attached to one section of a route's schema bundle.
#[derive(Debug, Clone)]
pub enum SchemaRepresentation {
    /// Already declarative JSON Schema; documented as-is.
    Declarative(Value),
    /// A structured schema that has to be converted first.
    Structured(Arc<dyn StructuredSchema>),
}

impl SchemaRepresentation {
    /// Wrap a declarative JSON Schema value.
    #[must_use]
    pub fn declarative(schema: Value) -> Self {
        Self::Declarative(schema)
    }

    /// Wrap a structured schema.
    #[must_use]
    pub fn structured(schema: impl StructuredSchema + 'static) -> Self {
        Self::Structured(Arc::new(schema))
    }

    /// Structured schema for a type implementing [`JsonSchema`].
    #[must_use]
    pub fn of<T: JsonSchema + ?Sized + 'static>() -> Self {
        Self::structured(Typed::<T>::new())
    }

    /// Whether this schema needs conversion.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    /// The declarative value, if this is not a structured schema.
    #[must_use]
    pub fn as_declarative(&self) -> Option<&Value> {
        match self {
            Self::Declarative(value) => Some(value),
            Self::Structured(_) => None,
        }
    }
}

impl From<Value> for SchemaRepresentation {
    fn from(value: Value) -> Self {
        Self::Declarative(value)
    }
}

/// The validation-schema bundle supplied with a route registration.
///
/// Every section is optional. Tags, summary and description are carried here
/// because hosts supply them alongside the schemas.
#[derive(Debug, Clone, Default)]
pub struct RouteSchema {
    /// Query string schema.
    pub querystring: Option<SchemaRepresentation>,
    /// Path parameter schema.
    pub params: Option<SchemaRepresentation>,
    /// Request body schema.
    pub body: Option<SchemaRepresentation>,
    /// Response schemas by status code.
    pub response: Option<ResponseSchemas>,
    /// Tags used to group the operation.
    pub tags: Vec<String>,
    /// Operation summary.
    pub summary: Option<String>,
    /// Operation description.
    pub description: Option<String>,
}

impl RouteSchema {
    /// Create an empty schema bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query string schema.
    #[must_use]
    pub fn querystring(mut self, schema: impl Into<SchemaRepresentation>) -> Self {
        self.querystring = Some(schema.into());
        self
    }

    /// Set the path parameter schema.
    #[must_use]
    pub fn params(mut self, schema: impl Into<SchemaRepresentation>) -> Self {
        self.params = Some(schema.into());
        self
    }

    /// Set the request body schema.
    #[must_use]
    pub fn body(mut self, schema: impl Into<SchemaRepresentation>) -> Self {
        self.body = Some(schema.into());
        self
    }

    /// Add a response schema for a status code.
    #[must_use]
    pub fn response(
        mut self,
        status: impl Into<String>,
        schema: impl Into<SchemaRepresentation>,
    ) -> Self {
        self.response
            .get_or_insert_with(IndexMap::new)
            .insert(status.into(), schema.into());
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build a bundle from a JSON object.
    ///
    /// Recognised keys are `querystring`, `params`, `body`, `response`,
    /// `tags`, `summary` and `description`; all schema sections are taken as
    /// declarative. A `response` that is not an object is treated as absent,
    /// as are non-string tags.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let section = |key: &str| obj.get(key).cloned().map(SchemaRepresentation::Declarative);

        let response = obj.get("response").and_then(Value::as_object).map(|codes| {
            codes
                .iter()
                .map(|(status, schema)| {
                    (status.clone(), SchemaRepresentation::Declarative(schema.clone()))
                })
                .collect()
        });

        let tags = obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            querystring: section("querystring"),
            params: section("params"),
            body: section("body"),
            response,
            tags,
            summary: text("summary"),
            description: text("description"),
        }
    }
}
