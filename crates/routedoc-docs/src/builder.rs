//! Building one OpenAPI operation from one route descriptor.
//!
//! Routes are first checked for eligibility: documentation routes, internal
//! routes, wildcard routes and routes without a schema bundle are skipped.
//! Eligible routes are built field by field. A failure in the query, path or
//! body step falls back to that step's default and the other steps still run.
//! Unusable response entries are dropped one at a time. A failure outside the
//! steps skips the route.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use routedoc_core::{HttpMethod, ResponseSchemas, RouteDescriptor, RouteSchema, SchemaRepresentation};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::{DocsResult, FieldError};
use crate::normalize::SchemaNormalizer;
use crate::openapi::{Operation, Parameter, ParameterIn, RequestBody, Response};
use crate::path::{is_wildcard, translate_path, validate_template};

/// Tag assigned to operations whose route declares none.
pub const DEFAULT_TAG: &str = "default";

/// Why a route was left out of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// The route serves the documentation itself.
    DocumentationRoute,
    /// The route is under the reserved internal prefix.
    InternalRoute,
    /// The URL pattern contains a wildcard.
    Wildcard,
    /// The route has no schema bundle.
    NoSchema,
    /// Building the operation failed.
    ProcessingError,
}

impl SkipReason {
    /// Label used in logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentationRoute => "documentation_route",
            Self::InternalRoute => "internal_route",
            Self::Wildcard => "wildcard",
            Self::NoSchema => "no_schema",
            Self::ProcessingError => "processing_error",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of building one route.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// The route is documented at `path`.
    Built {
        /// Translated OpenAPI path.
        path: String,
        /// The operation.
        operation: Operation,
    },
    /// The route is not documented.
    Skipped(SkipReason),
}

/// Builds operations from route descriptors.
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    route_prefix: String,
    internal_prefix: String,
    normalizer: SchemaNormalizer,
}

impl OperationBuilder {
    /// Create a builder.
    ///
    /// # Arguments
    ///
    /// * `route_prefix` - Prefix the documentation is served under; matching routes are skipped
    /// * `internal_prefix` - Reserved prefix for internal routes; matching routes are skipped
    #[must_use]
    pub fn new(route_prefix: impl Into<String>, internal_prefix: impl Into<String>) -> Self {
        Self {
            route_prefix: route_prefix.into(),
            internal_prefix: internal_prefix.into(),
            normalizer: SchemaNormalizer::new(),
        }
    }

    /// Build the operation for a route, or report why it was skipped.
    #[must_use]
    pub fn build(&self, descriptor: &RouteDescriptor) -> BuildOutcome {
        let schema = match self.eligibility(descriptor) {
            Ok(schema) => schema,
            Err(reason) => {
                debug!(
                    http.method = %descriptor.method(),
                    route.url = descriptor.url(),
                    skip.reason = %reason,
                    "Route skipped"
                );
                routedoc_telemetry::metrics::record_route_skipped(reason.as_str());
                return BuildOutcome::Skipped(reason);
            }
        };

        match self.build_operation(descriptor, schema) {
            Ok((path, operation)) => BuildOutcome::Built { path, operation },
            Err(err) => {
                error!(
                    http.method = %descriptor.method(),
                    route.url = descriptor.url(),
                    error = %err,
                    "Error processing route"
                );
                routedoc_telemetry::metrics::record_route_skipped(
                    SkipReason::ProcessingError.as_str(),
                );
                BuildOutcome::Skipped(SkipReason::ProcessingError)
            }
        }
    }

    fn eligibility<'a>(&self, descriptor: &'a RouteDescriptor) -> Result<&'a RouteSchema, SkipReason> {
        let url = descriptor.url();
        if url.starts_with(&self.route_prefix) {
            return Err(SkipReason::DocumentationRoute);
        }
        if url.starts_with(&self.internal_prefix) {
            return Err(SkipReason::InternalRoute);
        }
        if is_wildcard(url) {
            return Err(SkipReason::Wildcard);
        }
        descriptor.schema().ok_or(SkipReason::NoSchema)
    }

    fn build_operation(
        &self,
        descriptor: &RouteDescriptor,
        schema: &RouteSchema,
    ) -> DocsResult<(String, Operation)> {
        validate_template(descriptor.url())?;

        let method = descriptor.method();
        let path = translate_path(descriptor.url());

        let tags = if descriptor.tags().is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            descriptor.tags().to_vec()
        };
        let summary = schema
            .summary
            .clone()
            .unwrap_or_else(|| format!("{method} {path}"));
        let description = schema
            .description
            .clone()
            .unwrap_or_else(|| format!("Endpoint {method} {path}"));

        let mut parameters = contain(
            descriptor,
            "querystring",
            self.query_parameters(schema.querystring.as_ref()),
            Vec::new,
        );
        parameters.extend(contain(
            descriptor,
            "params",
            self.path_parameters(schema.params.as_ref()),
            Vec::new,
        ));
        let request_body = contain(
            descriptor,
            "body",
            self.request_body(method, schema.body.as_ref()),
            || None,
        );
        let responses = self.responses(descriptor, schema.response.as_ref());

        Ok((
            path,
            Operation {
                tags,
                summary,
                description,
                parameters,
                request_body,
                responses,
            },
        ))
    }

    /// Query parameters: one per property, or a single `query` parameter
    /// carrying the whole schema when it has no properties.
    fn query_parameters(
        &self,
        schema: Option<&SchemaRepresentation>,
    ) -> Result<Vec<Parameter>, FieldError> {
        let Some(schema) = schema else {
            return Ok(Vec::new());
        };
        let normalized = self.normalizer.normalize(schema);

        let Some(properties) = properties_of(&normalized, "querystring")? else {
            return Ok(vec![Parameter {
                name: "query".to_string(),
                location: ParameterIn::Query,
                description: None,
                required: false,
                schema: normalized,
            }]);
        };

        let required = required_names(&normalized, "querystring")?;
        Ok(properties
            .iter()
            .map(|(name, property)| {
                parameter(name, property, ParameterIn::Query, required.contains(name.as_str()))
            })
            .collect())
    }

    /// Path parameters are always required: the route cannot match without them.
    fn path_parameters(
        &self,
        schema: Option<&SchemaRepresentation>,
    ) -> Result<Vec<Parameter>, FieldError> {
        let Some(schema) = schema else {
            return Ok(Vec::new());
        };
        let normalized = self.normalizer.normalize(schema);

        Ok(properties_of(&normalized, "params")?
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| parameter(name, property, ParameterIn::Path, true))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn request_body(
        &self,
        method: HttpMethod,
        schema: Option<&SchemaRepresentation>,
    ) -> Result<Option<RequestBody>, FieldError> {
        let Some(schema) = schema.filter(|_| method.accepts_body()) else {
            return Ok(None);
        };
        let normalized = schema_value(self.normalizer.normalize(schema), "body")?;
        Ok(Some(RequestBody::json(normalized)))
    }

    /// Responses: one entry per declared status. Entries with an unusable
    /// key or schema are dropped on their own; nothing usable left means the
    /// fallback.
    fn responses(
        &self,
        descriptor: &RouteDescriptor,
        response: Option<&ResponseSchemas>,
    ) -> IndexMap<String, Response> {
        let Some(response) = response.filter(|codes| !codes.is_empty()) else {
            return fallback_responses();
        };

        let mut responses = IndexMap::with_capacity(response.len());
        for (status, schema) in response {
            match self.response_entry(status, schema) {
                Ok((key, entry)) => {
                    responses.insert(key, entry);
                }
                Err(err) => warn!(
                    http.method = %descriptor.method(),
                    route.url = descriptor.url(),
                    status = %status,
                    error = %err,
                    "Dropping response entry"
                ),
            }
        }

        if responses.is_empty() {
            return fallback_responses();
        }
        responses
    }

    fn response_entry(
        &self,
        status: &str,
        schema: &SchemaRepresentation,
    ) -> Result<(String, Response), FieldError> {
        let key = status_key(status).ok_or_else(|| FieldError::InvalidStatusCode {
            status: status.to_string(),
        })?;
        let section = format!("response {status}");
        let normalized = schema_value(self.normalizer.normalize(schema), &section)?;
        let response = Response::json(status_description(&key), normalized);
        Ok((key, response))
    }
}

/// Substitute a field's fallback when its step failed.
fn contain<T>(
    descriptor: &RouteDescriptor,
    field: &'static str,
    result: Result<T, FieldError>,
    fallback: impl FnOnce() -> T,
) -> T {
    result.unwrap_or_else(|err| {
        warn!(
            http.method = %descriptor.method(),
            route.url = descriptor.url(),
            field,
            error = %err,
            "Using fallback for field"
        );
        fallback()
    })
}

fn properties_of<'a>(
    schema: &'a Value,
    section: &'static str,
) -> Result<Option<&'a Map<String, Value>>, FieldError> {
    match schema.get("properties") {
        None => Ok(None),
        Some(Value::Object(properties)) => Ok(Some(properties)),
        Some(_) => Err(FieldError::MalformedProperties { section }),
    }
}

fn required_names<'a>(schema: &'a Value, section: &'static str) -> Result<HashSet<&'a str>, FieldError> {
    match schema.get("required") {
        None => Ok(HashSet::new()),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| name.as_str().ok_or(FieldError::MalformedRequired { section }))
            .collect(),
        Some(_) => Err(FieldError::MalformedRequired { section }),
    }
}

fn parameter(name: &str, property: &Value, location: ParameterIn, required: bool) -> Parameter {
    Parameter {
        name: name.to_string(),
        location,
        description: property
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        required,
        schema: property.clone(),
    }
}

fn schema_value(schema: Value, section: &str) -> Result<Value, FieldError> {
    if schema.is_object() || schema.is_boolean() {
        Ok(schema)
    } else {
        Err(FieldError::InvalidSchema {
            section: section.to_string(),
        })
    }
}

/// The single `200 Success` entry used when no responses can be documented.
#[must_use]
pub fn fallback_responses() -> IndexMap<String, Response> {
    IndexMap::from([("200".to_string(), Response::fallback())])
}

/// Canonical form of a response key: a status code, a range like `4XX`
/// (any case, emitted uppercase) or `default`.
#[must_use]
pub fn status_key(key: &str) -> Option<String> {
    if key.eq_ignore_ascii_case("default") {
        return Some("default".to_string());
    }
    match key.as_bytes() {
        [b'1'..=b'5', tens, units]
            if tens.eq_ignore_ascii_case(&b'X') && units.eq_ignore_ascii_case(&b'X') =>
        {
            Some(key.to_ascii_uppercase())
        }
        [b'1'..=b'5', tens, units] if tens.is_ascii_digit() && units.is_ascii_digit() => {
            Some(key.to_string())
        }
        _ => None,
    }
}

/// Whether `key` is a status code, a status range like `4XX`, or `default`.
#[must_use]
pub fn is_status_key(key: &str) -> bool {
    status_key(key).is_some()
}

/// Response description for a status code.
#[must_use]
pub fn status_description(status: &str) -> &'static str {
    match status {
        "200" => "Success",
        "201" => "Created",
        "202" => "Accepted",
        "204" => "No Content",
        "400" => "Bad Request",
        "401" => "Unauthorized",
        "403" => "Forbidden",
        "404" => "Not Found",
        "409" => "Conflict",
        "422" => "Unprocessable Entity",
        "429" => "Too Many Requests",
        "500" => "Internal Server Error",
        "503" => "Service Unavailable",
        _ => "Response",
    }
}
