//! HTTP serving of the generated documentation.
//!
//! [`DocsEndpoint`] answers requests under the documentation prefix and
//! leaves everything else to the host:
//!
//! | Request | Response |
//! |---|---|
//! | `GET {prefix}` or `{prefix}/` | Swagger UI page |
//! | `GET {prefix}/json` | OpenAPI document, with CORS headers |
//! | `GET {prefix}/routes` | Registry listing for diagnostics |
//! | `OPTIONS` on any of the above | `204` with CORS headers |
//! | other methods on any of the above | `405` |
//!
//! Responses are plain `http::Response<Bytes>` so any server can send them.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use parking_lot::Mutex;
use routedoc_core::RouteSnapshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerationFailure;
use crate::generator::OpenApiGenerator;
use crate::swagger::SwaggerUi;

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, PATCH, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";
const JSON_CONTENT_TYPE: &str = "application/json";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Add the permissive CORS headers served with the document.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

/// Which documentation resources are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Serve the Swagger UI page.
    pub ui_enabled: bool,
    /// Serve the route listing.
    pub listing_enabled: bool,
    /// Reuse the rendered document until the registry changes.
    pub cache: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            ui_enabled: true,
            listing_enabled: true,
            cache: false,
        }
    }
}

/// Registry contents as served by the listing resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteListing {
    /// Number of registered routes.
    pub total: usize,
    /// Routes in registration order.
    pub routes: Vec<ListedRoute>,
}

/// One entry of a [`RouteListing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedRoute {
    /// HTTP method.
    pub method: String,
    /// URL pattern as registered.
    pub url: String,
    /// Whether the route declared a schema bundle.
    pub has_schema: bool,
    /// Route tags.
    pub tags: Vec<String>,
}

impl RouteListing {
    /// Describe a registry snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &RouteSnapshot) -> Self {
        let routes: Vec<_> = snapshot
            .iter()
            .map(|route| ListedRoute {
                method: route.method().to_string(),
                url: route.url().to_string(),
                has_schema: route.schema().is_some(),
                tags: route.tags().to_vec(),
            })
            .collect();
        Self {
            total: routes.len(),
            routes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Ui,
    Document,
    Listing,
}

#[derive(Debug)]
struct CachedDocument {
    version: u64,
    body: Bytes,
}

/// Serves the documentation resources for one generator.
#[derive(Debug)]
pub struct DocsEndpoint {
    generator: OpenApiGenerator,
    ui_html: Bytes,
    config: EndpointConfig,
    cached: Mutex<Option<CachedDocument>>,
}

impl DocsEndpoint {
    /// Create an endpoint serving under the generator's route prefix.
    #[must_use]
    pub fn new(generator: OpenApiGenerator, config: EndpointConfig) -> Self {
        let swagger = SwaggerUi::new(
            generator.config().route_prefix.clone(),
            &generator.config().info.title,
        );
        Self {
            generator,
            ui_html: swagger.html_bytes(),
            config,
            cached: Mutex::new(None),
        }
    }

    /// Replace the Swagger UI page.
    #[must_use]
    pub fn with_swagger(mut self, swagger: &SwaggerUi) -> Self {
        self.ui_html = swagger.html_bytes();
        self
    }

    /// The generator behind this endpoint.
    #[must_use]
    pub fn generator(&self) -> &OpenApiGenerator {
        &self.generator
    }

    /// Prefix the resources are served under.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.generator.config().route_prefix
    }

    /// Answer a request, or return `None` if it is not for this endpoint.
    pub fn handle<B>(&self, request: &Request<B>) -> Option<Response<Bytes>> {
        self.respond(request.method(), request.uri().path())
    }

    /// Answer a method and path, or return `None` if they are not for this endpoint.
    pub fn respond(&self, method: &Method, path: &str) -> Option<Response<Bytes>> {
        let resource = self.resource(path)?;

        if method == Method::OPTIONS {
            let mut response = plain_response(StatusCode::NO_CONTENT, None, Bytes::new());
            apply_cors(response.headers_mut());
            return Some(response);
        }
        if method != Method::GET {
            let mut response = plain_response(StatusCode::METHOD_NOT_ALLOWED, None, Bytes::new());
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, OPTIONS"));
            return Some(response);
        }

        debug!(route.path = path, "Serving documentation");
        Some(match resource {
            Resource::Ui => plain_response(StatusCode::OK, Some(HTML_CONTENT_TYPE), self.ui_html.clone()),
            Resource::Document => self.document_response(),
            Resource::Listing => {
                let listing = RouteListing::from_snapshot(&self.generator.registry().snapshot());
                json_response(StatusCode::OK, &listing)
            }
        })
    }

    fn resource(&self, path: &str) -> Option<Resource> {
        let rest = path.strip_prefix(self.prefix().trim_end_matches('/'))?;
        match rest {
            "" | "/" if self.config.ui_enabled => Some(Resource::Ui),
            "/json" => Some(Resource::Document),
            "/routes" if self.config.listing_enabled => Some(Resource::Listing),
            _ => None,
        }
    }

    fn document_response(&self) -> Response<Bytes> {
        let mut response = match self.document_body() {
            Ok(body) => plain_response(StatusCode::OK, Some(JSON_CONTENT_TYPE), body),
            Err(failure) => json_response(StatusCode::INTERNAL_SERVER_ERROR, &failure),
        };
        apply_cors(response.headers_mut());
        response
    }

    fn document_body(&self) -> Result<Bytes, GenerationFailure> {
        if !self.config.cache {
            return self.generator.generate_json().map(Bytes::from);
        }

        // Read the version first: a registration racing with generation
        // leaves a stale version behind and forces a rebuild next time.
        let version = self.generator.registry().version();
        if let Some(cached) = self.cached.lock().as_ref() {
            if cached.version == version {
                return Ok(cached.body.clone());
            }
        }

        let body = Bytes::from(self.generator.generate_json()?);
        *self.cached.lock() = Some(CachedDocument {
            version,
            body: body.clone(),
        });
        Ok(body)
    }
}

fn plain_response(status: StatusCode, content_type: Option<&'static str>, body: Bytes) -> Response<Bytes> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Bytes> {
    let json = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    plain_response(status, Some(JSON_CONTENT_TYPE), Bytes::from(json))
}
