//! End-to-end generation tests over a populated registry.

use std::borrow::Cow;
use std::sync::Arc;

use proptest::prelude::*;
use routedoc_core::{
    ConversionError, HttpMethod, RouteDescriptor, RouteOptions, RouteRegistry, RouteSchema,
    SchemaRepresentation, StructuredSchema,
};
use routedoc_docs::{
    conversion_failed, translate_path, GeneratorConfig, OpenApiGenerator, ParameterIn, SkipReason,
};
use schemars::SchemaGenerator;
use serde_json::{json, Value};

#[derive(Debug)]
struct Exploding;

impl StructuredSchema for Exploding {
    fn schema_name(&self) -> Cow<'static, str> {
        Cow::Borrowed("Exploding")
    }

    fn to_json_schema(&self, _: &mut SchemaGenerator) -> Result<Value, ConversionError> {
        Err(ConversionError::unsupported("Exploding", "refuses to convert"))
    }
}

fn generator(registry: &Arc<RouteRegistry>) -> OpenApiGenerator {
    OpenApiGenerator::new(Arc::clone(registry), GeneratorConfig::new())
}

fn json_route(method: HttpMethod, url: &str, schema: Value) -> RouteDescriptor {
    RouteDescriptor::new(method, url).with_schema(RouteSchema::from_json(&schema))
}

#[test]
fn widgets_end_to_end() {
    let registry = Arc::new(RouteRegistry::new());
    registry.register(json_route(
        HttpMethod::Get,
        "/widgets/:id",
        json!({
            "params": { "properties": { "id": { "type": "number" } } },
            "response": {
                "200": { "type": "object", "properties": { "name": { "type": "string" } } }
            }
        }),
    ));

    let document = generator(&registry).generate().unwrap();
    let operation = &document["paths"]["/widgets/{id}"]["get"];

    assert_eq!(
        operation["parameters"],
        json!([{ "name": "id", "in": "path", "required": true, "schema": { "type": "number" } }])
    );
    assert_eq!(
        operation["responses"]["200"]["content"]["application/json"]["schema"],
        json!({ "type": "object", "properties": { "name": { "type": "string" } } })
    );
    assert_eq!(operation["responses"]["200"]["description"], "Success");
}

#[test]
fn duplicate_registration_keeps_one_route() {
    let registry = RouteRegistry::new();
    registry.register(RouteDescriptor::new(HttpMethod::Get, "/users"));
    registry.register(json_route(HttpMethod::Get, "/users", json!({ "tags": ["late"] })));

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.iter().all(|route| route.schema().is_none()));
}

#[test]
fn generation_is_idempotent() {
    let registry = Arc::new(RouteRegistry::new());
    registry.register(json_route(HttpMethod::Get, "/a/:x", json!({ "tags": ["a"] })));
    registry.register(json_route(
        HttpMethod::Post,
        "/a",
        json!({ "body": { "type": "object" }, "response": { "201": { "type": "object" } } }),
    ));

    let generator = generator(&registry);
    assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
    assert_eq!(generator.generate_json().unwrap(), generator.generate_json().unwrap());
}

#[test]
fn documentation_and_wildcard_routes_are_filtered() {
    let registry = Arc::new(RouteRegistry::new());
    for url in ["/docs", "/docs/json", "/static/*", "/kept"] {
        registry.register(json_route(HttpMethod::Get, url, json!({})));
    }

    let (document, stats) = generator(&registry).document_with_stats();
    let paths: Vec<_> = document.paths.keys().cloned().collect();

    assert_eq!(paths, vec!["/kept"]);
    assert_eq!(stats.skipped_for(SkipReason::DocumentationRoute), 2);
    assert_eq!(stats.skipped_for(SkipReason::Wildcard), 1);
}

#[test]
fn path_parameters_are_always_required() {
    let registry = Arc::new(RouteRegistry::new());
    registry.register(json_route(
        HttpMethod::Get,
        "/orgs/:org/repos/:repo",
        json!({
            "params": {
                "type": "object",
                "properties": { "org": { "type": "string" }, "repo": { "type": "string" } },
                "required": ["org"]
            },
            "querystring": {
                "type": "object",
                "properties": { "page": { "type": "integer" } }
            }
        }),
    ));

    let document = generator(&registry).document();
    let operation = document.operation("/orgs/{org}/repos/{repo}", HttpMethod::Get).unwrap();

    let path: Vec<_> = operation.parameters_in(ParameterIn::Path).collect();
    assert_eq!(path.len(), 2);
    assert!(path.iter().all(|parameter| parameter.required));

    let query: Vec<_> = operation.parameters_in(ParameterIn::Query).collect();
    assert_eq!(query.len(), 1);
    assert!(!query[0].required);
}

#[test]
fn missing_response_section_uses_fallback() {
    let registry = Arc::new(RouteRegistry::new());
    registry.register(json_route(HttpMethod::Get, "/ping", json!({ "response": "nope" })));

    let document = generator(&registry).generate().unwrap();
    assert_eq!(
        document["paths"]["/ping"]["get"]["responses"],
        json!({
            "200": {
                "description": "Success",
                "content": { "application/json": { "schema": { "type": "object" } } }
            }
        })
    );
}

#[test]
fn failed_conversion_is_contained() {
    let registry = Arc::new(RouteRegistry::new());
    registry.register(
        RouteDescriptor::new(HttpMethod::Post, "/boom").with_schema(
            RouteSchema::new()
                .body(SchemaRepresentation::structured(Exploding))
                .response("200", SchemaRepresentation::structured(Exploding)),
        ),
    );
    registry.register(json_route(HttpMethod::Get, "/after", json!({})));

    let (document, stats) = generator(&registry).document_with_stats();
    let operation = document.operation("/boom", HttpMethod::Post).unwrap();

    assert_eq!(
        operation.request_body.as_ref().unwrap().content["application/json"].schema,
        conversion_failed()
    );
    assert_eq!(operation.responses["200"].json_schema(), Some(&conversion_failed()));
    assert!(document.operation("/after", HttpMethod::Get).is_some());
    assert_eq!(stats.skipped, 0);
}

#[test]
fn structured_schemas_are_converted() {
    let registry = Arc::new(RouteRegistry::new());
    registry.register(
        RouteDescriptor::new(HttpMethod::Put, "/names")
            .with_schema(RouteSchema::new().body(SchemaRepresentation::of::<Vec<String>>())),
    );

    let document = generator(&registry).generate().unwrap();
    let schema = &document["paths"]["/names"]["put"]["requestBody"]["content"]["application/json"]["schema"];

    assert_eq!(schema["type"], "array");
    assert_eq!(schema["items"]["type"], "string");
    assert!(schema.get("$schema").is_none());
}

#[test]
fn registration_feed_documents_each_method() {
    let registry = Arc::new(RouteRegistry::new());
    registry.on_route(
        RouteOptions::new(["GET", "HEAD", "delete"], "/sessions/:id")
            .schema(RouteSchema::new().tag("auth")),
    );

    let document = generator(&registry).document();
    let item = &document.paths["/sessions/{id}"];

    assert_eq!(item.len(), 2);
    assert_eq!(item.operation(HttpMethod::Delete).unwrap().tags, vec!["auth"]);
}

fn segment() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,7}".prop_map(|literal| (literal.clone(), literal)),
        "[A-Za-z_][A-Za-z0-9_]{0,7}".prop_map(|name| (format!(":{name}"), format!("{{{name}}}"))),
    ]
}

proptest! {
    #[test]
    fn translation_replaces_every_placeholder(segments in prop::collection::vec(segment(), 1..6)) {
        let url: String = segments.iter().map(|(raw, _)| format!("/{raw}")).collect();
        let expected: String = segments.iter().map(|(_, translated)| format!("/{translated}")).collect();

        prop_assert_eq!(translate_path(&url), expected.clone());
        prop_assert_eq!(translate_path(&expected), expected);
    }
}
