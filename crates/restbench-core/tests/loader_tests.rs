use restbench_core::error::LoadError;
use restbench_core::spec::load_document;
use restbench_core::spec::path::{RequestBodyOrRef, ResponseOrRef};
use restbench_core::spec::schema::SchemaOrRef;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

#[test]
fn load_yaml_document() {
    let doc = load_document(PETSTORE).expect("petstore should load");
    assert_eq!(doc.info.title, "Petstore");
    assert_eq!(doc.info.version, "1.0.0");
    assert_eq!(doc.servers.len(), 2);
    assert_eq!(doc.servers[0].url, "https://petstore.example.com/v1");
    assert_eq!(doc.paths.len(), 3);
    assert_eq!(doc.operation_count(), 5);
}

#[test]
fn load_json_document() {
    let doc = load_document(
        r#"{
  "openapi": "3.0.0",
  "info": { "title": "Minimal", "version": "0.1.0" },
  "paths": {
    "/ping": { "get": { "summary": "Ping" } }
  }
}"#,
    )
    .expect("JSON should load");
    assert_eq!(doc.info.title, "Minimal");
    assert!(doc.paths["/ping"].get.is_some());
}

#[test]
fn paths_keep_document_order() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Ordered, version: "1" }
paths:
  /zebra: { get: { summary: Z } }
  /alpha: { get: { summary: A } }
  /middle: { get: { summary: M } }
"#,
    )
    .unwrap();
    let keys: Vec<&str> = doc.paths.keys().map(String::as_str).collect();
    assert_eq!(keys, ["/zebra", "/alpha", "/middle"]);
}

#[test]
fn malformed_input_is_reported() {
    let err = load_document("{not json or yaml::").unwrap_err();
    match err {
        LoadError::MalformedInput(message) => assert!(!message.is_empty()),
        other => panic!("expected MalformedInput, got {other:?}"),
    }
}

#[test]
fn shape_violation_is_invalid_specification() {
    // Well-formed YAML, but `info` is missing entirely.
    let err = load_document("openapi: \"3.0.0\"\npaths: {}\n").unwrap_err();
    assert!(matches!(err, LoadError::InvalidSpecification(_)));
}

#[test]
fn swagger_two_is_rejected_by_version() {
    let err = load_document(
        r#"
swagger: "2.0"
info: { title: Legacy, version: "1" }
paths: {}
"#,
    )
    .unwrap_err();
    match err {
        LoadError::InvalidSpecification(message) => {
            assert!(message.contains("2.0"), "message should name the version: {message}");
        }
        other => panic!("expected InvalidSpecification, got {other:?}"),
    }
}

#[test]
fn future_major_version_is_rejected() {
    let err = load_document(
        r#"
openapi: "4.0.0"
info: { title: Future, version: "1" }
paths: {}
"#,
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::InvalidSpecification(_)));
}

#[test]
fn unresolved_reference_is_invalid_specification() {
    let err = load_document(
        r##"
openapi: "3.0.0"
info: { title: Broken, version: "1" }
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/Nowhere"
"##,
    )
    .unwrap_err();
    match err {
        LoadError::InvalidSpecification(message) => assert!(message.contains("Nowhere")),
        other => panic!("expected InvalidSpecification, got {other:?}"),
    }
}

#[test]
fn references_are_inlined_as_independent_copies() {
    let doc = load_document(PETSTORE).unwrap();

    // The same component is referenced from a request body and a response;
    // after loading, both sites hold a full inline copy.
    let post = doc.paths["/pets"].post.as_ref().unwrap();
    let Some(RequestBodyOrRef::RequestBody(body)) = &post.request_body else {
        panic!("expected inline request body");
    };
    let SchemaOrRef::Schema(body_schema) = body.content["application/json"].schema.as_ref().unwrap()
    else {
        panic!("request body schema should be inlined");
    };

    let get = doc.paths["/pets/{petId}"].get.as_ref().unwrap();
    let ResponseOrRef::Response(ok) = &get.responses["200"] else {
        panic!("expected inline response");
    };
    let SchemaOrRef::Schema(response_schema) =
        ok.content["application/json"].schema.as_ref().unwrap()
    else {
        panic!("response schema should be inlined");
    };

    assert_eq!(body_schema, response_schema);
    assert!(body_schema.properties.contains_key("kind"));
}

#[test]
fn cyclic_document_loads() {
    let doc = load_document(
        r##"
openapi: "3.0.0"
info: { title: Trees, version: "1" }
paths:
  /nodes:
    post:
      summary: Create a node
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/Node"
components:
  schemas:
    Node:
      type: object
      properties:
        label: { type: string }
        children:
          type: array
          items:
            $ref: "#/components/schemas/Node"
"##,
    )
    .expect("self-referential schemas must not hang or error");
    assert_eq!(doc.operation_count(), 1);
}
