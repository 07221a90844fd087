use restbench_core::import::distinct_tags;
use restbench_core::spec::load_document;
use restbench_core::synth::{BodyType, HttpMethod, convert};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

#[test]
fn conversion_is_deterministic() {
    let doc = load_document(PETSTORE).unwrap();
    let first = convert(&doc, 1, None);
    let second = convert(&doc, 1, None);
    assert_eq!(first, second);
}

#[test]
fn every_supported_operation_becomes_a_descriptor() {
    let doc = load_document(PETSTORE).unwrap();
    let descriptors = convert(&doc, 1, None);

    assert_eq!(descriptors.len(), 5);
    let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        ["List pets", "createPet", "Get a pet", "deletePet", "get__status"]
    );
    let methods: Vec<HttpMethod> = descriptors.iter().map(|d| d.method).collect();
    assert_eq!(
        methods,
        [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Get,
            HttpMethod::Delete,
            HttpMethod::Get,
        ]
    );
}

#[test]
fn petstore_descriptors_carry_parameters_and_body() {
    let doc = load_document(PETSTORE).unwrap();
    let descriptors = convert(&doc, 42, None);

    let list = &descriptors[0];
    assert_eq!(list.project_id, 42);
    assert_eq!(list.url, "https://petstore.example.com/v1/pets");
    assert_eq!(list.body_type, BodyType::None);
    assert_eq!(list.query_params.len(), 2);
    assert_eq!(list.query_params[0].key, "limit");
    assert_eq!(list.query_params[0].value, "20");
    assert_eq!(list.query_params[0].description, "Page size");
    assert_eq!(list.query_params[1].key, "status");
    assert_eq!(list.query_params[1].value, "available");
    assert_eq!(list.headers["X-Request-Id"], "abc-123");
    assert_eq!(list.tag.as_deref(), Some("pets"));

    let create = &descriptors[1];
    assert_eq!(create.body_type, BodyType::Json);
    assert_eq!(
        create.body,
        "{\n  \"name\": \"\",\n  \"kind\": \"dog\",\n  \"age\": 1\n}"
    );
    assert!(create.form_fields.is_empty());

    // The path-level petId parameter substitutes into both operations.
    let get_pet = &descriptors[2];
    assert_eq!(get_pet.url, "https://petstore.example.com/v1/pets/7");
    let delete_pet = &descriptors[3];
    assert_eq!(delete_pet.url, "https://petstore.example.com/v1/pets/7");
    assert_eq!(delete_pet.tag.as_deref(), Some("admin"));

    let status = &descriptors[4];
    assert_eq!(status.tag, None);
    assert_eq!(status.url, "https://petstore.example.com/v1/status");

    assert_eq!(distinct_tags(&descriptors), ["pets", "admin"]);
}

#[test]
fn ping_scenario() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Health, version: "1" }
servers:
  - url: https://api.example.com
paths:
  /ping:
    get:
      tags: [health]
      summary: Ping
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);

    assert_eq!(descriptors.len(), 1);
    let ping = &descriptors[0];
    assert_eq!(ping.name, "Ping");
    assert_eq!(ping.method, HttpMethod::Get);
    assert_eq!(ping.url, "https://api.example.com/ping");
    assert_eq!(ping.body_type, BodyType::None);
    assert!(ping.body.is_empty());
    assert_eq!(ping.tag.as_deref(), Some("health"));
    assert_eq!(distinct_tags(&descriptors), ["health"]);
}

#[test]
fn json_takes_precedence_over_form() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Dual, version: "1" }
paths:
  /submit:
    post:
      summary: Submit
      requestBody:
        content:
          application/x-www-form-urlencoded:
            schema:
              type: object
              properties:
                field: { type: string }
          application/json:
            schema:
              type: object
              properties:
                field: { type: string }
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    assert_eq!(descriptors[0].body_type, BodyType::Json);
    assert!(descriptors[0].form_fields.is_empty());
}

#[test]
fn form_body_populates_fields() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Login, version: "1" }
paths:
  /login:
    post:
      summary: Log in
      requestBody:
        content:
          application/x-www-form-urlencoded:
            schema:
              type: object
              properties:
                username:
                  type: string
                  example: admin
                password:
                  type: string
                remember:
                  type: boolean
                  default: true
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    let login = &descriptors[0];

    assert_eq!(login.body_type, BodyType::Form);
    assert!(login.body.is_empty());
    let fields: Vec<(&str, &str)> = login
        .form_fields
        .iter()
        .map(|f| (f.key.as_str(), f.value.as_str()))
        .collect();
    assert_eq!(
        fields,
        [("username", "admin"), ("password", ""), ("remember", "true")]
    );
}

#[test]
fn base_url_override_wins_over_servers() {
    let doc = load_document(PETSTORE).unwrap();
    let descriptors = convert(&doc, 1, Some("http://localhost:8080"));
    assert_eq!(descriptors[0].url, "http://localhost:8080/pets");
}

#[test]
fn missing_servers_yield_root_relative_urls() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Bare, version: "1" }
paths:
  /health: { get: { summary: Health } }
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    assert_eq!(descriptors[0].url, "/health");
}

#[test]
fn unresolvable_placeholders_stay_literal() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Posts, version: "1" }
servers:
  - url: https://api.example.com
paths:
  /users/{id}/posts/{postId}:
    get:
      summary: Get a post
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: integer
            example: 42
        - name: postId
          in: path
          required: true
          schema:
            type: integer
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    assert_eq!(
        descriptors[0].url,
        "https://api.example.com/users/42/posts/{postId}"
    );
}

#[test]
fn methods_follow_the_fixed_order_not_the_source_order() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Ordering, version: "1" }
paths:
  /things:
    delete: { summary: Remove }
    post: { summary: Create }
    get: { summary: Read }
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    let methods: Vec<HttpMethod> = descriptors.iter().map(|d| d.method).collect();
    assert_eq!(
        methods,
        [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
    );
}

#[test]
fn trace_operations_are_skipped() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Tracey, version: "1" }
paths:
  /debug:
    trace: { summary: Trace }
    get: { summary: Read }
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].method, HttpMethod::Get);
}

#[test]
fn operation_parameters_shadow_path_level_ones() {
    let doc = load_document(
        r#"
openapi: "3.0.0"
info: { title: Shadow, version: "1" }
paths:
  /items:
    parameters:
      - name: limit
        in: query
        schema: { type: integer, default: 10 }
    get:
      summary: List items
      parameters:
        - name: limit
          in: query
          schema: { type: integer, default: 50 }
"#,
    )
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    assert_eq!(descriptors[0].query_params.len(), 1);
    assert_eq!(descriptors[0].query_params[0].value, "50");
}

#[test]
fn cyclic_body_schema_collapses_to_an_empty_object() {
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
    .unwrap();
    let descriptors = convert(&doc, 1, None);
    let create = &descriptors[0];
    assert_eq!(create.body_type, BodyType::Json);
    assert_eq!(
        create.body,
        "{\n  \"label\": \"\",\n  \"children\": [\n    {}\n  ]\n}"
    );
}
