mod body;
pub mod descriptor;
pub mod example;

pub use descriptor::{
    AuthType, BasicAuth, BodyType, FormField, HttpMethod, QueryParam, RequestDescriptor,
};
pub use example::generate;

use indexmap::IndexMap;
use serde_json::Value;

use crate::spec::document::SpecDocument;
use crate::spec::path::{
    Operation, Parameter, ParameterLocation, ParameterOrRef, PathItem, RequestBody,
    RequestBodyOrRef,
};
use crate::spec::schema::SchemaOrRef;
use example::{default_or_example_text, value_to_text};

/// The fixed method walk order. Iterating this list instead of the source
/// document's key order makes the output reproducible across runs; `trace`
/// and any non-standard method are deliberately not importable.
const METHOD_ORDER: [HttpMethod; 7] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Patch,
    HttpMethod::Delete,
    HttpMethod::Head,
    HttpMethod::Options,
];

/// Convert a dereferenced document into an ordered list of request
/// descriptors.
///
/// Paths are visited in document order and methods in the fixed
/// [`METHOD_ORDER`], so two calls on the same document produce identical
/// output. The document itself is never mutated. A well-formed document
/// cannot fail here; an empty result means the document had no importable
/// endpoints, which callers report distinctly from success.
pub fn convert(
    document: &SpecDocument,
    project_id: i64,
    base_url: Option<&str>,
) -> Vec<RequestDescriptor> {
    let base = match base_url {
        Some(url) if !url.is_empty() => url,
        _ => document
            .servers
            .first()
            .map(|server| server.url.as_str())
            .unwrap_or(""),
    };

    let mut descriptors = Vec::new();
    for (path, item) in &document.paths {
        for method in METHOD_ORDER {
            if let Some(op) = operation_slot(item, method) {
                descriptors.push(build_descriptor(base, path, item, method, op, project_id));
            }
        }
    }

    log::debug!(
        "synthesized {} request descriptors for project {project_id}",
        descriptors.len()
    );
    descriptors
}

fn operation_slot(item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
    }
}

fn build_descriptor(
    base: &str,
    path: &str,
    item: &PathItem,
    method: HttpMethod,
    op: &Operation,
    project_id: i64,
) -> RequestDescriptor {
    let params = effective_parameters(item, op);

    let full_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let substituted = substitute_path_params(&full_path, &params);
    let url = if base.is_empty() {
        substituted
    } else {
        format!("{base}{substituted}")
    };

    let mut query_params = Vec::new();
    let mut headers = IndexMap::new();
    for param in &params {
        match param.location {
            ParameterLocation::Query => query_params.push(QueryParam {
                key: param.name.clone(),
                value: default_or_example_text(param.schema.as_ref()),
                description: param.description.clone().unwrap_or_default(),
            }),
            ParameterLocation::Header => {
                headers.insert(
                    param.name.clone(),
                    default_or_example_text(param.schema.as_ref()),
                );
            }
            ParameterLocation::Path | ParameterLocation::Cookie => {}
        }
    }

    let body = body::synthesize(request_body(op));

    RequestDescriptor {
        project_id,
        name: request_name(method, path, op),
        method,
        url,
        headers,
        body: body.body,
        body_type: body.body_type,
        query_params,
        form_fields: body.form_fields,
        auth_type: AuthType::default(),
        bearer_token: String::new(),
        basic_auth: BasicAuth::default(),
        tag: op.tags.first().cloned(),
    }
}

/// Path-item parameters merged with operation parameters. Operation-level
/// declarations replace a path-level one with the same name and location
/// but keep its position in the ordering.
fn effective_parameters<'a>(item: &'a PathItem, op: &'a Operation) -> Vec<&'a Parameter> {
    let mut merged: IndexMap<(&str, ParameterLocation), &Parameter> = IndexMap::new();
    for param in item.parameters.iter().chain(&op.parameters) {
        if let ParameterOrRef::Parameter(param) = param {
            merged.insert((param.name.as_str(), param.location), param);
        }
    }
    merged.into_values().collect()
}

fn request_body(op: &Operation) -> Option<&RequestBody> {
    match op.request_body.as_ref()? {
        RequestBodyOrRef::RequestBody(body) => Some(body),
        RequestBodyOrRef::Ref { .. } => None,
    }
}

/// Summary, else operationId, else the pure method+path fallback.
fn request_name(method: HttpMethod, path: &str, op: &Operation) -> String {
    if let Some(summary) = op.summary.as_deref().filter(|s| !s.is_empty()) {
        return summary.to_string();
    }
    if let Some(id) = op.operation_id.as_deref().filter(|s| !s.is_empty()) {
        return id.to_string();
    }
    fallback_name(method, path)
}

/// Lowercase method joined to the path with every non-alphanumeric byte
/// replaced by an underscore. A pure function of its inputs so repeated
/// imports name unnamed operations identically.
fn fallback_name(method: HttpMethod, path: &str) -> String {
    let slug: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}", method.as_str().to_ascii_lowercase(), slug)
}

/// Replace each `{name}` token that has a declared path parameter with a
/// usable value. Tokens without a declaration or without any value keep
/// their literal text, signalling that a manual edit is needed.
fn substitute_path_params(template: &str, params: &[&Parameter]) -> String {
    let mut url = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        url.push_str(&rest[..open]);
        let token = &rest[open..];
        let Some(close) = token.find('}') else {
            // Unbalanced brace; emit the remainder untouched.
            url.push_str(token);
            return url;
        };
        let name = &token[1..close];
        match path_param(params, name).and_then(path_param_value) {
            Some(value) => url.push_str(&value),
            None => url.push_str(&token[..=close]),
        }
        rest = &token[close + 1..];
    }
    url.push_str(rest);
    url
}

fn path_param<'a>(params: &[&'a Parameter], name: &str) -> Option<&'a Parameter> {
    params
        .iter()
        .copied()
        .find(|p| p.location == ParameterLocation::Path && p.name == name)
}

/// Parameter example, else schema example, else schema default; explicit
/// nulls fall through to the next candidate.
fn path_param_value(param: &Parameter) -> Option<String> {
    let schema = match param.schema.as_ref() {
        Some(SchemaOrRef::Schema(schema)) => Some(schema.as_ref()),
        _ => None,
    };
    [
        param.example.as_ref(),
        schema.and_then(|s| s.example.as_ref()),
        schema.and_then(|s| s.default_value.as_ref()),
    ]
    .into_iter()
    .flatten()
    .find(|v: &&Value| !v.is_null())
    .map(value_to_text)
}
