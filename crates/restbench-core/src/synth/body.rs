use serde_json::Value;

use super::descriptor::{BodyType, FormField};
use super::example::{default_or_example_text, generate};
use crate::spec::path::RequestBody;
use crate::spec::schema::SchemaOrRef;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM: &str = "multipart/form-data";

/// Body synthesis result for one operation.
pub(super) struct SynthesizedBody {
    pub body_type: BodyType,
    pub body: String,
    pub form_fields: Vec<FormField>,
}

impl SynthesizedBody {
    fn none() -> Self {
        SynthesizedBody {
            body_type: BodyType::None,
            body: String::new(),
            form_fields: Vec::new(),
        }
    }
}

/// Pick a body representation from the request body's content map.
///
/// A JSON-family content type wins over form types whenever both are
/// present. Form bodies populate `form_fields` from the schema's
/// properties and leave `body` empty; anything else is `none`.
pub(super) fn synthesize(request_body: Option<&RequestBody>) -> SynthesizedBody {
    let Some(request_body) = request_body else {
        return SynthesizedBody::none();
    };

    let json_media = request_body
        .content
        .iter()
        .find(|(content_type, _)| is_json_media_type(content_type));
    if let Some((_, media)) = json_media {
        return SynthesizedBody {
            body_type: BodyType::Json,
            body: render_json_body(media.schema.as_ref()),
            form_fields: Vec::new(),
        };
    }

    let form_media = request_body
        .content
        .get(FORM_URLENCODED)
        .or_else(|| request_body.content.get(MULTIPART_FORM));
    if let Some(media) = form_media {
        return SynthesizedBody {
            body_type: BodyType::Form,
            body: String::new(),
            form_fields: form_fields(media.schema.as_ref()),
        };
    }

    SynthesizedBody::none()
}

/// `application/json` itself plus parameterized variants such as
/// `application/json; charset=utf-8`.
fn is_json_media_type(content_type: &str) -> bool {
    content_type == "application/json" || content_type.starts_with("application/json;")
}

/// String examples are emitted verbatim (the document author already
/// wrote the body text); everything else pretty-prints as JSON.
fn render_json_body(schema: Option<&SchemaOrRef>) -> String {
    let Some(schema) = schema else {
        return "{}".to_string();
    };
    match generate(schema) {
        Value::String(text) => text,
        value => serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string()),
    }
}

fn form_fields(schema: Option<&SchemaOrRef>) -> Vec<FormField> {
    let Some(SchemaOrRef::Schema(schema)) = schema else {
        return Vec::new();
    };
    schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let description = match prop {
                SchemaOrRef::Schema(p) => p.description.clone().unwrap_or_default(),
                SchemaOrRef::Ref { .. } => String::new(),
            };
            FormField {
                key: name.clone(),
                value: default_or_example_text(Some(prop)),
                description,
            }
        })
        .collect()
}
