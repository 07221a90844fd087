use serde_json::{Map, Value};

use crate::spec::schema::{SchemaOrRef, SchemaType, TypeSet};

/// Nesting bound for value synthesis. Dereferencing leaves cyclic `$ref`
/// pointers in place and those collapse to `{}` immediately, so the bound
/// only matters for pathologically deep inline schemas.
const MAX_DEPTH: usize = 32;

/// Synthesize an example value for a schema.
///
/// Explicit `example` and `default` values are returned verbatim, without
/// recursing into them. Otherwise the value is built from the declared
/// type: objects carry every declared property (zero-valued when nothing
/// better is known), arrays get a single representative element, strings
/// prefer their first `enum` entry, numbers their `minimum`. A schema
/// with no usable type yields `{}`.
pub fn generate(schema: &SchemaOrRef) -> Value {
    generate_at(schema, 0)
}

fn generate_at(schema: &SchemaOrRef, depth: usize) -> Value {
    if depth >= MAX_DEPTH {
        return Value::Object(Map::new());
    }

    let schema = match schema {
        SchemaOrRef::Schema(schema) => schema,
        // Only reference cycles survive dereferencing; opaque from here.
        SchemaOrRef::Ref { .. } => return Value::Object(Map::new()),
    };

    if let Some(example) = &schema.example {
        return example.clone();
    }
    if let Some(default) = &schema.default_value {
        return default.clone();
    }

    match schema.schema_type.as_ref().and_then(TypeSet::primary) {
        Some(SchemaType::Object) => {
            let mut object = Map::with_capacity(schema.properties.len());
            for (name, prop) in &schema.properties {
                object.insert(name.clone(), generate_at(prop, depth + 1));
            }
            Value::Object(object)
        }
        Some(SchemaType::Array) => Value::Array(
            schema
                .items
                .as_deref()
                .map(|items| vec![generate_at(items, depth + 1)])
                .unwrap_or_default(),
        ),
        Some(SchemaType::String) => schema
            .enum_values
            .first()
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())),
        Some(SchemaType::Number) | Some(SchemaType::Integer) => schema
            .minimum
            .map(number_value)
            .unwrap_or_else(|| Value::from(0)),
        Some(SchemaType::Boolean) => Value::Bool(false),
        Some(SchemaType::Null) => Value::Null,
        None => Value::Object(Map::new()),
    }
}

/// Integral minima render without a fractional part, so an integer field
/// with `minimum: 5` becomes `5`, not `5.0`.
fn number_value(minimum: f64) -> Value {
    if minimum.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&minimum) {
        Value::from(minimum as i64)
    } else {
        Value::from(minimum)
    }
}

/// Render a JSON value for use in a URL, header, or form field. Strings
/// go in bare; everything else uses its JSON rendering.
pub(super) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The `default`-then-`example` value chain used for query parameters,
/// headers, and form fields. An explicit JSON `null` counts as absent;
/// a bare `default:` key in YAML must not put "null" into a URL.
pub(super) fn default_or_example_text(schema: Option<&SchemaOrRef>) -> String {
    let Some(SchemaOrRef::Schema(schema)) = schema else {
        return String::new();
    };
    schema
        .default_value
        .as_ref()
        .filter(|v| !v.is_null())
        .or(schema.example.as_ref().filter(|v| !v.is_null()))
        .map(value_to_text)
        .unwrap_or_default()
}
