mod dereference;
pub mod document;
pub mod path;
pub mod schema;

pub use document::SpecDocument;

use crate::error::LoadError;

/// The raw text parsed into a generic tree, before any shape checking.
/// Which parser succeeded decides which deserializer runs next.
enum Tree {
    Json(serde_json::Value),
    Yaml(serde_yaml_ng::Value),
}

/// Turn raw file text into a validated, fully dereferenced document.
///
/// The input may be JSON or YAML; JSON is attempted first. Failures are
/// terminal for the import attempt: [`LoadError::MalformedInput`] when the
/// text is neither format, [`LoadError::InvalidSpecification`] when it
/// parses but is not an OpenAPI 3.x document or a reference cannot be
/// resolved.
pub fn load_document(input: &str) -> Result<SpecDocument, LoadError> {
    let tree = parse_tree(input)?;
    let document = deserialize_document(tree)?;
    validate_version(&document)?;

    let resolved = dereference::dereference(&document)?;
    log::debug!(
        "loaded specification {:?} ({} paths, {} operations)",
        resolved.info.title,
        resolved.paths.len(),
        resolved.operation_count(),
    );
    Ok(resolved)
}

fn parse_tree(input: &str) -> Result<Tree, LoadError> {
    match serde_json::from_str(input) {
        Ok(value) => Ok(Tree::Json(value)),
        // Nearly every JSON document is also YAML, so when both parsers
        // reject the text the YAML message is the operative one.
        Err(_) => match serde_yaml_ng::from_str(input) {
            Ok(value) => Ok(Tree::Yaml(value)),
            Err(yaml_err) => Err(LoadError::MalformedInput(yaml_err.to_string())),
        },
    }
}

fn deserialize_document(tree: Tree) -> Result<SpecDocument, LoadError> {
    match tree {
        Tree::Json(value) => {
            serde_json::from_value(value).map_err(|e| LoadError::InvalidSpecification(e.to_string()))
        }
        Tree::Yaml(value) => serde_yaml_ng::from_value(value)
            .map_err(|e| LoadError::InvalidSpecification(e.to_string())),
    }
}

fn validate_version(document: &SpecDocument) -> Result<(), LoadError> {
    match (&document.openapi, &document.swagger) {
        (Some(version), _) if version.starts_with("3.") => Ok(()),
        (Some(version), _) => Err(LoadError::InvalidSpecification(format!(
            "unsupported OpenAPI version {version}; only 3.x documents are supported"
        ))),
        (None, Some(version)) => Err(LoadError::InvalidSpecification(format!(
            "Swagger {version} documents are not supported; convert to OpenAPI 3.x first"
        ))),
        (None, None) => Err(LoadError::InvalidSpecification(
            "missing `openapi` version field".to_string(),
        )),
    }
}
