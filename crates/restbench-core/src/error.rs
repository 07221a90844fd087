use thiserror::Error;

/// Terminal failures of a specification load attempt. Either kind aborts
/// the import; the message is surfaced to the user as-is.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not valid JSON or YAML: {0}")]
    MalformedInput(String),

    #[error("invalid OpenAPI specification: {0}")]
    InvalidSpecification(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

impl From<ResolveError> for LoadError {
    fn from(err: ResolveError) -> Self {
        LoadError::InvalidSpecification(err.to_string())
    }
}
