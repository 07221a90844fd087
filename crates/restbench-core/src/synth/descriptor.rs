use indexmap::IndexMap;
use serde::Serialize;

/// HTTP methods the importer synthesizes requests for. Operations using
/// any other method are skipped, not erred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

/// How the synthesized body is to be interpreted by the editor and the
/// execution engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    #[default]
    None,
    Json,
    Form,
}

/// One query-string entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub description: String,
}

/// One form-body field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub key: String,
    pub value: String,
    pub description: String,
}

/// Authentication scheme on a stored request. Imported requests always
/// start out unauthenticated; the user wires auth up afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    None,
    Bearer,
    Basic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// One importable API call, normalized to the shape the collection store
/// persists. Descriptors are transient: produced once, handed to the
/// store, and not retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub project_id: i64,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: IndexMap<String, String>,
    pub body: String,
    pub body_type: BodyType,
    pub query_params: Vec<QueryParam>,
    #[serde(rename = "form_data")]
    pub form_fields: Vec<FormField>,
    pub auth_type: AuthType,
    pub bearer_token: String,
    pub basic_auth: BasicAuth,
    /// Grouping key for folder creation during import. Not a persisted
    /// request attribute; stripped before the store sees the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}
