use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::synth::descriptor::{
    AuthType, BasicAuth, BodyType, FormField, HttpMethod, QueryParam, RequestDescriptor,
};

/// A folder record to be created by the store. Imported folders are
/// always top-level, named after the operation tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFolder {
    pub project_id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// A request record to be created by the store: a [`RequestDescriptor`]
/// with its grouping tag resolved to a folder id and stripped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRequest {
    pub project_id: i64,
    pub folder_id: Option<i64>,
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
}

impl NewRequest {
    pub fn from_descriptor(descriptor: RequestDescriptor, folder_id: Option<i64>) -> Self {
        NewRequest {
            project_id: descriptor.project_id,
            folder_id,
            name: descriptor.name,
            method: descriptor.method,
            url: descriptor.url,
            headers: descriptor.headers,
            body: descriptor.body,
            body_type: descriptor.body_type,
            query_params: descriptor.query_params,
            form_fields: descriptor.form_fields,
            auth_type: descriptor.auth_type,
            bearer_token: descriptor.bearer_token,
            basic_auth: descriptor.basic_auth,
        }
    }
}

/// The persistence collaborator. The import engine only ever creates
/// records; reading, updating, and moving them belongs to the rest of
/// the application.
pub trait CollectionStore {
    type Error: std::error::Error;

    /// Create a folder and return its id.
    fn create_folder(&mut self, folder: NewFolder) -> Result<i64, Self::Error>;

    fn create_request(&mut self, request: NewRequest) -> Result<(), Self::Error>;
}

/// Outcome of a batch import. Per-record failures never abort the batch;
/// they are counted here and reported to the user as a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub folders_created: usize,
    pub requests_created: usize,
    pub requests_failed: usize,
}

/// Distinct non-null tags in first-seen order: the folder names an
/// import will create.
pub fn distinct_tags(descriptors: &[RequestDescriptor]) -> Vec<&str> {
    let mut tags = IndexSet::new();
    for descriptor in descriptors {
        if let Some(tag) = &descriptor.tag {
            tags.insert(tag.as_str());
        }
    }
    tags.into_iter().collect()
}

/// Persist a synthesized collection through the store.
///
/// Folders are created first, sequentially, one per distinct tag, so a
/// store with concurrent internals never races on duplicate names. A
/// folder that fails to create is logged and skipped; its requests fall
/// back to the project root. Each request is then created independently;
/// failures are counted, never propagated.
pub fn persist<S: CollectionStore>(
    store: &mut S,
    project_id: i64,
    descriptors: Vec<RequestDescriptor>,
    folders_from_tags: bool,
) -> ImportReport {
    let mut report = ImportReport::default();
    let mut folder_ids: IndexMap<String, i64> = IndexMap::new();

    if folders_from_tags {
        for tag in distinct_tags(&descriptors) {
            let folder = NewFolder {
                project_id,
                name: tag.to_string(),
                parent_id: None,
            };
            match store.create_folder(folder) {
                Ok(id) => {
                    folder_ids.insert(tag.to_string(), id);
                    report.folders_created += 1;
                }
                Err(err) => log::warn!("could not create folder for tag {tag:?}: {err}"),
            }
        }
    }

    for descriptor in descriptors {
        let folder_id = descriptor
            .tag
            .as_deref()
            .and_then(|tag| folder_ids.get(tag))
            .copied();
        let name = descriptor.name.clone();
        match store.create_request(NewRequest::from_descriptor(descriptor, folder_id)) {
            Ok(()) => report.requests_created += 1,
            Err(err) => {
                report.requests_failed += 1;
                log::warn!("could not create request {name:?}: {err}");
            }
        }
    }

    report
}
