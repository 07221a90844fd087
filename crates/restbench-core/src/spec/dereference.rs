use std::collections::HashSet;

use indexmap::IndexMap;

use super::document::{Components, SpecDocument};
use super::path::{
    MediaType, Operation, Parameter, ParameterOrRef, PathItem, RequestBodyOrRef, ResponseOrRef,
};
use super::schema::{AdditionalProperties, Schema, SchemaOrRef};
use crate::error::ResolveError;

/// Produce a copy of the document with every `#/components/...` pointer
/// replaced by an inline copy of its target.
///
/// Repeated references become independent copies, not shared structures.
/// A reference that participates in a cycle is left in place verbatim so
/// that resolution terminates; downstream value synthesis treats such a
/// leftover pointer as an opaque empty object.
pub(super) fn dereference(document: &SpecDocument) -> Result<SpecDocument, ResolveError> {
    let mut deref = Dereferencer {
        components: document.components.as_ref(),
        in_flight: HashSet::new(),
    };

    let mut resolved = document.clone();

    for item in resolved.paths.values_mut() {
        deref.path_item(item)?;
    }

    // Inline the component schemas themselves as well, so the returned
    // document is reference-free everywhere a reader might look.
    if let Some(components) = resolved.components.as_mut() {
        let mut schemas = IndexMap::with_capacity(components.schemas.len());
        for (name, schema) in std::mem::take(&mut components.schemas) {
            schemas.insert(name, deref.schema_or_ref(&schema)?);
        }
        components.schemas = schemas;
    }

    Ok(resolved)
}

struct Dereferencer<'a> {
    components: Option<&'a Components>,
    /// Reference paths currently being expanded; a repeat means a cycle.
    in_flight: HashSet<String>,
}

impl Dereferencer<'_> {
    fn path_item(&mut self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.parameters(&item.parameters)?;

        for slot in [
            &mut item.get,
            &mut item.post,
            &mut item.put,
            &mut item.patch,
            &mut item.delete,
            &mut item.head,
            &mut item.options,
            &mut item.trace,
        ] {
            if let Some(op) = slot {
                self.operation(op)?;
            }
        }
        Ok(())
    }

    fn operation(&mut self, op: &mut Operation) -> Result<(), ResolveError> {
        op.parameters = self.parameters(&op.parameters)?;

        if let Some(body) = op.request_body.take() {
            op.request_body = Some(self.request_body(&body)?);
        }

        let mut responses = IndexMap::with_capacity(op.responses.len());
        for (status, response) in std::mem::take(&mut op.responses) {
            responses.insert(status, self.response(&response)?);
        }
        op.responses = responses;

        Ok(())
    }

    fn parameters(&mut self, params: &[ParameterOrRef]) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params.iter().map(|p| self.parameter(p)).collect()
    }

    fn parameter(&mut self, param: &ParameterOrRef) -> Result<ParameterOrRef, ResolveError> {
        match param {
            ParameterOrRef::Ref { ref_path } => {
                if !self.in_flight.insert(ref_path.clone()) {
                    return Ok(param.clone());
                }
                let target = self.lookup(ref_path, "parameters", |c| &c.parameters)?;
                let resolved = self.parameter(&target);
                self.in_flight.remove(ref_path);
                resolved
            }
            ParameterOrRef::Parameter(p) => {
                let mut resolved: Parameter = p.clone();
                if let Some(schema) = &p.schema {
                    resolved.schema = Some(self.schema_or_ref(schema)?);
                }
                Ok(ParameterOrRef::Parameter(resolved))
            }
        }
    }

    fn request_body(&mut self, body: &RequestBodyOrRef) -> Result<RequestBodyOrRef, ResolveError> {
        match body {
            RequestBodyOrRef::Ref { ref_path } => {
                if !self.in_flight.insert(ref_path.clone()) {
                    return Ok(body.clone());
                }
                let target = self.lookup(ref_path, "requestBodies", |c| &c.request_bodies)?;
                let resolved = self.request_body(&target);
                self.in_flight.remove(ref_path);
                resolved
            }
            RequestBodyOrRef::RequestBody(rb) => {
                let mut resolved = rb.clone();
                resolved.content = self.content(&rb.content)?;
                Ok(RequestBodyOrRef::RequestBody(resolved))
            }
        }
    }

    fn response(&mut self, response: &ResponseOrRef) -> Result<ResponseOrRef, ResolveError> {
        match response {
            ResponseOrRef::Ref { ref_path } => {
                if !self.in_flight.insert(ref_path.clone()) {
                    return Ok(response.clone());
                }
                let target = self.lookup(ref_path, "responses", |c| &c.responses)?;
                let resolved = self.response(&target);
                self.in_flight.remove(ref_path);
                resolved
            }
            ResponseOrRef::Response(r) => {
                let mut resolved = r.clone();
                resolved.content = self.content(&r.content)?;
                Ok(ResponseOrRef::Response(resolved))
            }
        }
    }

    fn content(
        &mut self,
        content: &IndexMap<String, MediaType>,
    ) -> Result<IndexMap<String, MediaType>, ResolveError> {
        let mut resolved = IndexMap::with_capacity(content.len());
        for (content_type, media) in content {
            let mut media = media.clone();
            if let Some(schema) = media.schema.take() {
                media.schema = Some(self.schema_or_ref(&schema)?);
            }
            resolved.insert(content_type.clone(), media);
        }
        Ok(resolved)
    }

    fn schema_or_ref(&mut self, schema: &SchemaOrRef) -> Result<SchemaOrRef, ResolveError> {
        match schema {
            SchemaOrRef::Ref { ref_path } => {
                if !self.in_flight.insert(ref_path.clone()) {
                    return Ok(schema.clone());
                }
                let target = self.lookup(ref_path, "schemas", |c| &c.schemas)?;
                let resolved = self.schema_or_ref(&target);
                self.in_flight.remove(ref_path);
                resolved
            }
            SchemaOrRef::Schema(inner) => {
                Ok(SchemaOrRef::Schema(Box::new(self.schema(inner)?)))
            }
        }
    }

    fn schema(&mut self, schema: &Schema) -> Result<Schema, ResolveError> {
        let mut resolved = schema.clone();

        let mut properties = IndexMap::with_capacity(schema.properties.len());
        for (name, prop) in &schema.properties {
            properties.insert(name.clone(), self.schema_or_ref(prop)?);
        }
        resolved.properties = properties;

        if let Some(items) = &schema.items {
            resolved.items = Some(Box::new(self.schema_or_ref(items)?));
        }

        resolved.all_of = self.schema_list(&schema.all_of)?;
        resolved.one_of = self.schema_list(&schema.one_of)?;
        resolved.any_of = self.schema_list(&schema.any_of)?;

        if let Some(AdditionalProperties::Schema(extra)) = &schema.additional_properties {
            resolved.additional_properties = Some(AdditionalProperties::Schema(Box::new(
                self.schema_or_ref(extra)?,
            )));
        }

        Ok(resolved)
    }

    fn schema_list(&mut self, schemas: &[SchemaOrRef]) -> Result<Vec<SchemaOrRef>, ResolveError> {
        schemas.iter().map(|s| self.schema_or_ref(s)).collect()
    }

    fn lookup<T: Clone>(
        &self,
        ref_path: &str,
        section: &str,
        table: impl Fn(&Components) -> &IndexMap<String, T>,
    ) -> Result<T, ResolveError> {
        let name = parse_ref_name(ref_path, section)?;
        self.components
            .and_then(|c| table(c).get(name))
            .cloned()
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// Split a `#/components/<section>/<name>` pointer and check the section.
fn parse_ref_name<'a>(ref_path: &'a str, section: &str) -> Result<&'a str, ResolveError> {
    let rest = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (found, name) = rest
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if found != section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "{ref_path}: expected a {section} reference"
        )));
    }
    Ok(name)
}
