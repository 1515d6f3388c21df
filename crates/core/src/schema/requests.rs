//! Pure construction of remote API requests.
//!
//! The remote service exposes one attribute-creation endpoint per scalar kind,
//! each with a slightly different body. Everything here is data in, data out;
//! the HTTP client only sends what these functions build.

use serde_json::{json, Map, Value};

use super::types::{AttributeDescriptor, AttributeKind, CollectionDescriptor, PermissionProfile};

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Delete,
}

/// A request to the remote database service, relative to its `/v1` root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn get(path: String) -> Self {
        Self {
            method: ApiMethod::Get,
            path,
            body: None,
        }
    }

    fn post(path: String, body: Value) -> Self {
        Self {
            method: ApiMethod::Post,
            path,
            body: Some(body),
        }
    }

    fn delete(path: String) -> Self {
        Self {
            method: ApiMethod::Delete,
            path,
            body: None,
        }
    }
}

/// Path segment of the attribute endpoint for `kind`.
pub fn attribute_endpoint(kind: AttributeKind) -> &'static str {
    kind.as_str()
}

fn collections_path(database_id: &str) -> String {
    format!("/databases/{}/collections", database_id)
}

fn documents_path(database_id: &str, collection_id: &str) -> String {
    format!(
        "{}/{}/documents",
        collections_path(database_id),
        collection_id
    )
}

/// Builds the "create collection" request.
pub fn create_collection_request(
    database_id: &str,
    collection: &CollectionDescriptor,
    profile: PermissionProfile,
) -> ApiRequest {
    ApiRequest::post(
        collections_path(database_id),
        json!({
            "collectionId": collection.id,
            "name": collection.name,
            "permissions": profile.permissions(),
            "documentSecurity": false,
            "enabled": true,
        }),
    )
}

/// Builds the "create attribute" request, dispatching on the attribute kind.
pub fn create_attribute_request(
    database_id: &str,
    collection_id: &str,
    attribute: &AttributeDescriptor,
) -> ApiRequest {
    let path = format!(
        "{}/{}/attributes/{}",
        collections_path(database_id),
        collection_id,
        attribute_endpoint(attribute.kind)
    );
    ApiRequest::post(path, attribute_body(attribute))
}

fn attribute_body(attribute: &AttributeDescriptor) -> Value {
    let mut body = Map::new();
    body.insert("key".into(), json!(attribute.key));
    body.insert("required".into(), json!(attribute.required));
    body.insert("array".into(), json!(attribute.array));

    match attribute.kind {
        AttributeKind::String => {
            body.insert("size".into(), json!(attribute.size.unwrap_or_default()));
        }
        AttributeKind::Integer => {
            // The integer endpoint rejects fractional bounds.
            if let Some(min) = attribute.min {
                body.insert("min".into(), json!(min as i64));
            }
            if let Some(max) = attribute.max {
                body.insert("max".into(), json!(max as i64));
            }
        }
        AttributeKind::Float => {
            if let Some(min) = attribute.min {
                body.insert("min".into(), json!(min));
            }
            if let Some(max) = attribute.max {
                body.insert("max".into(), json!(max));
            }
        }
        AttributeKind::Boolean
        | AttributeKind::Datetime
        | AttributeKind::Email
        | AttributeKind::Url => {}
    }

    if let Some(default) = &attribute.default {
        body.insert("default".into(), default.to_json());
    }

    Value::Object(body)
}

/// Builds the "list collections" request.
pub fn list_collections_request(database_id: &str) -> ApiRequest {
    ApiRequest::get(collections_path(database_id))
}

/// Builds the "list documents" request.
pub fn list_documents_request(database_id: &str, collection_id: &str) -> ApiRequest {
    ApiRequest::get(documents_path(database_id, collection_id))
}

/// Builds the "create document" request.
pub fn create_document_request(
    database_id: &str,
    collection_id: &str,
    document_id: &str,
    data: &Map<String, Value>,
) -> ApiRequest {
    ApiRequest::post(
        documents_path(database_id, collection_id),
        json!({
            "documentId": document_id,
            "data": data,
        }),
    )
}

/// Builds the "delete document" request.
pub fn delete_document_request(
    database_id: &str,
    collection_id: &str,
    document_id: &str,
) -> ApiRequest {
    ApiRequest::delete(format!(
        "{}/{}",
        documents_path(database_id, collection_id),
        document_id
    ))
}
