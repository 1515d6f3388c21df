//! The remote database service seen as a trait, with an HTTP and an in-memory
//! implementation.

mod http;
mod inmemory;

pub use http::DatabaseClient;
pub use inmemory::{Call, InMemoryService};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use appschema_core::schema::{AttributeDescriptor, CollectionDescriptor, PermissionProfile};

use crate::error::Result;

/// A collection as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteCollection {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Response of the "list collections" endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionList {
    pub total: u64,
    pub collections: Vec<RemoteCollection>,
}

/// Response of the "list documents" endpoint. Documents are kept opaque.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    #[serde(default)]
    pub documents: Vec<Value>,
}

/// A created document; only its id matters here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteDocument {
    #[serde(rename = "$id")]
    pub id: String,
}

/// Operations the provisioner and verifier need from the database service.
#[async_trait]
pub trait SchemaService: Send + Sync {
    /// Creates a collection with the permissions of `profile`.
    async fn create_collection(
        &self,
        collection: &CollectionDescriptor,
        profile: PermissionProfile,
    ) -> Result<()>;

    /// Creates one attribute through the endpoint of its kind.
    async fn create_attribute(
        &self,
        collection_id: &str,
        attribute: &AttributeDescriptor,
    ) -> Result<()>;

    /// Lists the collections of the database.
    async fn list_collections(&self) -> Result<CollectionList>;

    /// Lists the documents of a collection.
    async fn list_documents(&self, collection_id: &str) -> Result<DocumentList>;

    /// Creates a document with an explicit id.
    async fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &Map<String, Value>,
    ) -> Result<RemoteDocument>;

    /// Deletes a document.
    async fn delete_document(&self, collection_id: &str, document_id: &str) -> Result<()>;
}
