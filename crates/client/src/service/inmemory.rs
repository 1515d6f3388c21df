//! In-memory implementation of [`SchemaService`].
//!
//! Backs `provision --dry-run` and the tests. It answers like the remote
//! service does (409 on duplicates, 404 on unknown collections), records every
//! call in order, and can be told to fail specific operations.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use appschema_core::schema::{
    attribute_endpoint, AttributeDescriptor, CollectionDescriptor, PermissionProfile,
};

use super::{CollectionList, DocumentList, RemoteCollection, RemoteDocument, SchemaService};
use crate::error::{ClientError, Result};

/// One recorded call against the in-memory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateCollection {
        id: String,
    },
    CreateAttribute {
        collection_id: String,
        key: String,
        endpoint: &'static str,
    },
    ListCollections,
    ListDocuments {
        collection_id: String,
    },
    CreateDocument {
        collection_id: String,
        document_id: String,
    },
    DeleteDocument {
        collection_id: String,
        document_id: String,
    },
}

#[derive(Debug, Clone)]
struct StoredCollection {
    name: String,
    permissions: Vec<String>,
    attributes: Vec<AttributeDescriptor>,
    documents: HashMap<String, Map<String, Value>>,
}

#[derive(Debug, Default)]
struct Failures {
    collections: HashSet<String>,
    attributes: HashSet<(String, String)>,
    reads: HashSet<String>,
    writes: HashSet<String>,
    deletes: HashSet<String>,
}

#[derive(Debug, Default)]
struct State {
    order: Vec<String>,
    collections: HashMap<String, StoredCollection>,
    calls: Vec<Call>,
    failures: Failures,
}

/// In-memory database service.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryService {
    state: Arc<RwLock<State>>,
}

fn rejected(message: String) -> ClientError {
    ClientError::ServerError {
        status: 500,
        message,
    }
}

fn unauthorized(message: String) -> ClientError {
    ClientError::ServerError {
        status: 401,
        message,
    }
}

fn collection_not_found(id: &str) -> ClientError {
    ClientError::NotFound {
        message: format!("Collection with the requested ID '{}' could not be found.", id),
    }
}

impl InMemoryService {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes creation of collection `id` fail with a server error.
    pub async fn fail_collection(&self, id: &str) {
        self.state.write().await.failures.collections.insert(id.to_string());
    }

    /// Makes creation of attribute `key` in `collection_id` fail with a server error.
    pub async fn fail_attribute(&self, collection_id: &str, key: &str) {
        self.state
            .write()
            .await
            .failures
            .attributes
            .insert((collection_id.to_string(), key.to_string()));
    }

    /// Makes document listing of `collection_id` fail.
    pub async fn deny_reads(&self, collection_id: &str) {
        self.state.write().await.failures.reads.insert(collection_id.to_string());
    }

    /// Makes document creation in `collection_id` fail.
    pub async fn deny_writes(&self, collection_id: &str) {
        self.state.write().await.failures.writes.insert(collection_id.to_string());
    }

    /// Makes document deletion in `collection_id` fail.
    pub async fn deny_deletes(&self, collection_id: &str) {
        self.state.write().await.failures.deletes.insert(collection_id.to_string());
    }

    /// Returns every call made so far, in order.
    pub async fn calls(&self) -> Vec<Call> {
        self.state.read().await.calls.clone()
    }

    /// Forgets recorded calls, keeping stored data.
    pub async fn clear_calls(&self) {
        self.state.write().await.calls.clear();
    }

    /// Attribute keys stored for a collection, in creation order.
    pub async fn attribute_keys(&self, collection_id: &str) -> Option<Vec<String>> {
        self.state
            .read()
            .await
            .collections
            .get(collection_id)
            .map(|c| c.attributes.iter().map(|a| a.key.clone()).collect())
    }

    /// Permissions stored for a collection.
    pub async fn permissions(&self, collection_id: &str) -> Option<Vec<String>> {
        self.state
            .read()
            .await
            .collections
            .get(collection_id)
            .map(|c| c.permissions.clone())
    }

    /// Number of documents in a collection.
    pub async fn document_count(&self, collection_id: &str) -> Option<usize> {
        self.state
            .read()
            .await
            .collections
            .get(collection_id)
            .map(|c| c.documents.len())
    }
}

#[async_trait]
impl SchemaService for InMemoryService {
    async fn create_collection(
        &self,
        collection: &CollectionDescriptor,
        profile: PermissionProfile,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.push(Call::CreateCollection {
            id: collection.id.clone(),
        });

        if state.failures.collections.contains(&collection.id) {
            return Err(rejected(format!(
                "Server error creating collection '{}'",
                collection.id
            )));
        }
        if state.collections.contains_key(&collection.id) {
            return Err(ClientError::Conflict {
                message: "Collection with the requested ID already exists.".to_string(),
            });
        }

        state.order.push(collection.id.clone());
        state.collections.insert(
            collection.id.clone(),
            StoredCollection {
                name: collection.name.clone(),
                permissions: profile.permissions(),
                attributes: Vec::new(),
                documents: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn create_attribute(
        &self,
        collection_id: &str,
        attribute: &AttributeDescriptor,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.push(Call::CreateAttribute {
            collection_id: collection_id.to_string(),
            key: attribute.key.clone(),
            endpoint: attribute_endpoint(attribute.kind),
        });

        let failing = state
            .failures
            .attributes
            .contains(&(collection_id.to_string(), attribute.key.clone()));
        let stored = state
            .collections
            .get_mut(collection_id)
            .ok_or_else(|| collection_not_found(collection_id))?;

        if failing {
            return Err(rejected(format!(
                "Server error creating attribute '{}'",
                attribute.key
            )));
        }
        if stored.attributes.iter().any(|a| a.key == attribute.key) {
            return Err(ClientError::Conflict {
                message: "Attribute with the requested key already exists.".to_string(),
            });
        }

        stored.attributes.push(attribute.clone());
        Ok(())
    }

    async fn list_collections(&self) -> Result<CollectionList> {
        let mut state = self.state.write().await;
        state.calls.push(Call::ListCollections);

        let collections: Vec<RemoteCollection> = state
            .order
            .iter()
            .filter_map(|id| {
                state.collections.get(id).map(|c| RemoteCollection {
                    id: id.clone(),
                    name: c.name.clone(),
                })
            })
            .collect();
        Ok(CollectionList {
            total: collections.len() as u64,
            collections,
        })
    }

    async fn list_documents(&self, collection_id: &str) -> Result<DocumentList> {
        let mut state = self.state.write().await;
        state.calls.push(Call::ListDocuments {
            collection_id: collection_id.to_string(),
        });

        if state.failures.reads.contains(collection_id) {
            return Err(unauthorized(
                "The current user is not authorized to perform the requested action.".to_string(),
            ));
        }
        let stored = state
            .collections
            .get(collection_id)
            .ok_or_else(|| collection_not_found(collection_id))?;

        let documents: Vec<Value> = stored
            .documents
            .iter()
            .map(|(id, data)| {
                let mut doc = data.clone();
                doc.insert("$id".to_string(), Value::from(id.as_str()));
                Value::Object(doc)
            })
            .collect();
        Ok(DocumentList {
            total: documents.len() as u64,
            documents,
        })
    }

    async fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &Map<String, Value>,
    ) -> Result<RemoteDocument> {
        let mut state = self.state.write().await;
        state.calls.push(Call::CreateDocument {
            collection_id: collection_id.to_string(),
            document_id: document_id.to_string(),
        });

        let denied = state.failures.writes.contains(collection_id);
        let stored = state
            .collections
            .get_mut(collection_id)
            .ok_or_else(|| collection_not_found(collection_id))?;

        if denied {
            return Err(unauthorized(
                "The current user is not authorized to perform the requested action.".to_string(),
            ));
        }
        if let Some(missing) = stored
            .attributes
            .iter()
            .find(|a| a.required && !data.contains_key(&a.key))
        {
            return Err(ClientError::ServerError {
                status: 400,
                message: format!("Invalid document structure: Missing required attribute \"{}\"", missing.key),
            });
        }
        if stored.documents.contains_key(document_id) {
            return Err(ClientError::Conflict {
                message: "Document with the requested ID already exists.".to_string(),
            });
        }

        stored.documents.insert(document_id.to_string(), data.clone());
        Ok(RemoteDocument {
            id: document_id.to_string(),
        })
    }

    async fn delete_document(&self, collection_id: &str, document_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.push(Call::DeleteDocument {
            collection_id: collection_id.to_string(),
            document_id: document_id.to_string(),
        });

        let denied = state.failures.deletes.contains(collection_id);
        let stored = state
            .collections
            .get_mut(collection_id)
            .ok_or_else(|| collection_not_found(collection_id))?;

        if denied {
            return Err(unauthorized(
                "The current user is not authorized to perform the requested action.".to_string(),
            ));
        }
        stored
            .documents
            .remove(document_id)
            .map(|_| ())
            .ok_or_else(|| ClientError::NotFound {
                message: "Document with the requested ID could not be found.".to_string(),
            })
    }
}
