//! HTTP implementation of [`SchemaService`] (Imperative Shell).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{Map, Value};

use appschema_core::schema::{
    create_attribute_request, create_collection_request, create_document_request,
    delete_document_request, list_collections_request, list_documents_request, ApiMethod,
    ApiRequest, AttributeDescriptor, CollectionDescriptor, PermissionProfile,
};

use super::{CollectionList, DocumentList, RemoteDocument, SchemaService};
use crate::config::ServiceConfig;
use crate::error::{ClientError, Result};

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";

/// HTTP client for the database service, authenticated with a server API key.
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    client: reqwest::Client,
    endpoint: String,
    database_id: String,
}

impl DatabaseClient {
    /// Creates a client whose every request carries the project and key headers.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(PROJECT_HEADER, header_value(&config.project_id)?);
        let mut key = header_value(config.api_key.expose())?;
        key.set_sensitive(true);
        headers.insert(KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            database_id: config.database_id.clone(),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn send(&self, request: ApiRequest) -> Result<reqwest::Response> {
        let url = self.url(&request.path);
        tracing::debug!(method = ?request.method, url = %url, "Sending request");

        let builder = match request.method {
            ApiMethod::Get => self.client.get(&url),
            ApiMethod::Post => self.client.post(&url),
            ApiMethod::Delete => self.client.delete(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };
        Ok(builder.send().await?)
    }

    /// Handle responses with a JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Handle responses whose body is irrelevant.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ClientError::Config("header value contains invalid characters".to_string()))
}

async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status, body = %body, "Request failed");
    ClientError::from_status(status, &body)
}

#[async_trait]
impl SchemaService for DatabaseClient {
    async fn create_collection(
        &self,
        collection: &CollectionDescriptor,
        profile: PermissionProfile,
    ) -> Result<()> {
        let request = create_collection_request(&self.database_id, collection, profile);
        let response = self.send(request).await?;
        self.handle_empty_response(response).await
    }

    async fn create_attribute(
        &self,
        collection_id: &str,
        attribute: &AttributeDescriptor,
    ) -> Result<()> {
        let request = create_attribute_request(&self.database_id, collection_id, attribute);
        let response = self.send(request).await?;
        self.handle_empty_response(response).await
    }

    async fn list_collections(&self) -> Result<CollectionList> {
        let response = self
            .send(list_collections_request(&self.database_id))
            .await?;
        self.handle_response(response).await
    }

    async fn list_documents(&self, collection_id: &str) -> Result<DocumentList> {
        let response = self
            .send(list_documents_request(&self.database_id, collection_id))
            .await?;
        self.handle_response(response).await
    }

    async fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &Map<String, Value>,
    ) -> Result<RemoteDocument> {
        let request = create_document_request(&self.database_id, collection_id, document_id, data);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    async fn delete_document(&self, collection_id: &str, document_id: &str) -> Result<()> {
        let request = delete_document_request(&self.database_id, collection_id, document_id);
        let response = self.send(request).await?;
        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;

    fn config() -> ServiceConfig {
        ServiceConfig {
            endpoint: "https://db.example.com/v1".to_string(),
            project_id: "proj".to_string(),
            database_id: "main".to_string(),
            api_key: ApiKey::new("secret"),
        }
    }

    #[test]
    fn test_url_joins_endpoint_and_path() {
        let client = DatabaseClient::new(&config()).unwrap();
        assert_eq!(
            client.url("/databases/main/collections"),
            "https://db.example.com/v1/databases/main/collections"
        );
    }

    #[test]
    fn test_invalid_key_is_a_config_error() {
        let mut config = config();
        config.api_key = ApiKey::new("bad\nkey");
        assert!(matches!(
            DatabaseClient::new(&config),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let client = DatabaseClient::new(&config()).unwrap();
        assert!(!format!("{:?}", client).contains("secret"));
    }
}
