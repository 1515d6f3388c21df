//! Client error types.

use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the database service.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Already exists: {message}")]
    Conflict { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid catalog: {0}")]
    Schema(#[from] appschema_core::schema::SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the error means the target resource is already present.
    ///
    /// Besides a 409, some deployments answer a duplicate with another status
    /// and an "already exists" message, so the message is checked too.
    pub fn is_conflict(&self) -> bool {
        match self {
            ClientError::Conflict { .. } => true,
            ClientError::ServerError { message, .. } => {
                message.to_lowercase().contains("already exists")
            }
            _ => false,
        }
    }

    /// Builds the error for a non-success status and its response body.
    ///
    /// The service answers errors with `{"message": ..., "code": ..., "type": ...}`;
    /// anything else is kept verbatim.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.to_string()
                }
            });

        match status {
            409 => ClientError::Conflict { message },
            404 => ClientError::NotFound { message },
            _ => ClientError::ServerError { status, message },
        }
    }
}
