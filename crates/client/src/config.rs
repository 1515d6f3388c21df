//! Service configuration.
//!
//! Values come from command-line flags or their environment variables first,
//! then from an optional TOML file. The API key is never read from the file
//! itself; the file may only point at a secret file holding it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use toml_edit::DocumentMut;

use crate::error::{ClientError, Result};

/// API key that does not show up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for the authentication header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Connection settings for the remote database service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// API root including the version segment, e.g. `https://db.example.com/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub api_key: ApiKey,
}

impl ServiceConfig {
    /// Returns a display string for the target, without credentials.
    pub fn target_display(&self) -> String {
        format!(
            "{} (project: {}, database: {})",
            self.endpoint, self.project_id, self.database_id
        )
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub database_id: Option<String>,
    pub api_key: Option<String>,
    pub api_key_file: Option<PathBuf>,
}

/// Values read from a TOML configuration file.
///
/// ```toml
/// endpoint = "https://db.example.com/v1"
/// project_id = "my-project"
/// database_id = "main"
/// api_key_file = "/run/secrets/appschema_api_key"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub database_id: Option<String>,
    pub api_key_file: Option<PathBuf>,
}

impl ConfigFile {
    /// Parses the TOML content of a configuration file.
    pub fn parse(content: &str) -> Result<Self> {
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| ClientError::Config(format!("Failed to parse config: {}", e)))?;

        if doc.get("api_key").is_some() {
            return Err(ClientError::Config(
                "api_key is not allowed in the config file; use api_key_file or APPSCHEMA_API_KEY"
                    .to_string(),
            ));
        }

        let string = |key: &str| -> Result<Option<String>> {
            match doc.get(key) {
                None => Ok(None),
                Some(item) => item
                    .as_str()
                    .map(|s| Some(s.to_string()))
                    .ok_or_else(|| ClientError::Config(format!("'{}' must be a string", key))),
            }
        };

        Ok(Self {
            endpoint: string("endpoint")?,
            project_id: string("project_id")?,
            database_id: string("database_id")?,
            api_key_file: string("api_key_file")?.map(PathBuf::from),
        })
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

/// Merges overrides and file values into a complete configuration.
///
/// Overrides win over the file. The API key comes from the override, then the
/// override's key file, then the file's key file.
pub fn resolve(overrides: ConfigOverrides, file: Option<ConfigFile>) -> Result<ServiceConfig> {
    let file = file.unwrap_or_default();

    let required = |value: Option<String>, name: &str, env: &str| -> Result<String> {
        value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
            ClientError::Config(format!("missing {} (set --{} or {})", name, name, env))
        })
    };

    let endpoint = required(
        overrides.endpoint.or(file.endpoint),
        "endpoint",
        "APPSCHEMA_ENDPOINT",
    )?;
    let project_id = required(
        overrides.project_id.or(file.project_id),
        "project-id",
        "APPSCHEMA_PROJECT_ID",
    )?;
    let database_id = required(
        overrides.database_id.or(file.database_id),
        "database-id",
        "APPSCHEMA_DATABASE_ID",
    )?;

    let api_key = match (overrides.api_key, overrides.api_key_file.or(file.api_key_file)) {
        (Some(key), _) => key,
        (None, Some(path)) => read_key_file(&path)?,
        (None, None) => String::new(),
    };
    if api_key.is_empty() {
        return Err(ClientError::Config(
            "missing api key (set APPSCHEMA_API_KEY or --api-key-file)".to_string(),
        ));
    }

    Ok(ServiceConfig {
        endpoint: endpoint.trim_end_matches('/').to_string(),
        project_id,
        database_id,
        api_key: ApiKey::new(api_key),
    })
}

fn read_key_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            ClientError::Config(format!("Failed to read key file {}: {}", path.display(), e))
        })
}

/// Fixed delays that keep a run under the service's rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Wait after creating a collection, before its attributes.
    pub after_collection: Duration,
    /// Wait after every attribute call, whatever its outcome.
    pub after_attribute: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            after_collection: Duration::from_millis(1000),
            after_attribute: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    /// No delays at all, for the in-memory backend.
    pub fn none() -> Self {
        Self {
            after_collection: Duration::ZERO,
            after_attribute: Duration::ZERO,
        }
    }

    pub fn from_millis(after_collection: u64, after_attribute: u64) -> Self {
        Self {
            after_collection: Duration::from_millis(after_collection),
            after_attribute: Duration::from_millis(after_attribute),
        }
    }
}
