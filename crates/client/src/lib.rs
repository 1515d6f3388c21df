//! appschema_client - provisions and verifies the application database schema.

pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod provisioner;
pub mod service;
pub mod verifier;

pub use error::{ClientError, Result};
pub use provisioner::Provisioner;
pub use service::{DatabaseClient, InMemoryService, SchemaService};
pub use verifier::Verifier;
