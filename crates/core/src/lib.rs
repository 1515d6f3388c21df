//! appschema_core - pure data and functions for provisioning and verifying the
//! application's database schema.
//!
//! Nothing in this crate performs I/O. The `appschema_client` crate is the
//! imperative shell that talks to the remote service.

pub mod apply;
pub mod provision;
pub mod schema;
pub mod tags;
pub mod verify;
