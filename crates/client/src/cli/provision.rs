//! Provision command.

use clap::Parser;

use super::{PermissionsArg, SelectionArgs};
use crate::config::Pacing;

/// Create every missing collection and attribute of the catalog.
#[derive(Debug, Parser)]
pub struct ProvisionCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Permission profile applied to created collections.
    #[arg(long, default_value = "role-based")]
    pub permissions: PermissionsArg,

    /// Run against an in-memory service and print the plan.
    #[arg(long)]
    pub dry_run: bool,

    /// Pause after each collection, in milliseconds.
    #[arg(long, env = "APPSCHEMA_COLLECTION_DELAY_MS", default_value_t = 1000)]
    pub collection_delay_ms: u64,

    /// Pause after each attribute, in milliseconds.
    #[arg(long, env = "APPSCHEMA_ATTRIBUTE_DELAY_MS", default_value_t = 500)]
    pub attribute_delay_ms: u64,
}

impl ProvisionCommand {
    /// Delays between remote calls. A dry run does not wait.
    pub fn pacing(&self) -> Pacing {
        if self.dry_run {
            Pacing::none()
        } else {
            Pacing::from_millis(self.collection_delay_ms, self.attribute_delay_ms)
        }
    }
}
