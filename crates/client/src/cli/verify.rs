//! Verify command.

use clap::Parser;

use super::SelectionArgs;

/// Check that the catalog collections exist and can be read.
#[derive(Debug, Parser)]
pub struct VerifyCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Also create and delete a scratch document in each reachable collection.
    #[arg(long)]
    pub write_cycle: bool,
}
