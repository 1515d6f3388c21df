//! Catalog command.

use clap::Parser;

use super::SelectionArgs;

/// Print the expected collections and attributes.
#[derive(Debug, Parser)]
pub struct CatalogCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,
}
