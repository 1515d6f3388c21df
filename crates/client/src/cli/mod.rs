//! CLI command definitions.

pub mod catalog;
pub mod provision;
pub mod verify;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use appschema_core::schema::{CatalogSet, PermissionProfile};

use crate::config::ConfigOverrides;
use crate::output::Console;

/// Provision and verify the database schema of the application.
#[derive(Debug, Parser)]
#[command(name = "appschema")]
#[command(about = "Provision and verify the application database schema", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress progress and summary output.
    #[arg(long, global = true)]
    pub silent: bool,

    /// Log HTTP requests and other debug detail to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Environment variable holding the server API key. There is no flag for it
/// so the key never shows up in process listings or shell history.
pub const API_KEY_ENV: &str = "APPSCHEMA_API_KEY";

impl Cli {
    /// Progress printer for this invocation. JSON output keeps stdout for the
    /// report alone.
    pub fn console(&self) -> Console {
        Console::new(self.silent || self.format == OutputFormat::Json)
    }
}

/// Where the database service lives and how to authenticate against it.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// TOML file with endpoint, project_id, database_id and api_key_file.
    #[arg(long, global = true, env = "APPSCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Service endpoint, e.g. https://cloud.example.com/v1.
    #[arg(long, global = true, env = "APPSCHEMA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Project identifier.
    #[arg(long, global = true, env = "APPSCHEMA_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Database identifier.
    #[arg(long, global = true, env = "APPSCHEMA_DATABASE_ID")]
    pub database_id: Option<String>,

    /// File holding the server API key.
    #[arg(long, global = true, env = "APPSCHEMA_API_KEY_FILE")]
    pub api_key_file: Option<PathBuf>,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            project_id: self.project_id.clone(),
            database_id: self.database_id.clone(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            api_key_file: self.api_key_file.clone(),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable JSON report.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Catalog subset selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SetArg {
    /// Critical collections only.
    Core,
    /// Non-critical collections only.
    Extended,
    /// Every collection.
    #[default]
    All,
}

impl From<SetArg> for CatalogSet {
    fn from(value: SetArg) -> Self {
        match value {
            SetArg::Core => CatalogSet::Core,
            SetArg::Extended => CatalogSet::Extended,
            SetArg::All => CatalogSet::All,
        }
    }
}

/// Collection permission profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PermissionsArg {
    /// Anyone reads, users write, team admins delete.
    #[default]
    RoleBased,
    /// Anyone may do anything.
    Open,
}

impl From<PermissionsArg> for PermissionProfile {
    fn from(value: PermissionsArg) -> Self {
        match value {
            PermissionsArg::RoleBased => PermissionProfile::RoleBased,
            PermissionsArg::Open => PermissionProfile::Open,
        }
    }
}

/// Collection selection shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Catalog subset to operate on.
    #[arg(long, default_value = "all")]
    pub set: SetArg,

    /// Restrict to these collection ids (comma separated or repeated).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create missing collections and attributes.
    Provision(provision::ProvisionCommand),
    /// Check that collections exist and are usable.
    Verify(verify::VerifyCommand),
    /// Print the expected schema without contacting the service.
    Catalog(catalog::CatalogCommand),
}

impl Commands {
    /// Whether the command needs a resolved service configuration.
    pub fn needs_service(&self) -> bool {
        match self {
            Commands::Provision(cmd) => !cmd.dry_run,
            Commands::Verify(_) => true,
            Commands::Catalog(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_provision_flags() {
        let cli = Cli::try_parse_from([
            "appschema",
            "provision",
            "--set",
            "core",
            "--only",
            "users,budgets",
            "--permissions",
            "open",
            "--dry-run",
        ])
        .unwrap();
        let Commands::Provision(cmd) = cli.command else {
            panic!("expected provision");
        };
        assert_eq!(cmd.selection.set, SetArg::Core);
        assert_eq!(cmd.selection.only, vec!["users", "budgets"]);
        assert_eq!(PermissionProfile::from(cmd.permissions), PermissionProfile::Open);
        assert!(cmd.dry_run);
        assert_eq!(cmd.collection_delay_ms, 1000);
        assert_eq!(cmd.attribute_delay_ms, 500);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["appschema", "verify", "--format", "json", "--silent"])
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.silent);
        assert!(cli.command.needs_service());
    }

    #[test]
    fn test_json_format_silences_console() {
        let json = Cli::try_parse_from(["appschema", "catalog", "--format", "json"]).unwrap();
        assert!(json.console().is_silent());

        let pretty = Cli::try_parse_from(["appschema", "catalog"]).unwrap();
        assert!(!pretty.console().is_silent());

        let silent = Cli::try_parse_from(["appschema", "catalog", "--silent"]).unwrap();
        assert!(silent.console().is_silent());
    }

    #[test]
    fn test_catalog_needs_no_service() {
        let cli = Cli::try_parse_from(["appschema", "catalog"]).unwrap();
        assert!(!cli.command.needs_service());
    }
}
