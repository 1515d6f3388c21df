//! appschema CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use appschema_client::cli::{Cli, Commands, ConnectionArgs, SelectionArgs};
use appschema_client::config::{resolve, ConfigFile, ServiceConfig};
use appschema_client::output::emit_report;
use appschema_client::{DatabaseClient, InMemoryService, Provisioner, Verifier};
use appschema_core::schema::{catalog, select, validate_catalog, CollectionDescriptor};
use appschema_core::{provision, verify};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "appschema=debug,appschema_client=debug"
    } else {
        "appschema=info,appschema_client=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let console = cli.console();
    let config = if cli.command.needs_service() {
        Some(load_config(&cli.connection)?)
    } else {
        None
    };

    let code = match cli.command {
        Commands::Provision(cmd) => {
            let collections = collections(&cmd.selection)?;
            console.heading("Provisioning");
            console.field("Collections:", &collections.len().to_string());
            if !console.is_silent() && (cli.verbose || cmd.dry_run) {
                console.summary(&provision::format_plan(&collections));
            }

            let report = if cmd.dry_run {
                console.field("Target:", "in-memory (dry run)");
                let service = InMemoryService::new();
                Provisioner::new(&service, cmd.permissions.into(), cmd.pacing(), console)
                    .run(&collections)
                    .await
            } else {
                let config = require(config)?;
                console.field("Target:", &config.target_display());
                let service = DatabaseClient::new(&config)?;
                Provisioner::new(&service, cmd.permissions.into(), cmd.pacing(), console)
                    .run(&collections)
                    .await
            };

            tracing::info!(
                collections = report.collection_tally().total(),
                attributes = report.attribute_tally().total(),
                failed_collections = report.collection_tally().failed,
                failed_attributes = report.attribute_tally().failed,
                "Provisioning finished"
            );
            emit_report(
                &mut std::io::stdout(),
                &report,
                provision::format_summary(&report),
                cli.format,
                console,
            )?;
            report.exit_code()
        }
        Commands::Verify(cmd) => {
            let collections = collections(&cmd.selection)?;
            let config = require(config)?;
            console.heading("Verifying");
            console.field("Target:", &config.target_display());

            let service = DatabaseClient::new(&config)?;
            let report = Verifier::new(&service, console)
                .run(&collections, cmd.write_cycle)
                .await;

            emit_report(
                &mut std::io::stdout(),
                &report,
                verify::format_summary(&report),
                cli.format,
                console,
            )?;
            report.exit_code()
        }
        Commands::Catalog(cmd) => {
            let collections = collections(&cmd.selection)?;
            let plan = provision::format_plan(&collections);
            emit_report(&mut std::io::stdout(), &collections, plan, cli.format, console)?;
            0
        }
    };

    Ok(u8::try_from(code).unwrap_or(1))
}

/// The validated catalog subset selected on the command line.
fn collections(selection: &SelectionArgs) -> Result<Vec<CollectionDescriptor>> {
    let collections = select(catalog(selection.set.into()), &selection.only)?;
    validate_catalog(&collections).context("Built-in catalog is invalid")?;
    Ok(collections)
}

fn load_config(connection: &ConnectionArgs) -> Result<ServiceConfig> {
    let file = connection
        .config
        .as_deref()
        .map(ConfigFile::load)
        .transpose()
        .context("Failed to load config file")?;
    Ok(resolve(connection.overrides(), file)?)
}

fn require(config: Option<ServiceConfig>) -> Result<ServiceConfig> {
    config.context("Service configuration was not resolved")
}
