//! Output formatting functions.

pub mod console;
pub mod json;

use std::io::Write;

pub use console::Console;

use crate::cli::OutputFormat;

/// Writes a run report in the selected format.
///
/// Pretty output goes through the console (and respects `--silent`); JSON is
/// always written to `out` since it is the machine-readable result.
pub fn emit_report<T: serde::Serialize, W: Write>(
    out: &mut W,
    report: &T,
    summary: Vec<String>,
    format: OutputFormat,
    console: Console,
) -> crate::Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", json::format_json(report)?)?,
        OutputFormat::Pretty => console.summary(&summary),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::Pacing;
    use crate::provisioner::Provisioner;
    use crate::service::InMemoryService;
    use appschema_core::provision::{format_plan, format_summary};
    use appschema_core::schema::{catalog, CatalogSet, PermissionProfile};
    use clap::Parser;

    #[tokio::test]
    async fn test_json_output_is_only_the_report() {
        let cli = Cli::try_parse_from([
            "appschema",
            "provision",
            "--dry-run",
            "--set",
            "core",
            "--format",
            "json",
        ])
        .unwrap();
        let console = cli.console();
        let collections = catalog(CatalogSet::Core);
        let service = InMemoryService::new();

        // Everything the provision command would print goes through the console.
        console.heading("Provisioning");
        console.summary(&format_plan(&collections));
        let report = Provisioner::new(&service, PermissionProfile::RoleBased, Pacing::none(), console)
            .run(&collections)
            .await;

        let mut out = Vec::new();
        emit_report(&mut out, &report, format_summary(&report), cli.format, console).unwrap();

        assert!(console.is_silent());
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["collections"].as_array().map(Vec::len), Some(collections.len()));
    }

    #[test]
    fn test_pretty_output_writes_nothing_to_out() {
        let mut out = Vec::new();
        emit_report(
            &mut out,
            &Vec::<String>::new(),
            vec!["summary".to_string()],
            OutputFormat::Pretty,
            Console::silent(),
        )
        .unwrap();
        assert!(out.is_empty());
    }
}
