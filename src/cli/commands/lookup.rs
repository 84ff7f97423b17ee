//! Lookup command implementation for the BUFR exporter
//!
//! This module prints the column-to-BUFR-key mapping that an encode run
//! would use, and resolves every key against the configured template so
//! typos surface before a long conversion.

use super::shared::{ProcessingStats, setup_lookup_logging};
use crate::app::services::lookup::{LookupTable, MappingReport};
use crate::cli::args::{LookupArgs, OutputFormat};
use crate::config::Config;
use crate::Result;
use colored::Colorize;
use tracing::{debug, info};

/// Lookup command runner for the BUFR exporter
///
/// Loads the lookup table the same way the encode command would (explicit
/// path, then configuration, then built-in) and reports how each mapping
/// resolves against the configured message template.
pub async fn run_lookup(args: LookupArgs) -> Result<ProcessingStats> {
    setup_lookup_logging(&args)?;

    debug!("Command line arguments: {:?}", args);
    args.validate()?;

    let config = Config::load_layered(args.config_file.as_deref())?;
    config.validate()?;

    let table = match &args.lookup_path {
        Some(path) => LookupTable::load(path)?,
        None => match &config.processing.lookup_path {
            Some(path) => LookupTable::load(path)?,
            None => LookupTable::built_in(),
        },
    };

    info!(
        "Resolving {} mappings from '{}'",
        table.len(),
        table.source()
    );

    let report = table.report(&config.encoding.to_message_config())?;

    match args.output_format {
        OutputFormat::Human => print_human_report(&report),
        OutputFormat::Json => print_json_report(&report)?,
    }

    Ok(ProcessingStats::default())
}

/// Print the mapping report in human-readable form
fn print_human_report(report: &MappingReport) {
    println!();
    println!("{}", "Lookup table".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Source:    {}", report.source);
    println!("   Template:  {}", report.template);
    println!("   Mappings:  {}", report.entries.len());
    println!();

    for entry in &report.entries {
        let marker = if entry.resolves {
            "ok".green()
        } else {
            "unresolved".red()
        };
        println!(
            "   {:<36} -> {:<56} {:<6} [{}]",
            entry.csv_column, entry.standard_name, entry.value_kind, marker
        );
    }

    let unresolved = report.unresolved();
    if unresolved > 0 {
        println!();
        println!(
            "   {}",
            format!(
                "{} mapping(s) do not resolve against template {}",
                unresolved, report.template
            )
            .yellow()
        );
    }

    println!();
}

/// Print the mapping report as JSON for scripting
fn print_json_report(report: &MappingReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report).unwrap());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_reports_do_not_panic() {
        let table = LookupTable::built_in();
        let config = Config::default();
        let report = table.report(&config.encoding.to_message_config()).unwrap();

        print_human_report(&report);
        assert!(print_json_report(&report).is_ok());
    }

    #[tokio::test]
    async fn test_run_lookup_with_builtin_table() {
        let args = LookupArgs {
            lookup_path: None,
            config_file: None,
            output_format: OutputFormat::Json,
            verbose: 0,
        };

        let stats = run_lookup(args).await.unwrap();
        assert_eq!(stats.messages_written, 0);
    }
}
