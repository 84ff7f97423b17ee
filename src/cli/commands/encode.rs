//! Encode command implementation for the BUFR exporter
//!
//! This module contains the complete conversion workflow including
//! configuration loading, file discovery, message assembly, BUFR output,
//! and report generation.

use super::shared::{
    ProcessingStats, derive_output_path, discover_input_files, is_critical_error,
    load_configuration, resolve_lookup_table, setup_logging,
};
use crate::app::services::bufr_writer::{BufrFileWriter, WriterConfig, WritingStats};
use crate::app::services::message_builder::MessageBuilder;
use crate::app::services::obs_parser::ObsParser;
use crate::cli::args::{EncodeArgs, OutputFormat};
use crate::config::Config;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Encode command runner for the BUFR exporter
///
/// This function orchestrates the entire conversion workflow:
/// 1. Set up logging and configuration
/// 2. Discover observation files and prepare the output directory
/// 3. Encode each file into a stream of BUFR messages
/// 4. Generate summary statistics
pub async fn run_encode(args: EncodeArgs, token: CancellationToken) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    // Set up logging
    setup_logging(&args)?;

    info!("Starting BUFR export");
    debug!("Command line arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    // Load configuration with layered approach
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    // Discover observation files
    let files = discover_input_files(&args.input_path, &config.processing.file_pattern)?;
    if files.is_empty() {
        warn!(
            "No files matching '{}' found in {}",
            config.processing.file_pattern,
            args.input_path.display()
        );
        return Ok(ProcessingStats::default());
    }
    info!("Found {} observation files to encode", files.len());

    if args.dry_run {
        return run_dry_run(&config, &files);
    }

    // Resolve the lookup table and fail fast on an unusable station setup
    let lookup = resolve_lookup_table(args.lookup_path.as_deref(), &config, &args.input_path)?;
    info!(
        "Lookup table '{}' with {} mappings",
        lookup.source(),
        lookup.len()
    );

    let builder = MessageBuilder::new(
        config.station.clone(),
        config.encoding.to_message_config(),
        lookup,
    )?;
    let parser = ObsParser::new();

    let writer_config = WriterConfig::new()
        .with_force_overwrite(config.processing.force)
        .with_progress(args.show_progress());

    // Create output directory
    tokio::fs::create_dir_all(&config.processing.output_dir)
        .await
        .map_err(|e| {
            Error::io(
                format!(
                    "Failed to create output directory '{}'",
                    config.processing.output_dir.display()
                ),
                e,
            )
        })?;

    let mut stats = ProcessingStats::default();

    for (i, file) in files.iter().enumerate() {
        if token.is_cancelled() {
            return Err(Error::processing_interrupted(
                "Encoding interrupted before completion".to_string(),
            ));
        }

        info!(
            "Encoding file {} of {}: {}",
            i + 1,
            files.len(),
            file.display()
        );

        let output = derive_output_path(file, &config.processing.output_dir);
        if output.exists() && !writer_config.force_overwrite {
            info!(
                "Skipping {} (output exists, use --force to overwrite)",
                output.display()
            );
            stats.files_skipped += 1;
            continue;
        }

        match encode_file(&parser, &builder, file, &output, writer_config.clone(), &token).await {
            Ok(writing_stats) => {
                stats.files_processed += 1;
                if writing_stats.bytes_written > 0 {
                    let filename = output
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or("unknown")
                        .to_string();
                    stats
                        .output_sizes
                        .push((filename, writing_stats.bytes_written as u64));
                }
                stats.absorb_writing_stats(&writing_stats);

                info!(
                    "Completed {}: {} messages, {}",
                    output.display(),
                    writing_stats.messages_written,
                    WritingStats::format_bytes(writing_stats.bytes_written)
                );
            }
            Err(e) => {
                error!("Failed to encode {}: {}", file.display(), e);
                stats.errors_encountered += 1;

                // Continue with other files unless it's a critical error
                if is_critical_error(&e) {
                    return Err(e);
                }
            }
        }
    }

    stats.processing_time = start_time.elapsed();

    // Generate final report
    generate_final_report(&args, &stats)?;

    Ok(stats)
}

/// Perform a dry run showing what would be encoded
fn run_dry_run(config: &Config, files: &[PathBuf]) -> Result<ProcessingStats> {
    info!("Performing dry run - no files will be created");

    let mut stats = ProcessingStats::default();

    for file in files {
        let output = derive_output_path(file, &config.processing.output_dir);
        if output.exists() && !config.processing.force {
            info!("Would skip {} (output exists)", output.display());
            stats.files_skipped += 1;
        } else {
            info!("Would encode {} -> {}", file.display(), output.display());
            stats.files_processed += 1;
        }
    }

    info!(
        "Dry run complete: {} files would be encoded, {} skipped",
        stats.files_processed, stats.files_skipped
    );

    Ok(stats)
}

/// Encode one observation file into a BUFR message stream
async fn encode_file(
    parser: &ObsParser,
    builder: &MessageBuilder,
    input: &Path,
    output: &Path,
    writer_config: WriterConfig,
    token: &CancellationToken,
) -> Result<WritingStats> {
    let result = parser.parse_file(input).await?;

    if result.observations.is_empty() {
        warn!("No observations parsed from {}", input.display());
        return Ok(WritingStats::default());
    }

    let mut writer = BufrFileWriter::create(output, writer_config).await?;
    writer.setup_progress(result.observations.len());

    for observation in &result.observations {
        if token.is_cancelled() {
            return Err(Error::processing_interrupted(
                "Encoding interrupted mid-file".to_string(),
            ));
        }

        let outcome = match builder.build(observation) {
            Ok((message, report)) => message.encode().map(|encoded| (encoded, report)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((encoded, report)) => {
                writer.write_message(&encoded).await?;
                writer.absorb_report(&report);
            }
            Err(e) => {
                warn!(
                    "Skipping record {:04}-{:02}-{:02} {:02}:00: {}",
                    observation.year, observation.month, observation.day, observation.hour, e
                );
                writer.record_failure();
            }
        }
    }

    writer.finalize().await
}

/// Generate final processing report
fn generate_final_report(args: &EncodeArgs, stats: &ProcessingStats) -> Result<()> {
    info!("Generating final report");

    match args.output_format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &ProcessingStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);
    let total_size = ProcessingStats::format_size(stats.total_output_size());

    println!();
    println!("{}", "BUFR export complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Files encoded:      {}", stats.files_processed);
    println!("   Files skipped:      {}", stats.files_skipped);
    println!("   Messages written:   {}", stats.messages_written);
    println!("   Fields set:         {}", stats.fields_set);
    println!("   Fields missing:     {}", stats.fields_missing);
    println!("   Total output size:  {}", total_size);
    println!("   Processing time:    {}", duration);

    if stats.messages_failed > 0 {
        println!(
            "   {}",
            format!("Records skipped: {}", stats.messages_failed).yellow()
        );
    }

    if stats.errors_encountered > 0 {
        println!(
            "   {}",
            format!("File errors: {}", stats.errors_encountered).red()
        );
    }

    if !stats.output_sizes.is_empty() {
        println!();
        println!("{}", "Output files:".bold());
        for (filename, size) in &stats.output_sizes {
            println!("   {}: {}", filename, ProcessingStats::format_size(*size));
        }
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "files_processed": stats.files_processed,
        "files_skipped": stats.files_skipped,
        "messages_written": stats.messages_written,
        "messages_failed": stats.messages_failed,
        "fields_set": stats.fields_set,
        "fields_failed": stats.fields_failed,
        "fields_missing": stats.fields_missing,
        "errors_encountered": stats.errors_encountered,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "total_output_size_bytes": stats.total_output_size(),
        "output_files": stats.output_sizes.iter().map(|(name, size)| {
            serde_json::json!({
                "filename": name,
                "size_bytes": size
            })
        }).collect::<Vec<_>>()
    });

    println!("{}", serde_json::to_string_pretty(&json_stats).unwrap());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let out_dir = root.join("BUFR_out");
        std::fs::create_dir_all(&out_dir).unwrap();
        std::fs::write(out_dir.join("KAN_L.bufr"), b"BUFR").unwrap();

        let config = Config::default().with_output_dir(out_dir.clone());
        let files = vec![
            root.join("KAN_L_hour_v03.txt"),
            root.join("NUK_K_hour_v03.txt"),
        ];

        let stats = run_dry_run(&config, &files).unwrap();
        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.files_skipped, 1);

        // Nothing is created by a dry run
        assert!(!out_dir.join("NUK_K.bufr").exists());
    }

    #[test]
    fn test_dry_run_with_force_counts_all_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let out_dir = root.join("BUFR_out");
        std::fs::create_dir_all(&out_dir).unwrap();
        std::fs::write(out_dir.join("KAN_L.bufr"), b"BUFR").unwrap();

        let config = Config::default()
            .with_output_dir(out_dir.clone())
            .with_force(true);
        let files = vec![root.join("KAN_L_hour_v03.txt")];

        let stats = run_dry_run(&config, &files).unwrap();
        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.files_skipped, 0);
    }

    #[test]
    fn test_generate_human_report() {
        let stats = ProcessingStats {
            files_processed: 2,
            files_skipped: 1,
            messages_written: 48,
            messages_failed: 2,
            fields_set: 960,
            fields_failed: 3,
            fields_missing: 12,
            errors_encountered: 1,
            processing_time: std::time::Duration::from_secs(3),
            output_sizes: vec![("KAN_L.bufr".to_string(), 4848)],
        };

        // Should not panic
        let result = generate_human_report(&stats);
        assert!(result.is_ok());
    }

    #[test]
    fn test_generate_json_report() {
        let stats = ProcessingStats {
            files_processed: 1,
            messages_written: 24,
            processing_time: std::time::Duration::from_secs(1),
            output_sizes: vec![("KAN_L.bufr".to_string(), 2424)],
            ..Default::default()
        };

        // Should not panic
        let result = generate_json_report(&stats);
        assert!(result.is_ok());
    }
}
