//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::services::bufr_writer::WritingStats;
use crate::app::services::lookup::LookupTable;
use crate::cli::args::{EncodeArgs, LookupArgs};
use crate::config::Config;
use crate::constants::{BUFR_FILE_EXTENSION, DEFAULT_LOOKUP_FILENAME, HOURLY_STEM_SUFFIX_LEN};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of input files encoded
    pub files_processed: usize,
    /// Number of input files skipped (output already present)
    pub files_skipped: usize,
    /// Number of BUFR messages written
    pub messages_written: usize,
    /// Number of records that failed to encode
    pub messages_failed: usize,
    /// Number of BUFR fields populated across all messages
    pub fields_set: usize,
    /// Number of fields rejected during encoding
    pub fields_failed: usize,
    /// Number of fields left as BUFR missing values
    pub fields_missing: usize,
    /// Number of file-level errors encountered
    pub errors_encountered: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Fold one output file's writing statistics into the totals
    pub fn absorb_writing_stats(&mut self, stats: &WritingStats) {
        self.messages_written += stats.messages_written;
        self.messages_failed += stats.messages_failed;
        self.fields_set += stats.fields_set;
        self.fields_failed += stats.fields_failed;
        self.fields_missing += stats.fields_missing;
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging for encode command
pub fn setup_logging(args: &EncodeArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bufr_exporter={}", log_level)));

    // A global subscriber may already be installed; keep the first one.
    if args.quiet {
        // Minimal logging for quiet mode
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init();
    } else {
        // Standard logging with timestamps
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Set up structured logging for lookup command
pub fn setup_lookup_logging(args: &LookupArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bufr_exporter={}", log_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> defaults -> args)
pub fn load_configuration(args: &EncodeArgs) -> Result<Config> {
    info!("Loading configuration");

    let mut config = Config::load_layered(args.config_file.as_deref())?;

    // Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &EncodeArgs) {
    if let Some(output_path) = &args.output_path {
        config.processing.output_dir = output_path.clone();
    }
    if let Some(pattern) = &args.pattern {
        config.processing.file_pattern = pattern.clone();
    }
    if let Some(lookup_path) = &args.lookup_path {
        config.processing.lookup_path = Some(lookup_path.clone());
    }
    if args.force_overwrite {
        config.processing.force = true;
    }
}

/// Discover observation files to encode
///
/// A single input file is returned as-is. A directory is walked recursively
/// and file names are matched against the hourly glob pattern.
pub fn discover_input_files(input: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    use walkdir::WalkDir;

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(Error::file_not_found(input.display().to_string()));
    }

    let matcher = glob::Pattern::new(pattern).map_err(|e| Error::pattern(pattern, e))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(input).follow_links(false) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if matcher.matches(name) {
                files.push(path.to_path_buf());
            }
        }
    }

    // Sort files for consistent processing order
    files.sort();

    debug!(
        "Discovered {} observation files in {}",
        files.len(),
        input.display()
    );
    for file in &files {
        debug!("  Found: {}", file.display());
    }

    Ok(files)
}

/// Derive the BUFR output path for an observation file
///
/// The station name is the file stem with the transmission suffix
/// (for example `_hour_v03`) removed, so `KAN_L_hour_v03.txt` becomes
/// `KAN_L.bufr`. Stems too short to carry the suffix are used whole.
pub fn derive_output_path(input_file: &Path, output_dir: &Path) -> PathBuf {
    let stem = input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("observations");

    let cut = stem.len().saturating_sub(HOURLY_STEM_SUFFIX_LEN);
    let station = if cut > 0 && stem.is_char_boundary(cut) {
        &stem[..cut]
    } else {
        stem
    };

    output_dir.join(format!("{}.{}", station, BUFR_FILE_EXTENSION))
}

/// Resolve which lookup table to use for an encode run
///
/// Precedence: explicit `--lookup` path, then the configuration file, then a
/// `variables_bufr.csv` next to the input data, then the built-in mapping.
pub fn resolve_lookup_table(
    explicit: Option<&Path>,
    config: &Config,
    input: &Path,
) -> Result<LookupTable> {
    if let Some(path) = explicit {
        return LookupTable::load(path);
    }
    if let Some(path) = &config.processing.lookup_path {
        return LookupTable::load(path);
    }

    let data_dir = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new("."))
    };
    let sidecar = data_dir.join(DEFAULT_LOOKUP_FILENAME);
    if sidecar.is_file() {
        info!("Using lookup table next to input data: {}", sidecar.display());
        return LookupTable::load(&sidecar);
    }

    debug!("No lookup table found, using built-in mapping");
    Ok(LookupTable::built_in())
}

/// Check if an error is critical enough to stop processing
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::ProcessingInterrupted { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_processing_stats_default() {
        let stats = ProcessingStats::default();
        assert_eq!(stats.files_processed, 0);
        assert_eq!(stats.messages_written, 0);
        assert_eq!(stats.total_output_size(), 0);
    }

    #[test]
    fn test_processing_stats_total_output_size() {
        let stats = ProcessingStats {
            output_sizes: vec![
                ("KAN_L.bufr".to_string(), 1000),
                ("NUK_K.bufr".to_string(), 2000),
            ],
            ..Default::default()
        };
        assert_eq!(stats.total_output_size(), 3000);
    }

    #[test]
    fn test_absorb_writing_stats() {
        let mut stats = ProcessingStats::default();
        let writing = WritingStats {
            messages_written: 5,
            messages_failed: 1,
            bytes_written: 500,
            fields_set: 40,
            fields_failed: 2,
            fields_missing: 3,
        };

        stats.absorb_writing_stats(&writing);
        stats.absorb_writing_stats(&writing);

        assert_eq!(stats.messages_written, 10);
        assert_eq!(stats.messages_failed, 2);
        assert_eq!(stats.fields_set, 80);
        assert_eq!(stats.fields_failed, 4);
        assert_eq!(stats.fields_missing, 6);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(ProcessingStats::format_size(500), "500 B");
        assert_eq!(ProcessingStats::format_size(1536), "1.50 KB");
        assert_eq!(ProcessingStats::format_size(1048576), "1.00 MB");
        assert_eq!(ProcessingStats::format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_derive_output_path() {
        let out = Path::new("BUFR_out");

        assert_eq!(
            derive_output_path(Path::new("data/KAN_L_hour_v03.txt"), out),
            out.join("KAN_L.bufr")
        );
        assert_eq!(
            derive_output_path(Path::new("QAS_U_hour_v03.txt"), out),
            out.join("QAS_U.bufr")
        );

        // Stems at or below the suffix length are used whole
        assert_eq!(
            derive_output_path(Path::new("data.txt"), out),
            out.join("data.bufr")
        );

        // Longer stems always lose the trailing nine characters
        assert_eq!(
            derive_output_path(Path::new("KAN_L_hour.txt"), out),
            out.join("K.bufr")
        );
    }

    #[test]
    fn test_discover_input_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        std::fs::write(root.join("KAN_L_hour_v03.txt"), "data").unwrap();
        std::fs::write(root.join("KAN_L_day_v03.txt"), "data").unwrap();
        std::fs::create_dir(root.join("nested")).unwrap();
        std::fs::write(root.join("nested").join("NUK_K_hour_v03.txt"), "data").unwrap();

        let files = discover_input_files(root, "*hour*").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("KAN_L_hour_v03.txt"));
        assert!(files[1].ends_with("nested/NUK_K_hour_v03.txt"));
    }

    #[test]
    fn test_discover_input_files_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("KAN_L_day_v03.txt");
        std::fs::write(&data_file, "data").unwrap();

        // A single file bypasses the pattern
        let files = discover_input_files(&data_file, "*hour*").unwrap();
        assert_eq!(files, vec![data_file]);
    }

    #[test]
    fn test_discover_input_files_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = temp_dir.path().join("missing");
        assert!(discover_input_files(&missing, "*hour*").is_err());

        let bad_pattern = discover_input_files(temp_dir.path(), "[unclosed");
        assert!(bad_pattern.is_err());
    }

    #[test]
    fn test_resolve_lookup_table_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let config = Config::default();

        // No table anywhere falls back to the built-in mapping
        let table = resolve_lookup_table(None, &config, root).unwrap();
        assert_eq!(table.source(), "built-in");

        // A variables_bufr.csv next to the data wins over the built-in
        let sidecar = root.join(DEFAULT_LOOKUP_FILENAME);
        std::fs::write(
            &sidecar,
            "CSV_column,standard_name,type\nAirTemperature(C),airTemperature,float\n",
        )
        .unwrap();
        let table = resolve_lookup_table(None, &config, root).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.source().contains("variables_bufr.csv"));

        // An explicit path wins over the sidecar
        let custom = root.join("custom.csv");
        std::fs::write(
            &custom,
            "CSV_column,standard_name,type\nWindSpeed(m/s),windSpeed,float\n",
        )
        .unwrap();
        let table = resolve_lookup_table(Some(&custom), &config, root).unwrap();
        assert!(table.source().contains("custom.csv"));
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = Config::default();
        let args = EncodeArgs {
            output_path: Some(PathBuf::from("exported")),
            pattern: Some("*daily*".to_string()),
            force_overwrite: true,
            ..Default::default()
        };

        apply_cli_overrides(&mut config, &args);

        assert_eq!(config.processing.output_dir, PathBuf::from("exported"));
        assert_eq!(config.processing.file_pattern, "*daily*");
        assert!(config.processing.force);
    }

    #[test]
    fn test_is_critical_error() {
        let config_error = Error::configuration("bad settings".to_string());
        let interrupted = Error::processing_interrupted("ctrl-c".to_string());
        let lookup_error = Error::lookup("unknown key".to_string());

        assert!(is_critical_error(&config_error));
        assert!(is_critical_error(&interrupted));
        assert!(!is_critical_error(&lookup_error));
    }
}
