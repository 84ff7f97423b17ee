//! Command-line argument definitions for the BUFR exporter
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the AWS BUFR exporter
///
/// Converts hourly automatic weather station observation files into WMO
/// BUFR edition 4 messages on the SYNOP land station template.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bufr-exporter",
    version,
    about = "Convert automatic weather station observations to WMO BUFR edition 4",
    long_about = "Encodes hourly automatic weather station observation files into WMO BUFR \
                  edition 4 messages using the SYNOP land station template (307080). Each \
                  observation record becomes one single-subset message; messages for a station \
                  are concatenated into one .bufr file ready for GTS distribution. Values are \
                  converted to SI units, sentinel and malformed fields are encoded as BUFR \
                  missing values, and a lookup table maps observation columns to BUFR keys."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the BUFR exporter
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Encode observation files into BUFR messages (default command)
    Encode(EncodeArgs),
    /// Inspect the column-to-BUFR-key lookup table
    Lookup(LookupArgs),
}

/// Arguments for the encode command (main conversion)
#[derive(Debug, Clone, Parser)]
pub struct EncodeArgs {
    /// Input observation file or directory
    ///
    /// A directory is searched recursively for files whose names match the
    /// hourly file pattern. A single file is encoded as-is, regardless of
    /// the pattern.
    #[arg(value_name = "PATH", help = "Input observation file or directory")]
    pub input_path: PathBuf,

    /// Output directory for generated BUFR files
    ///
    /// Will be created if it doesn't exist. Generated files are named after
    /// the station, like KAN_L.bufr. If not specified, defaults to ./BUFR_out
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for generated BUFR files"
    )]
    pub output_path: Option<PathBuf>,

    /// Path to the lookup table CSV
    ///
    /// Maps observation column headers to BUFR keys. If not specified, a
    /// variables_bufr.csv next to the input data is used when present,
    /// falling back to the built-in mapping.
    #[arg(
        short = 'l',
        long = "lookup",
        value_name = "FILE",
        help = "Path to the lookup table CSV"
    )]
    pub lookup_path: Option<PathBuf>,

    /// Glob pattern selecting hourly files within the input directory
    ///
    /// Matched against file names, not full paths. If not specified,
    /// defaults to *hour*
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "GLOB",
        help = "Glob pattern selecting hourly files"
    )]
    pub pattern: Option<String>,

    /// Path to configuration file
    ///
    /// TOML configuration file for station identity and encoding settings.
    /// If not specified, looks for ~/.config/bufr-exporter/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Perform a dry run without actual encoding
    ///
    /// Shows which files would be encoded and which output files would be
    /// written, without creating anything.
    #[arg(
        long = "dry-run",
        help = "Show what would be encoded without writing output files"
    )]
    pub dry_run: bool,

    /// Force overwrite of existing output files
    ///
    /// By default, input files whose BUFR output already exists are skipped.
    /// This flag forces re-encoding.
    #[arg(long = "force", help = "Force overwrite of existing output files")]
    pub force_overwrite: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for machine-readable results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the lookup command (mapping inspection)
#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    /// Path to the lookup table CSV to inspect
    ///
    /// If not specified, the lookup table from the configuration file is
    /// used, falling back to the built-in mapping.
    #[arg(
        short = 'l',
        long = "lookup",
        value_name = "FILE",
        help = "Path to the lookup table CSV to inspect"
    )]
    pub lookup_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file providing the encoding settings the mapping
    /// is resolved against.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for the mapping report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the mapping report"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl EncodeArgs {
    /// Validate the encode command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        // Validate lookup file exists if specified
        if let Some(lookup_path) = &self.lookup_path {
            if !lookup_path.is_file() {
                return Err(Error::configuration(format!(
                    "Lookup table does not exist: {}",
                    lookup_path.display()
                )));
            }
        }

        // Validate pattern is non-empty if specified
        if let Some(pattern) = &self.pattern {
            if pattern.trim().is_empty() {
                return Err(Error::configuration(
                    "File pattern cannot be empty".to_string(),
                ));
            }
        }

        // Validate config file exists if specified
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl LookupArgs {
    /// Validate the lookup command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(lookup_path) = &self.lookup_path {
            if !lookup_path.is_file() {
                return Err(Error::configuration(format!(
                    "Lookup table does not exist: {}",
                    lookup_path.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for EncodeArgs {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("."),
            output_path: None,
            lookup_path: None,
            pattern: None,
            config_file: None,
            dry_run: false,
            force_overwrite: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}
