//! Command implementations for the BUFR exporter CLI
//!
//! This module contains the main command execution logic and error handling
//! for the CLI interface. Each command is implemented in its own module for
//! better organization and maintainability.

pub mod encode;
pub mod lookup;
pub mod shared;

// Re-export the main types and functions for convenience
pub use shared::ProcessingStats;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Main command runner for the BUFR exporter
///
/// This function dispatches to the appropriate subcommand handler based on
/// CLI args. Each command is implemented in its own module:
/// - `encode`: observation-to-BUFR conversion workflow
/// - `lookup`: lookup table inspection and key resolution
pub async fn run(args: Args, token: CancellationToken) -> Result<ProcessingStats> {
    match args.get_command() {
        Commands::Encode(encode_args) => encode::run_encode(encode_args, token).await,
        Commands::Lookup(lookup_args) => lookup::run_lookup(lookup_args).await,
    }
}
