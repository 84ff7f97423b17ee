use bufr_exporter::cli::{args::Args, commands};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            // Cancel all operations when Ctrl+C is received
            cancellation_token.cancel();
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(bufr_exporter::Error::processing_interrupted(
                    "Encoding interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("BUFR Exporter - Weather Station Observation Converter");
    println!("=====================================================");
    println!();
    println!("Convert hourly automatic weather station observation files into");
    println!("WMO BUFR edition 4 messages on the SYNOP land station template.");
    println!();
    println!("USAGE:");
    println!("    bufr-exporter <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    encode      Encode observation files into BUFR messages (main command)");
    println!("    lookup      Inspect the column-to-BUFR-key lookup table");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Encode every hourly file under a data directory:");
    println!("    bufr-exporter encode /data/aws");
    println!();
    println!("    # Re-encode one station file with a custom lookup table:");
    println!("    bufr-exporter encode /data/aws/KAN_L_hour_v03.txt \\");
    println!("                  --lookup variables_bufr.csv --force");
    println!();
    println!("    # Check how a lookup table resolves against the template:");
    println!("    bufr-exporter lookup --lookup variables_bufr.csv --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    bufr-exporter <COMMAND> --help");
}
