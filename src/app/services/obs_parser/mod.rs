//! Parser for hourly automatic-weather-station observation files
//!
//! This module provides a tolerant parser for the hourly transmission tables
//! produced by station data loggers. Files carry one header row naming the
//! columns and one row per observation hour, delimited either by whitespace
//! or by commas; the parser detects the delimiter from the header row.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`reader`] - Core parsing orchestration and file handling
//! - [`columns`] - Header analysis and required-column checks
//! - [`fields`] - Utility functions for field parsing and null handling
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use bufr_exporter::app::services::obs_parser::ObsParser;
//!
//! # async fn example() -> bufr_exporter::Result<()> {
//! let parser = ObsParser::new();
//! let result = parser.parse_file(std::path::Path::new("KAN_L_hour_v03.txt")).await?;
//!
//! println!("Parsed {} observations from {} records",
//!          result.stats.observations_parsed,
//!          result.stats.total_records);
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod fields;
pub mod reader;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columns::ColumnIndex;
pub use reader::ObsParser;
pub use stats::{ParseResult, ParseStats};
