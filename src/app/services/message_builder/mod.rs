//! Builder turning observations into BUFR messages
//!
//! This module assembles one synoptic message per observation record. The
//! builder writes the configured station identity and the record timestamp,
//! applies the lookup table with per-field unit conversion, and derives the
//! fields the transmission format implies but does not carry directly:
//! sensor heights from the boom height, the barometer height from station
//! elevation, and the averaging periods for wind and radiation.
//!
//! ## Architecture
//!
//! - [`builder`] - Message assembly orchestration
//! - [`keys`] - BUFR key names and occurrence ranks for the synop template
//! - [`units`] - Unit conversions keyed by source column name
//!
//! ## Usage
//!
//! ```rust
//! use bufr_exporter::app::models::{Observation, StationMetadata};
//! use bufr_exporter::app::services::lookup::LookupTable;
//! use bufr_exporter::app::services::message_builder::MessageBuilder;
//! use bufr_exporter::bufr::MessageConfig;
//!
//! # fn example(observation: &Observation) -> bufr_exporter::Result<()> {
//! let builder = MessageBuilder::new(
//!     StationMetadata::default(),
//!     MessageConfig::default(),
//!     LookupTable::built_in(),
//! )?;
//! let (message, report) = builder.build(observation)?;
//! println!("{} fields set, {} missing", report.fields_set, report.fields_missing);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod keys;
pub mod units;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use builder::{BuildReport, MessageBuilder};
