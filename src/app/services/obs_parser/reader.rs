//! Core observation file parser implementation
//!
//! This module provides the main parser orchestration, handling file reading,
//! delimiter detection, and record extraction with per-record and per-field
//! error recovery.

use std::path::Path;

use tracing::{debug, info, warn};

use super::columns::ColumnIndex;
use super::fields;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::Observation;
use crate::constants::columns;
use crate::{Error, Result};

/// Field delimiter of an observation file, detected from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Whitespace,
    Comma,
}

/// Parser for hourly observation files
///
/// This parser focuses on essential functionality:
/// - Delimiter detection (whitespace or comma) from the header row
/// - Null-sentinel suppression so missing measurements stay missing
/// - Per-record and per-field error recovery with graceful degradation
#[derive(Debug, Default)]
pub struct ObsParser;

impl ObsParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an hourly observation file and return observations with statistics
    pub async fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing observation file: {}", file_path.display());

        let content = tokio::fs::read_to_string(file_path).await.map_err(|e| {
            Error::io_error(format!(
                "Failed to read file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let result = self.parse_content(&content)?;
        info!(
            "Parsed {} observations from {} records",
            result.stats.observations_parsed, result.stats.total_records
        );
        Ok(result)
    }

    /// Parse file content that has already been read
    pub fn parse_content(&self, content: &str) -> Result<ParseResult> {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());
        let header_line = lines
            .next()
            .ok_or_else(|| Error::table_format("header", "file is empty"))?;

        let delimiter = detect_delimiter(header_line);
        debug!("Detected {:?} delimited input", delimiter);

        let column_index = ColumnIndex::from_header(&split_line(header_line, delimiter))?;
        let (total_cols, measurement_cols) = column_index.stats();
        debug!(
            "Column layout: {} total, {} measurements",
            total_cols, measurement_cols
        );

        let mut stats = ParseStats::new();
        let mut observations = Vec::new();
        for line in lines {
            stats.total_records += 1;
            let record = split_line(line, delimiter);
            match parse_record(&record, &column_index) {
                Ok(observation) => {
                    observations.push(observation);
                    stats.observations_parsed += 1;
                }
                Err(e) => {
                    stats.records_skipped += 1;
                    stats
                        .errors
                        .push(format!("Record {}: {}", stats.total_records, e));
                    debug!("Skipped record {}: {}", stats.total_records, e);
                }
            }
        }

        if stats.total_records > 0 && !stats.is_successful() {
            warn!(
                "Only {:.1}% of records parsed cleanly ({} skipped)",
                stats.success_rate(),
                stats.records_skipped
            );
        }

        Ok(ParseResult {
            observations,
            stats,
        })
    }
}

/// Parse one data record into an observation
///
/// A record without a valid timestamp is skipped entirely; a malformed
/// measurement only drops that field.
fn parse_record(record: &[String], index: &ColumnIndex) -> Result<Observation> {
    let year = required_component(record, index, columns::YEAR)?;
    let month = required_component(record, index, columns::MONTH)?;
    let day = required_component(record, index, columns::DAY)?;
    let hour = required_component(record, index, columns::HOUR)?;

    let mut observation =
        Observation::new(year as i32, month as u32, day as u32, hour as u32);
    observation.validate()?;

    for column in index.measurement_columns() {
        let Some(position) = index.index_of(column) else {
            continue;
        };
        let Some(raw) = record.get(position) else {
            continue;
        };
        match fields::parse_measurement(raw, column) {
            Ok(Some(value)) => {
                observation.values.insert(column.to_string(), value);
                observation.texts.insert(column.to_string(), raw.trim().to_string());
            }
            Ok(None) => {}
            Err(e) => {
                // non-numeric fields stay available as text for columns
                // mapped as character data
                observation.texts.insert(column.to_string(), raw.trim().to_string());
                debug!("Field {} not numeric: {}", column, e);
            }
        }
    }

    Ok(observation)
}

/// Pull one required date/time component out of a record
fn required_component(record: &[String], index: &ColumnIndex, column: &str) -> Result<i64> {
    let position = index
        .index_of(column)
        .ok_or_else(|| Error::data_validation(format!("required column '{column}' not found")))?;
    let raw = record.get(position).ok_or_else(|| {
        Error::data_validation(format!("no value for required column '{column}'"))
    })?;
    fields::parse_date_component(raw, column)
}

/// Detect the field delimiter from the header row
fn detect_delimiter(header: &str) -> Delimiter {
    if header.contains(',') {
        Delimiter::Comma
    } else {
        Delimiter::Whitespace
    }
}

/// Split one line into fields using the detected delimiter
fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        Delimiter::Comma => line.split(',').map(|field| field.trim().to_string()).collect(),
    }
}
