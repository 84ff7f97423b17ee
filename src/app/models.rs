//! Data models for observation processing
//!
//! This module contains the core data structures for representing automatic
//! weather station observations and the station identity written into every
//! encoded message.

use crate::constants;
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Station Metadata Structure
// =============================================================================

/// Identity of the reporting station
///
/// These fields are not present in the hourly observation files, so they are
/// configured once and written into every message produced for the station.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StationMetadata {
    /// WMO block number (0-99)
    pub block_number: i64,

    /// WMO station number within the block (0-1023)
    pub station_number: i64,

    /// Station type code (0 = automatic)
    pub station_type: i64,

    /// Instrumentation-for-wind-measurement flag value
    pub wind_instrumentation: i64,

    /// Free-text station or site name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for StationMetadata {
    fn default() -> Self {
        Self {
            block_number: constants::DEFAULT_BLOCK_NUMBER,
            station_number: constants::DEFAULT_STATION_NUMBER,
            station_type: constants::STATION_TYPE_AUTOMATIC,
            wind_instrumentation: constants::WIND_INSTRUMENTATION_FLAG,
            name: None,
        }
    }
}

impl StationMetadata {
    /// Validate the identity against the ranges the template can carry
    pub fn validate(&self) -> Result<()> {
        if !(0..=99).contains(&self.block_number) {
            return Err(Error::configuration(format!(
                "block_number {} outside 0-99",
                self.block_number
            )));
        }
        if !(0..=1023).contains(&self.station_number) {
            return Err(Error::configuration(format!(
                "station_number {} outside 0-1023",
                self.station_number
            )));
        }
        if !(0..=3).contains(&self.station_type) {
            return Err(Error::configuration(format!(
                "station_type {} outside 0-3",
                self.station_type
            )));
        }
        if !(0..=15).contains(&self.wind_instrumentation) {
            return Err(Error::configuration(format!(
                "wind_instrumentation {} outside 0-15",
                self.wind_instrumentation
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Observation Record Structure
// =============================================================================

/// One timestamped record from an hourly observation file
///
/// The four date/time components are parsed eagerly because a record without
/// them cannot be encoded; every measured variable stays keyed by its source
/// column name until the lookup table maps it to a message field.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Observation year (UTC)
    pub year: i32,

    /// Observation month (1-12)
    pub month: u32,

    /// Observation day of month (1-31)
    pub day: u32,

    /// Observation hour (0-23)
    pub hour: u32,

    /// Measured values by source column name, null sentinels already removed
    pub values: HashMap<String, f64>,

    /// Raw field text by source column name, for columns mapped as character
    /// data (numeric parsing loses leading zeros)
    pub texts: HashMap<String, String>,
}

impl Observation {
    /// Create an observation with no measured values
    pub fn new(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            values: HashMap::new(),
            texts: HashMap::new(),
        }
    }

    /// The observation time as a naive UTC datetime
    ///
    /// Fails when the date components do not form a real calendar date, for
    /// example day 31 in a 30-day month.
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, 0, 0))
            .ok_or_else(|| {
                Error::data_validation(format!(
                    "invalid observation time {:04}-{:02}-{:02}T{:02}:00",
                    self.year, self.month, self.day, self.hour
                ))
            })
    }

    /// Measured value for a source column, if present in this record
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Raw field text for a source column, if present in this record
    pub fn text(&self, column: &str) -> Option<&str> {
        self.texts.get(column).map(String::as_str)
    }

    /// Validate the date/time components
    pub fn validate(&self) -> Result<()> {
        self.timestamp().map(|_| ())
    }
}
