//! Test utilities for observation parser testing
//!
//! This module provides common helper functions and fixture content used
//! across the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

mod stats_tests;

/// Helper to create whitespace-delimited hourly content
pub fn create_hourly_content() -> String {
    "\
Year MonthOfYear DayOfMonth HourOfDay(UTC) AirTemperature(C) AirPressure(hPa) RelativeHumidity(%) WindSpeed(m/s)
2023 6 15 12 -9.7 984.2 67.0 4.1
2023 6 15 13 -999 985.0 -999 3.8
2023 6 15 14 -10.2 -999.0 70.5 -999
"
    .to_string()
}

/// Helper to create comma-delimited hourly content
pub fn create_comma_content() -> String {
    "\
Year,MonthOfYear,DayOfMonth,HourOfDay(UTC),AirTemperature(C),WindDirection(d)
2023,6,15,12,-9.7,210
2023,6,15,13,-8.9,215
"
    .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
