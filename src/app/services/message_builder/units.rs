//! Unit conversions between logger columns and BUFR units
//!
//! The transmission format names its units in the column headers, so the
//! conversion for a value is keyed by its source column: temperatures arrive
//! in degrees Celsius, pressures in hectopascals, and longitudes in degrees
//! west. Columns without an entry here pass through unchanged.

use crate::constants::{self, columns};

/// Convert degrees Celsius to kelvin
pub fn celsius_to_kelvin(value: f64) -> f64 {
    value + constants::CELSIUS_TO_KELVIN_OFFSET
}

/// Convert hectopascals to pascals
pub fn hectopascal_to_pascal(value: f64) -> f64 {
    value * constants::HECTOPASCAL_TO_PASCAL
}

/// Convert degrees west to the degrees-east convention of BUFR
pub fn degrees_west_to_east(value: f64) -> f64 {
    -value
}

/// Convert a measurement from its column's unit to the BUFR unit
pub fn convert_for_column(column: &str, value: f64) -> f64 {
    match column {
        columns::AIR_TEMPERATURE => celsius_to_kelvin(value),
        columns::AIR_PRESSURE => hectopascal_to_pascal(value),
        columns::LONGITUDE_WEST => degrees_west_to_east(value),
        _ => value,
    }
}
