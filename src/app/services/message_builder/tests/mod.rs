//! Test utilities for message builder testing

use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::models::Observation;
use crate::app::services::lookup::LookupTable;
use crate::bufr::BufrValue;
use crate::constants::columns;


/// Helper to create an observation with every standard column populated
/// except CloudCover
pub fn create_full_observation() -> Observation {
    let mut obs = Observation::new(2023, 6, 15, 12);
    let values = [
        (columns::AIR_TEMPERATURE, -9.7),
        (columns::AIR_PRESSURE, 984.2),
        (columns::RELATIVE_HUMIDITY, 67.0),
        (columns::WIND_SPEED, 4.1),
        (columns::WIND_DIRECTION, 210.0),
        (columns::SHORTWAVE_DOWN, 312.0),
        (columns::SHORTWAVE_UP, 215.0),
        (columns::LONGWAVE_DOWN, 288.0),
        (columns::LONGWAVE_UP, 301.0),
        (columns::LATITUDE, 67.0666),
        (columns::LONGITUDE_WEST, 50.1),
        (columns::ELEVATION, 665.0),
        (columns::BOOM_HEIGHT, 2.6),
    ];
    for (column, value) in values {
        obs.values.insert(column.to_string(), value);
    }
    obs
}

/// Helper to create an observation with only the timestamp populated
pub fn create_bare_observation() -> Observation {
    Observation::new(2023, 6, 15, 12)
}

/// Helper to load a lookup table from literal rows
pub fn create_lookup_with(rows: &str) -> LookupTable {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "CSV_column,standard_name,type").unwrap();
    write!(temp_file, "{}", rows).unwrap();
    LookupTable::load(temp_file.path()).unwrap()
}

/// Assert a field holds a double close to `expected`
pub fn assert_double(value: Option<&BufrValue>, expected: f64) {
    match value {
        Some(BufrValue::Double(v)) => {
            assert!(
                (v - expected).abs() < 1e-9,
                "expected {expected}, got {v}"
            );
        }
        other => panic!("expected Double({expected}), got {other:?}"),
    }
}
