//! Built-in column mapping for the standard hourly transmission format
//!
//! Radiation columns map to ranked keys: the synop template carries two
//! radiation replications, and downwelling/upwelling fluxes are written to
//! the first and second respectively.

use super::{LookupEntry, ValueKind};
use crate::constants::columns;

fn float_entry(csv_column: &str, standard_name: &str) -> LookupEntry {
    LookupEntry {
        csv_column: csv_column.to_string(),
        standard_name: standard_name.to_string(),
        value_kind: ValueKind::Float,
    }
}

/// Mappings applied when no lookup table is supplied
pub fn built_in_entries() -> Vec<LookupEntry> {
    vec![
        float_entry(columns::AIR_TEMPERATURE, "airTemperature"),
        float_entry(columns::AIR_PRESSURE, "nonCoordinatePressure"),
        float_entry(columns::RELATIVE_HUMIDITY, "relativeHumidity"),
        float_entry(columns::WIND_SPEED, "windSpeed"),
        float_entry(columns::WIND_DIRECTION, "windDirection"),
        float_entry(columns::CLOUD_COVER, "cloudCoverTotal"),
        float_entry(
            columns::SHORTWAVE_DOWN,
            "#1#shortWaveRadiationIntegratedOverPeriodSpecified",
        ),
        float_entry(
            columns::SHORTWAVE_UP,
            "#2#shortWaveRadiationIntegratedOverPeriodSpecified",
        ),
        float_entry(
            columns::LONGWAVE_DOWN,
            "#1#longWaveRadiationIntegratedOverPeriodSpecified",
        ),
        float_entry(
            columns::LONGWAVE_UP,
            "#2#longWaveRadiationIntegratedOverPeriodSpecified",
        ),
        float_entry(columns::LATITUDE, "latitude"),
        float_entry(columns::LONGITUDE_WEST, "longitude"),
        float_entry(columns::ELEVATION, "heightOfStationGroundAboveMeanSeaLevel"),
        float_entry(
            columns::BOOM_HEIGHT,
            "#1#heightOfSensorAboveLocalGroundOrDeckOfMarinePlatform",
        ),
    ]
}
