//! BUFR key names and occurrence ranks for the synop land-station template
//!
//! Several element names occur many times in the expanded template; the rank
//! constants here pin down which occurrence belongs to which instrument, so
//! the builder addresses them without counting descriptors at every call.

// =============================================================================
// Station Identity Keys
// =============================================================================

pub const BLOCK_NUMBER: &str = "blockNumber";
pub const STATION_NUMBER: &str = "stationNumber";
pub const STATION_NAME: &str = "stationOrSiteName";
pub const STATION_TYPE: &str = "stationType";
pub const WIND_INSTRUMENTATION: &str = "instrumentationForWindMeasurement";

// =============================================================================
// Date/Time Keys
// =============================================================================

pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
pub const HOUR: &str = "hour";
pub const MINUTE: &str = "minute";

// =============================================================================
// Derived Field Keys
// =============================================================================

pub const BAROMETER_HEIGHT: &str = "heightOfBarometerAboveMeanSeaLevel";
pub const SENSOR_HEIGHT: &str = "heightOfSensorAboveLocalGroundOrDeckOfMarinePlatform";
pub const TIME_PERIOD: &str = "timePeriod";
pub const TIME_SIGNIFICANCE: &str = "timeSignificance";

// =============================================================================
// Occurrence Ranks
// =============================================================================

/// Sensor height preceding temperature and humidity (the boom itself)
pub const TEMPERATURE_SENSOR_RANK: usize = 1;

/// Sensor height preceding visibility
pub const VISIBILITY_SENSOR_RANK: usize = 2;

/// Sensor height preceding the wind instruments
pub const WIND_SENSOR_RANK: usize = 7;

/// Time period covered by the wind average, in minutes
pub const WIND_PERIOD_RANK: usize = 10;

/// Time periods of the two radiation replications, in hours
pub const RADIATION_PERIOD_RANKS: [usize; 2] = [14, 15];

/// Time significance qualifying the wind averaging period
pub const WIND_SIGNIFICANCE_RANK: usize = 1;

/// Format a ranked key for the n-th occurrence of an element name
pub fn ranked(name: &str, rank: usize) -> String {
    format!("#{rank}#{name}")
}
