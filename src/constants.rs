//! Application constants for the BUFR exporter
//!
//! This module contains the default values, well-known column names, and
//! BUFR header/template constants used throughout the application.

// =============================================================================
// File Discovery and Naming
// =============================================================================

/// Glob pattern matching hourly AWS observation files within an input directory
pub const HOURLY_FILE_PATTERN: &str = "*hour*";

/// Default output directory for generated BUFR files
pub const DEFAULT_OUTPUT_DIR: &str = "BUFR_out";

/// Default lookup table filename searched for next to the input data
pub const DEFAULT_LOOKUP_FILENAME: &str = "variables_bufr.csv";

/// Extension given to generated BUFR files
pub const BUFR_FILE_EXTENSION: &str = "bufr";

/// Length of the version-carrying suffix on hourly file stems
/// (`KAN_L_hour_v03.txt` carries `_hour_v03`, stripped to yield `KAN_L.bufr`)
pub const HOURLY_STEM_SUFFIX_LEN: usize = 9;

// =============================================================================
// Observation Values
// =============================================================================

/// Sentinel marking a missing measurement in AWS observation files
pub const SENTINEL_NULL: f64 = -999.0;

/// Tolerance used when comparing a parsed value against the sentinel
pub const SENTINEL_EPSILON: f64 = 1e-6;

/// Offset from degrees Celsius to Kelvin
pub const CELSIUS_TO_KELVIN_OFFSET: f64 = 273.15;

/// Factor from hectopascals to pascals
pub const HECTOPASCAL_TO_PASCAL: f64 = 100.0;

// =============================================================================
// BUFR Identification Defaults (section 1 and section 3 header fields)
// =============================================================================

/// BUFR edition emitted by this tool
pub const BUFR_EDITION: u8 = 4;

/// WMO master table number (0 = meteorology)
pub const MASTER_TABLE_NUMBER: u8 = 0;

/// Originating/generating centre (98 = ECMWF)
pub const ORIGINATING_CENTRE: u16 = 98;

/// Originating/generating sub-centre
pub const ORIGINATING_SUBCENTRE: u16 = 0;

/// Update sequence number for original messages
pub const UPDATE_SEQUENCE_NUMBER: u8 = 0;

/// Data category (0 = surface data, land)
pub const DATA_CATEGORY: u8 = 0;

/// International data sub-category (7 = n-minute observations from AWS stations)
pub const INTL_DATA_SUBCATEGORY: u8 = 7;

/// Local data sub-category
pub const LOCAL_DATA_SUBCATEGORY: u8 = 7;

/// Version number of the master tables used
pub const MASTER_TABLES_VERSION: u8 = 13;

/// Version number of local tables (0 = not used)
pub const LOCAL_TABLES_VERSION: u8 = 0;

/// Unexpanded data-description sequence for synoptic reports from fixed
/// land stations, in F-XX-YYY numeric form
pub const SYNOP_LAND_TEMPLATE: u32 = 307080;

// =============================================================================
// Station Defaults
// =============================================================================

/// Default WMO block number
pub const DEFAULT_BLOCK_NUMBER: i64 = 1;

/// Default WMO station number within the block
pub const DEFAULT_STATION_NUMBER: i64 = 1;

/// Type of station (0 = automatic)
pub const STATION_TYPE_AUTOMATIC: i64 = 0;

/// Instrumentation-for-wind-measurement flag (certified instruments)
pub const WIND_INSTRUMENTATION_FLAG: i64 = 6;

/// Delayed replication count for cloud layers in emitted messages
pub const CLOUD_LAYER_COUNT: u32 = 1;

/// Delayed replication count for clouds with bases below station level
pub const CLOUD_BELOW_STATION_COUNT: u32 = 0;

// =============================================================================
// Sensor Geometry and Periods
// =============================================================================

/// Offset from the sensor boom to the visibility sensor, metres
pub const VISIBILITY_SENSOR_OFFSET_M: f64 = -0.1;

/// Offset from the sensor boom to the wind sensor, metres
pub const WIND_SENSOR_OFFSET_M: f64 = 0.4;

/// Wind averaging period, minutes (negative = period ending at the report time)
pub const WIND_AVERAGING_PERIOD_MIN: i64 = -10;

/// Radiation integration period, hours
pub const RADIATION_PERIOD_HOURS: i64 = -1;

/// Time-significance code for temporally averaged values
pub const TIME_SIGNIFICANCE_AVERAGED: i64 = 2;

// =============================================================================
// Observation File Columns
// =============================================================================

/// Well-known column names in hourly AWS observation files
pub mod columns {
    /// Four-digit year of the observation
    pub const YEAR: &str = "Year";

    /// Month of year, 1-12
    pub const MONTH: &str = "MonthOfYear";

    /// Day of month, 1-31
    pub const DAY: &str = "DayOfMonth";

    /// Hour of day in UTC, 0-23
    pub const HOUR: &str = "HourOfDay(UTC)";

    /// Air temperature, degrees Celsius
    pub const AIR_TEMPERATURE: &str = "AirTemperature(C)";

    /// Air pressure, hectopascals
    pub const AIR_PRESSURE: &str = "AirPressure(hPa)";

    /// Relative humidity, percent
    pub const RELATIVE_HUMIDITY: &str = "RelativeHumidity(%)";

    /// Wind speed, metres per second
    pub const WIND_SPEED: &str = "WindSpeed(m/s)";

    /// Wind direction, degrees
    pub const WIND_DIRECTION: &str = "WindDirection(d)";

    /// Total cloud cover
    pub const CLOUD_COVER: &str = "CloudCover";

    /// Tilt-corrected downwelling shortwave radiation, W/m2
    pub const SHORTWAVE_DOWN: &str = "ShortwaveRadiationDown_Cor(W/m2)";

    /// Tilt-corrected upwelling shortwave radiation, W/m2
    pub const SHORTWAVE_UP: &str = "ShortwaveRadiationUp_Cor(W/m2)";

    /// Downwelling longwave radiation, W/m2
    pub const LONGWAVE_DOWN: &str = "LongwaveRadiationDown(W/m2)";

    /// Upwelling longwave radiation, W/m2
    pub const LONGWAVE_UP: &str = "LongwaveRadiationUp(W/m2)";

    /// GPS latitude, degrees north
    pub const LATITUDE: &str = "LatitudeGPS(degN)";

    /// GPS longitude, degrees west (positive west; negated for BUFR)
    pub const LONGITUDE_WEST: &str = "LongitudeGPS(degW)";

    /// GPS elevation of the station ground, metres above mean sea level
    pub const ELEVATION: &str = "ElevationGPS(m)";

    /// Height of the instrument boom above local ground, metres
    pub const BOOM_HEIGHT: &str = "HeightSensorBoom(m)";

    /// Columns that must be present and non-null for a row to be encoded
    pub const REQUIRED: &[&str] = &[YEAR, MONTH, DAY, HOUR];
}

// =============================================================================
// Progress Reporting
// =============================================================================

/// Update the progress bar every N messages
pub const PROGRESS_UPDATE_INTERVAL: usize = 100;
