//! Message assembly orchestration
//!
//! One builder serves an entire run: it owns the station identity, the base
//! message configuration, and the lookup table, and produces an independent
//! message per observation. Field-level problems are logged and counted but
//! never abort the message; only an unusable timestamp does.

use serde::Serialize;
use tracing::{debug, warn};

use super::{keys, units};
use crate::app::models::{Observation, StationMetadata};
use crate::app::services::lookup::{LookupTable, ValueKind};
use crate::bufr::{BufrMessage, BufrValue, MessageConfig};
use crate::constants::{self, columns};
use crate::Result;

/// Outcome counters for one assembled message
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BuildReport {
    /// Fields assigned successfully
    pub fields_set: usize,

    /// Fields skipped because the value or key was rejected
    pub fields_failed: usize,

    /// Lookup entries with no value in this record
    pub fields_missing: usize,
}

/// Builder producing one BUFR message per observation record
#[derive(Debug)]
pub struct MessageBuilder {
    station: StationMetadata,
    base: MessageConfig,
    lookup: LookupTable,
}

impl MessageBuilder {
    /// Create a builder for a station, base configuration, and lookup table
    ///
    /// Fails fast on a station identity the template cannot carry or a
    /// configuration the encoder does not support.
    pub fn new(
        station: StationMetadata,
        base: MessageConfig,
        lookup: LookupTable,
    ) -> Result<Self> {
        station.validate()?;
        BufrMessage::new(base.clone())?;
        Ok(Self {
            station,
            base,
            lookup,
        })
    }

    /// The lookup table this builder applies
    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    /// Assemble the message for one observation record
    pub fn build(&self, observation: &Observation) -> Result<(BufrMessage, BuildReport)> {
        let timestamp = observation.timestamp()?;
        let config = self.base.clone().with_typical_time(timestamp);
        let mut message = BufrMessage::new(config)?;
        let mut report = BuildReport::default();

        self.set_station_identity(&mut message)?;
        set_observation_time(&mut message, observation)?;
        self.apply_lookup(&mut message, observation, &mut report);
        derive_sensor_heights(&mut message, observation, &mut report);
        derive_periods(&mut message, observation, &mut report);

        debug!(
            "Built message for {:04}-{:02}-{:02}T{:02}: {} set, {} failed, {} missing",
            observation.year,
            observation.month,
            observation.day,
            observation.hour,
            report.fields_set,
            report.fields_failed,
            report.fields_missing
        );
        Ok((message, report))
    }

    /// Write the configured station identity
    fn set_station_identity(&self, message: &mut BufrMessage) -> Result<()> {
        message.set(keys::BLOCK_NUMBER, self.station.block_number)?;
        message.set(keys::STATION_NUMBER, self.station.station_number)?;
        message.set(keys::STATION_TYPE, self.station.station_type)?;
        message.set(keys::WIND_INSTRUMENTATION, self.station.wind_instrumentation)?;
        if let Some(name) = &self.station.name {
            message.set(keys::STATION_NAME, name.as_str())?;
        }
        Ok(())
    }

    /// Apply the lookup table with per-field unit conversion
    fn apply_lookup(
        &self,
        message: &mut BufrMessage,
        observation: &Observation,
        report: &mut BuildReport,
    ) {
        for entry in self.lookup.entries() {
            let value = match entry.value_kind {
                ValueKind::Float | ValueKind::Int => {
                    let Some(raw) = observation.value(&entry.csv_column) else {
                        report.fields_missing += 1;
                        continue;
                    };
                    let converted = units::convert_for_column(&entry.csv_column, raw);
                    match entry.value_kind {
                        ValueKind::Int => BufrValue::Int(converted.round() as i64),
                        _ => BufrValue::Double(converted),
                    }
                }
                ValueKind::Str => {
                    let Some(text) = observation.text(&entry.csv_column) else {
                        report.fields_missing += 1;
                        continue;
                    };
                    BufrValue::Str(text.to_string())
                }
            };

            match message.set(&entry.standard_name, value) {
                Ok(()) => report.fields_set += 1,
                Err(e) => {
                    report.fields_failed += 1;
                    warn!(
                        "Skipping {} ({}): {}",
                        entry.standard_name, entry.csv_column, e
                    );
                }
            }
        }
    }
}

/// Write the observation timestamp into the data section
fn set_observation_time(message: &mut BufrMessage, observation: &Observation) -> Result<()> {
    message.set(keys::YEAR, observation.year as i64)?;
    message.set(keys::MONTH, observation.month as i64)?;
    message.set(keys::DAY, observation.day as i64)?;
    message.set(keys::HOUR, observation.hour as i64)?;
    message.set(keys::MINUTE, 0i64)?;
    Ok(())
}

/// Derive instrument heights from the boom height and station elevation
///
/// The visibility sensor sits just below the boom and the wind sensor just
/// above it; the barometer height is the station elevation plus the boom.
fn derive_sensor_heights(
    message: &mut BufrMessage,
    observation: &Observation,
    report: &mut BuildReport,
) {
    let boom = observation.value(columns::BOOM_HEIGHT);
    let elevation = observation.value(columns::ELEVATION);

    if let Some(boom) = boom {
        try_set(
            message,
            &keys::ranked(keys::SENSOR_HEIGHT, keys::VISIBILITY_SENSOR_RANK),
            BufrValue::Double(boom + constants::VISIBILITY_SENSOR_OFFSET_M),
            report,
        );
        try_set(
            message,
            &keys::ranked(keys::SENSOR_HEIGHT, keys::WIND_SENSOR_RANK),
            BufrValue::Double(boom + constants::WIND_SENSOR_OFFSET_M),
            report,
        );
    }
    if let (Some(boom), Some(elevation)) = (boom, elevation) {
        try_set(
            message,
            keys::BAROMETER_HEIGHT,
            BufrValue::Double(elevation + boom),
            report,
        );
    }
}

/// Derive the time periods implied by the measurements that are present
///
/// Wind values are 10-minute averages ending at the report time; each
/// radiation replication covers the hour ending at the report time.
fn derive_periods(
    message: &mut BufrMessage,
    observation: &Observation,
    report: &mut BuildReport,
) {
    let has_wind = observation.value(columns::WIND_SPEED).is_some()
        || observation.value(columns::WIND_DIRECTION).is_some();
    if has_wind {
        try_set(
            message,
            &keys::ranked(keys::TIME_PERIOD, keys::WIND_PERIOD_RANK),
            BufrValue::Int(constants::WIND_AVERAGING_PERIOD_MIN),
            report,
        );
        try_set(
            message,
            &keys::ranked(keys::TIME_SIGNIFICANCE, keys::WIND_SIGNIFICANCE_RANK),
            BufrValue::Int(constants::TIME_SIGNIFICANCE_AVERAGED),
            report,
        );
    }

    let replication_columns: [&[&str]; 2] = [
        &[columns::SHORTWAVE_DOWN, columns::LONGWAVE_DOWN],
        &[columns::SHORTWAVE_UP, columns::LONGWAVE_UP],
    ];
    for (rank, radiation_columns) in keys::RADIATION_PERIOD_RANKS.iter().zip(replication_columns)
    {
        if radiation_columns
            .iter()
            .any(|column| observation.value(column).is_some())
        {
            try_set(
                message,
                &keys::ranked(keys::TIME_PERIOD, *rank),
                BufrValue::Int(constants::RADIATION_PERIOD_HOURS),
                report,
            );
        }
    }
}

/// Assign a derived field, counting and logging instead of failing
fn try_set(message: &mut BufrMessage, key: &str, value: BufrValue, report: &mut BuildReport) {
    match message.set(key, value) {
        Ok(()) => report.fields_set += 1,
        Err(e) => {
            report.fields_failed += 1;
            warn!("Skipping {}: {}", key, e);
        }
    }
}
