//! Field parsing utilities for observation records
//!
//! This module provides helper functions for parsing individual fields with
//! the null conventions of station data loggers: the literal sentinel -999
//! and NaN both mean "no measurement".

use crate::constants::{SENTINEL_EPSILON, SENTINEL_NULL};
use crate::{Error, Result};

/// Parse a measurement field
///
/// Returns `Ok(None)` for an empty field, the -999 null sentinel, or NaN;
/// a field that does not parse as a number at all is an error so the caller
/// can log which column was malformed.
pub fn parse_measurement(raw: &str, column: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed.parse().map_err(|_| {
        Error::data_validation(format!(
            "invalid numeric value for {column}: '{trimmed}'"
        ))
    })?;

    if value.is_nan() || (value - SENTINEL_NULL).abs() < SENTINEL_EPSILON {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Parse a required date/time component as an integer
///
/// Loggers sometimes write these columns in float form ("2023.0"), so an
/// integral float is accepted; anything fractional or non-numeric is an
/// error that skips the record.
pub fn parse_date_component(raw: &str, column: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::data_validation(format!(
            "empty value for required column '{column}'"
        )));
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    let value: f64 = trimmed.parse().map_err(|_| {
        Error::data_validation(format!(
            "invalid integer value for {column}: '{trimmed}'"
        ))
    })?;
    if value.fract() != 0.0 || !value.is_finite() {
        return Err(Error::data_validation(format!(
            "non-integral value for {column}: '{trimmed}'"
        )));
    }
    Ok(value as i64)
}
