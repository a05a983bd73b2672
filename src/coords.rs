//! Coordinate parsing and range validation
//!
//! LLM tool-call serializers deliver coordinates inconsistently: native
//! numbers, numeric strings, scientific notation, padded with whitespace.
//! This module normalizes all of those into validated floats.

use crate::error::{AgricastError, Axis};
use crate::Result;
use serde::{Deserialize, Serialize};

/// A coordinate value as it arrives from a caller, before parsing
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    /// Native JSON number
    Number(f64),
    /// String form, possibly with whitespace or scientific notation
    Text(String),
}

/// Parse a caller-supplied coordinate value into a float.
///
/// Returns `Ok(None)` when the value is absent (`None`, empty, or
/// whitespace-only string). A non-empty value that does not parse as a
/// number is a hard error, never treated as absent: swallowing it would
/// mask a caller bug as a geocoding fallback.
pub fn parse_coordinate(value: Option<&CoordinateInput>, axis: Axis) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(CoordinateInput::Number(v)) => Ok(Some(*v)),
        Some(CoordinateInput::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            // f64::from_str accepts both decimal and scientific notation
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| AgricastError::coordinate_parse(axis, raw.clone()))
        }
    }
}

/// Validate a latitude is within [-90, 90], boundaries inclusive
pub fn validate_latitude(value: f64) -> Result<f64> {
    validate_range(value, Axis::Latitude)
}

/// Validate a longitude is within [-180, 180], boundaries inclusive
pub fn validate_longitude(value: f64) -> Result<f64> {
    validate_range(value, Axis::Longitude)
}

fn validate_range(value: f64, axis: Axis) -> Result<f64> {
    let (min, max) = axis.bounds();
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AgricastError::out_of_range(axis, value))
    }
}
