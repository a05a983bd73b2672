//! Error types and handling for the `Agricast` tool layer

use chrono::NaiveDate;
use thiserror::Error;

/// Coordinate axis, used to name the offending field in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Valid range for this axis, boundaries inclusive
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Axis::Latitude => (-90.0, 90.0),
            Axis::Longitude => (-180.0, 180.0),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Main error type for the `Agricast` tool layer
#[derive(Error, Debug)]
pub enum AgricastError {
    /// A supplied coordinate value is not numeric
    #[error("Invalid {axis} value '{value}': not a number")]
    CoordinateParse { axis: Axis, value: String },

    /// A supplied coordinate is outside valid geographic bounds
    #[error("{axis} {value} is out of range [{min}, {max}]")]
    RangeValidation {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Neither a location name nor usable coordinates were supplied
    #[error("No location name or coordinates supplied")]
    MissingLocation,

    /// Geocoding found no match for the supplied name
    #[error("Location not found: {location}")]
    LocationNotFound { location: String },

    /// A date string did not parse as YYYY-MM-DD
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    /// end_date precedes start_date
    #[error("end_date {end} is before start_date {start}")]
    DateOrder { start: NaiveDate, end: NaiveDate },

    /// end_date is past the historical archive cutoff
    #[error("end_date {end} is after the historical cutoff {cutoff}")]
    HistoricalRange { end: NaiveDate, cutoff: NaiveDate },

    /// Tool arguments did not match the expected shape
    #[error("Invalid tool arguments: {message}")]
    Arguments { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The weather data backend failed or returned unusable data
    #[error("Upstream weather service error: {message}")]
    Upstream { message: String },
}

impl AgricastError {
    /// Create a coordinate parse error for a value that is not numeric
    pub fn coordinate_parse<S: Into<String>>(axis: Axis, value: S) -> Self {
        Self::CoordinateParse {
            axis,
            value: value.into(),
        }
    }

    /// Create a range validation error for an out-of-bounds coordinate
    #[must_use]
    pub fn out_of_range(axis: Axis, value: f64) -> Self {
        let (min, max) = axis.bounds();
        Self::RangeValidation {
            axis,
            value,
            min,
            max,
        }
    }

    /// Create a location-not-found error
    pub fn location_not_found<S: Into<String>>(location: S) -> Self {
        Self::LocationNotFound {
            location: location.into(),
        }
    }

    /// Create an invalid tool arguments error
    pub fn arguments<S: Into<String>>(message: S) -> Self {
        Self::Arguments {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an upstream service error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Get the actionable message surfaced to the calling agent.
    ///
    /// Every dispatcher failure is rendered through this and returned as
    /// `{"error": ...}` so the agent receives something it can act on
    /// rather than a stack trace.
    #[must_use]
    pub fn agent_message(&self) -> String {
        match self {
            AgricastError::CoordinateParse { axis, value } => {
                format!("Invalid {axis} value '{value}'. Provide a decimal number.")
            }
            AgricastError::RangeValidation {
                axis,
                value,
                min,
                max,
            } => {
                format!("{axis} {value} is out of range. It must be between {min} and {max}.")
            }
            AgricastError::MissingLocation => {
                "Provide either a location name or both latitude and longitude.".to_string()
            }
            AgricastError::LocationNotFound { location } => {
                format!(
                    "No match found for '{location}'. Try a more specific name or a major city."
                )
            }
            AgricastError::InvalidDateFormat { value } => {
                format!("Invalid date '{value}'. Dates must be in YYYY-MM-DD format.")
            }
            AgricastError::DateOrder { start, end } => {
                format!("end_date {end} is before start_date {start}. Swap or correct the dates.")
            }
            AgricastError::HistoricalRange { end, cutoff } => {
                format!(
                    "end_date {end} is after {cutoff}, the most recent date with archived data. \
                     Use the weather forecast tool for recent or future dates."
                )
            }
            AgricastError::Arguments { message } => {
                format!("Invalid tool arguments: {message}")
            }
            AgricastError::Config { .. } => {
                "Configuration error. Please check the config file.".to_string()
            }
            AgricastError::Upstream { message } => {
                format!("Weather data service unavailable: {message}")
            }
        }
    }
}
