//! Tool request types, deserialized from LLM tool-call arguments

use crate::coords::CoordinateInput;
use serde::Deserialize;

/// The location part of every tool request.
///
/// At least one of `location` or the `(latitude, longitude)` pair must
/// be resolvable to coordinates; the resolver enforces this. Coordinates
/// may arrive as numbers or numeric strings depending on the caller's
/// serializer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationQuery {
    /// Free-text location name, e.g. "Chicago, IL"
    #[serde(default)]
    pub location: Option<String>,
    /// Latitude, as a number or numeric string
    #[serde(default)]
    pub latitude: Option<CoordinateInput>,
    /// Longitude, as a number or numeric string
    #[serde(default)]
    pub longitude: Option<CoordinateInput>,
}

/// Arguments for `get_weather_forecast`
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    #[serde(flatten)]
    pub query: LocationQuery,
    /// Forecast horizon in days, clamped to [1, 16]
    #[serde(default = "default_days")]
    pub days: u32,
}

/// Arguments for `get_historical_weather`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalRequest {
    #[serde(flatten)]
    pub query: LocationQuery,
    /// Range start, YYYY-MM-DD
    pub start_date: String,
    /// Range end, YYYY-MM-DD
    pub end_date: String,
}

/// Arguments for `get_agricultural_conditions`
#[derive(Debug, Clone, Deserialize)]
pub struct AgriculturalRequest {
    #[serde(flatten)]
    pub query: LocationQuery,
    /// Outlook horizon in days, clamped to [1, 7]
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    7
}
