//! Resolved location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A location with final, usable coordinates.
///
/// Produced by the location resolver and owned by the single tool
/// invocation that created it; never cached or shared across calls.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name (city, region, or formatted coordinates)
    pub name: String,
    /// Country name, when geocoding supplied one
    pub country: Option<String>,
}

impl ResolvedLocation {
    /// Create a new resolved location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create a resolved location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: Some(country),
        }
    }

    /// Format coordinates as the default display name
    #[must_use]
    pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
        format!("{latitude:.4},{longitude:.4}")
    }
}
