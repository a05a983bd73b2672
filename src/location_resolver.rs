//! Location Resolution Module
//!
//! Resolves the location part of a tool request (an optional free-text
//! name and/or optional loosely-typed coordinates) into final usable
//! coordinates, geocoding only when coordinates are absent.

use crate::api::GeocodingProvider;
use crate::coords::{parse_coordinate, validate_latitude, validate_longitude};
use crate::error::{AgricastError, Axis};
use crate::models::{LocationQuery, ResolvedLocation};
use crate::Result;
use std::sync::Arc;
use tracing::debug;

/// Service for resolving location queries into coordinates
pub struct LocationResolver {
    geocoder: Arc<dyn GeocodingProvider>,
}

impl LocationResolver {
    /// Create a resolver over a geocoding collaborator
    pub fn new(geocoder: Arc<dyn GeocodingProvider>) -> Self {
        Self { geocoder }
    }

    /// Resolve a location query using a strict priority order:
    /// explicit coordinates first, then geocoding of the location name.
    ///
    /// Callers sometimes supply coordinates directly (cheaper and more
    /// precise, no geocoding round trip) and sometimes only a name; a
    /// usable coordinate pair always wins. A partial pair is treated as
    /// "coordinates not usable" and falls through to the name, never
    /// guessed or defaulted. Unparseable or out-of-range coordinate
    /// values are hard errors even when a name is also present.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation> {
        debug!("Resolving location query: {:?}", query);

        let latitude = parse_coordinate(query.latitude.as_ref(), Axis::Latitude)?;
        let longitude = parse_coordinate(query.longitude.as_ref(), Axis::Longitude)?;

        let name = query
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let (Some(lat), Some(lon)) = (latitude, longitude) {
            let lat = validate_latitude(lat)?;
            let lon = validate_longitude(lon)?;

            let display_name = name
                .map(ToString::to_string)
                .unwrap_or_else(|| ResolvedLocation::format_coordinates(lat, lon));

            debug!("Using supplied coordinates: ({}, {})", lat, lon);
            return Ok(ResolvedLocation::new(lat, lon, display_name));
        }

        match name {
            Some(name) => self.resolve_name(name).await,
            None => Err(AgricastError::MissingLocation),
        }
    }

    /// Resolve a location name to coordinates via geocoding
    async fn resolve_name(&self, name: &str) -> Result<ResolvedLocation> {
        debug!("Geocoding location name: {}", name);

        let candidates = self.geocoder.geocode(name).await?;
        if candidates.is_empty() {
            return Err(AgricastError::location_not_found(name));
        }

        // Use the first (best) result
        let place = candidates.into_iter().next().unwrap();
        let location = ResolvedLocation::from(place);
        debug!(
            "Found location: {} ({:.4}, {:.4})",
            location.name, location.latitude, location.longitude
        );

        Ok(location)
    }
}
