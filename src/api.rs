//! HTTP clients for the geocoding and weather data collaborators
//!
//! Both collaborators are Open-Meteo JSON APIs (no API key required).
//! Weather payloads are upstream-defined and passed through unmodified;
//! the tool layer enriches them without reinterpreting the schema.

use crate::config::AgricastConfig;
use crate::error::AgricastError;
use crate::models::ResolvedLocation;
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Daily/hourly parameter lists requested per tool. The backend returns
/// whatever subset it supports; the payload is passed through as-is.
const FORECAST_DAILY: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max,wind_speed_10m_max,wind_gusts_10m_max";
const FORECAST_CURRENT: &str =
    "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m";
const HISTORICAL_DAILY: &str = "weather_code,temperature_2m_max,temperature_2m_min,temperature_2m_mean,precipitation_sum,wind_speed_10m_max";
const AGRICULTURAL_DAILY: &str =
    "et0_fao_evapotranspiration,precipitation_sum,temperature_2m_max,temperature_2m_min";
const AGRICULTURAL_HOURLY: &str = "soil_temperature_0cm,soil_moisture_0_to_1cm,soil_moisture_1_to_3cm,soil_moisture_3_to_9cm,relative_humidity_2m";

/// A geocoding candidate returned by the geocoding collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodedPlace {
    /// Place name
    pub name: String,
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// Country name
    pub country: Option<String>,
    /// First-level administrative area (state, canton, ...)
    pub admin1: Option<String>,
}

impl From<GeocodedPlace> for ResolvedLocation {
    fn from(place: GeocodedPlace) -> Self {
        let name = if let Some(admin1) = place.admin1 {
            format!("{}, {}", place.name, admin1)
        } else {
            place.name
        };

        match place.country {
            Some(country) => {
                ResolvedLocation::with_country(place.latitude, place.longitude, name, country)
            }
            None => ResolvedLocation::new(place.latitude, place.longitude, name),
        }
    }
}

/// Geocoding collaborator: free-text place name to candidate coordinates
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Look up candidates for a location name, best match first.
    /// An empty vector means no match.
    async fn geocode(&self, name: &str) -> Result<Vec<GeocodedPlace>>;
}

/// Weather data collaborator: raw JSON weather payloads by coordinates
#[async_trait]
pub trait WeatherDataProvider: Send + Sync {
    /// Daily forecast for the next `days` days
    async fn forecast(&self, latitude: f64, longitude: f64, days: u32) -> Result<Value>;

    /// Archived daily data for a past date range
    async fn historical(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value>;

    /// Soil and evapotranspiration outlook for the next `days` days
    async fn agricultural(&self, latitude: f64, longitude: f64, days: u32) -> Result<Value>;
}

/// HTTP client for the Open-Meteo forecast, archive, and geocoding APIs
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    config: AgricastConfig,
}

impl OpenMeteoClient {
    /// Create a new client from configuration
    pub fn new(config: &AgricastConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("agricast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AgricastError::upstream(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.weather.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// GET a URL and parse the body as JSON, with transient retries
    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!("API request URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AgricastError::upstream(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("API request failed with status {}", status);
            return Err(AgricastError::upstream(format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AgricastError::upstream(format!("Invalid JSON in response: {e}")))
    }
}

#[async_trait]
impl GeocodingProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, name: &str) -> Result<Vec<GeocodedPlace>> {
        info!("Geocoding location: '{}'", name);

        let url = format!(
            "{}/search?name={}&count={}&language=en&format=json",
            self.config.geocoding.base_url,
            urlencoding::encode(name),
            self.config.geocoding.max_results
        );

        #[derive(Deserialize)]
        struct GeocodingResponse {
            results: Option<Vec<GeocodedPlace>>,
        }

        let response: GeocodingResponse = serde_json::from_value(self.get_json(&url).await?)
            .map_err(|e| {
                AgricastError::upstream(format!("Invalid geocoding data received: {e}"))
            })?;

        let places = response.results.unwrap_or_default();
        if places.is_empty() {
            warn!("No geocoding results for '{}'", name);
        } else {
            debug!(
                "Found {} geocoding results for '{}', best: {} ({:.4}, {:.4})",
                places.len(),
                name,
                places[0].name,
                places[0].latitude,
                places[0].longitude
            );
        }

        Ok(places)
    }
}

#[async_trait]
impl WeatherDataProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn forecast(&self, latitude: f64, longitude: f64, days: u32) -> Result<Value> {
        info!(
            "Getting {}-day forecast for coordinates: {:.4}, {:.4}",
            days, latitude, longitude
        );

        let url = format!(
            "{}/forecast?latitude={latitude}&longitude={longitude}&current={FORECAST_CURRENT}&daily={FORECAST_DAILY}&timezone=auto&forecast_days={days}",
            self.config.weather.base_url
        );

        self.get_json(&url).await
    }

    #[instrument(skip(self))]
    async fn historical(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value> {
        info!(
            "Getting historical weather for {:.4}, {:.4} from {} to {}",
            latitude, longitude, start, end
        );

        let url = format!(
            "{}/archive?latitude={latitude}&longitude={longitude}&start_date={}&end_date={}&daily={HISTORICAL_DAILY}&timezone=auto",
            self.config.weather.archive_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        self.get_json(&url).await
    }

    #[instrument(skip(self))]
    async fn agricultural(&self, latitude: f64, longitude: f64, days: u32) -> Result<Value> {
        info!(
            "Getting {}-day agricultural conditions for {:.4}, {:.4}",
            days, latitude, longitude
        );

        let url = format!(
            "{}/forecast?latitude={latitude}&longitude={longitude}&daily={AGRICULTURAL_DAILY}&hourly={AGRICULTURAL_HOURLY}&timezone=auto&forecast_days={days}",
            self.config.weather.base_url
        );

        self.get_json(&url).await
    }
}
