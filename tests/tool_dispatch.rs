//! End-to-end dispatcher tests over in-process fake collaborators
//!
//! The fakes count their calls, so these tests pin down the dispatch
//! contract: direct coordinates never geocode, validation failures
//! never reach the network, and every failure mode comes back as a
//! parseable `{"error": ...}` envelope.

use agricast::api::{GeocodedPlace, GeocodingProvider, WeatherDataProvider};
use agricast::tools::builtin_registry;
use agricast::{AgricastError, Result, ToolRegistry};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Geocoder fake returning a fixed candidate list
struct FakeGeocoder {
    calls: AtomicUsize,
    results: Vec<GeocodedPlace>,
}

impl FakeGeocoder {
    fn returning(results: Vec<GeocodedPlace>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            results,
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingProvider for FakeGeocoder {
    async fn geocode(&self, _name: &str) -> Result<Vec<GeocodedPlace>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }
}

/// Recorded parameters of the last weather-data call
#[derive(Debug, Clone, PartialEq)]
enum BackendCall {
    Forecast(f64, f64, u32),
    Historical(f64, f64, NaiveDate, NaiveDate),
    Agricultural(f64, f64, u32),
}

/// Weather fake returning a canned payload, or an upstream error
struct FakeWeather {
    calls: AtomicUsize,
    last_call: Mutex<Option<BackendCall>>,
    fail: bool,
}

impl FakeWeather {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
            fail: true,
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_call(&self) -> Option<BackendCall> {
        self.last_call.lock().unwrap().clone()
    }

    fn record(&self, call: BackendCall) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some(call);
        if self.fail {
            Err(AgricastError::upstream("connection reset by peer"))
        } else {
            Ok(json!({
                "timezone": "America/Chicago",
                "daily": { "time": ["2024-06-01"], "temperature_2m_max": [28.5] }
            }))
        }
    }
}

#[async_trait]
impl WeatherDataProvider for FakeWeather {
    async fn forecast(&self, latitude: f64, longitude: f64, days: u32) -> Result<Value> {
        self.record(BackendCall::Forecast(latitude, longitude, days))
    }

    async fn historical(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value> {
        self.record(BackendCall::Historical(latitude, longitude, start, end))
    }

    async fn agricultural(&self, latitude: f64, longitude: f64, days: u32) -> Result<Value> {
        self.record(BackendCall::Agricultural(latitude, longitude, days))
    }
}

fn chicago_place() -> GeocodedPlace {
    GeocodedPlace {
        name: "Chicago".to_string(),
        latitude: 41.8781,
        longitude: -87.6298,
        country: Some("United States".to_string()),
        admin1: Some("Illinois".to_string()),
    }
}

fn registry_with(
    geocoder: &Arc<FakeGeocoder>,
    weather: &Arc<FakeWeather>,
) -> ToolRegistry {
    builtin_registry(geocoder.clone(), weather.clone())
}

#[tokio::test]
async fn forecast_with_direct_coordinates_skips_geocoding() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch(
            "get_weather_forecast",
            json!({
                "location": "Chicago, IL",
                "latitude": "41.8781",
                "longitude": "-87.6298",
                "days": 5
            }),
        )
        .await;

    assert!(response.get("error").is_none(), "unexpected error: {response}");
    assert_eq!(geocoder.call_count(), 0);
    assert_eq!(
        weather.last_call(),
        Some(BackendCall::Forecast(41.8781, -87.6298, 5))
    );

    let coords = &response["location_info"]["coordinates"];
    assert_eq!(coords["latitude"], 41.8781);
    assert_eq!(coords["longitude"], -87.6298);
    assert_eq!(response["location_info"]["name"], "Chicago, IL");
    assert!(response["summary"].as_str().unwrap().contains("5 days"));
    // Raw payload is passed through alongside the enrichment
    assert_eq!(response["timezone"], "America/Chicago");
}

#[tokio::test]
async fn forecast_with_name_only_geocodes_once() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch("get_weather_forecast", json!({"location": "Chicago"}))
        .await;

    assert_eq!(geocoder.call_count(), 1);
    assert_eq!(response["location_info"]["name"], "Chicago, Illinois");
    assert_eq!(
        weather.last_call(),
        Some(BackendCall::Forecast(41.8781, -87.6298, 7))
    );
}

#[tokio::test]
async fn forecast_days_are_clamped_not_rejected() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    registry
        .dispatch(
            "get_weather_forecast",
            json!({"latitude": 41.8781, "longitude": -87.6298, "days": 100}),
        )
        .await;
    assert_eq!(
        weather.last_call(),
        Some(BackendCall::Forecast(41.8781, -87.6298, 16))
    );

    registry
        .dispatch(
            "get_weather_forecast",
            json!({"latitude": 41.8781, "longitude": -87.6298, "days": 0}),
        )
        .await;
    assert_eq!(
        weather.last_call(),
        Some(BackendCall::Forecast(41.8781, -87.6298, 1))
    );
}

#[tokio::test]
async fn agricultural_days_clamp_to_seven() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch(
            "get_agricultural_conditions",
            json!({"latitude": 41.8781, "longitude": -87.6298, "days": 100}),
        )
        .await;

    assert_eq!(
        weather.last_call(),
        Some(BackendCall::Agricultural(41.8781, -87.6298, 7))
    );
    assert!(
        response["summary"]
            .as_str()
            .unwrap()
            .contains("Agricultural conditions")
    );
}

#[tokio::test]
async fn historical_happy_path() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch(
            "get_historical_weather",
            json!({
                "location": "Chicago",
                "start_date": "2020-01-01",
                "end_date": "2020-01-07"
            }),
        )
        .await;

    assert!(response.get("error").is_none(), "unexpected error: {response}");
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 1, 7).unwrap();
    assert_eq!(
        weather.last_call(),
        Some(BackendCall::Historical(41.8781, -87.6298, start, end))
    );
    let summary = response["summary"].as_str().unwrap();
    assert!(summary.contains("2020-01-01"));
    assert!(summary.contains("2020-01-07"));
}

#[tokio::test]
async fn historical_reversed_dates_fail_before_any_network_call() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch(
            "get_historical_weather",
            json!({
                "location": "Chicago",
                "start_date": "2024-01-07",
                "end_date": "2024-01-01"
            }),
        )
        .await;

    let error = response["error"].as_str().unwrap();
    assert!(error.contains("before start_date"), "got: {error}");
    assert_eq!(geocoder.call_count(), 0);
    assert_eq!(weather.call_count(), 0);
}

#[tokio::test]
async fn historical_recent_end_date_points_at_forecast_tool() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    // Today is always within the archive lag window
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let response = registry
        .dispatch(
            "get_historical_weather",
            json!({"location": "Chicago", "start_date": "2020-01-01", "end_date": today}),
        )
        .await;

    let error = response["error"].as_str().unwrap();
    assert!(error.contains("forecast tool"), "got: {error}");
    assert_eq!(weather.call_count(), 0);
}

#[tokio::test]
async fn malformed_dates_are_validation_errors() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch(
            "get_historical_weather",
            json!({
                "location": "Chicago",
                "start_date": "2024-13-40",
                "end_date": "2024-01-07"
            }),
        )
        .await;

    let error = response["error"].as_str().unwrap();
    assert!(error.contains("YYYY-MM-DD"), "got: {error}");
    assert_eq!(weather.call_count(), 0);
}

#[tokio::test]
async fn missing_location_and_unknown_place_become_envelopes() {
    let geocoder = FakeGeocoder::returning(vec![]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry.dispatch("get_weather_forecast", json!({})).await;
    assert!(
        response["error"]
            .as_str()
            .unwrap()
            .contains("location name")
    );

    let response = registry
        .dispatch("get_weather_forecast", json!({"location": "Xyzzyville"}))
        .await;
    let error = response["error"].as_str().unwrap();
    assert!(error.contains("Xyzzyville"));
    assert!(error.contains("major city"));
    assert_eq!(weather.call_count(), 0);
}

#[tokio::test]
async fn upstream_failure_is_caught_at_the_boundary() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::failing();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch(
            "get_weather_forecast",
            json!({"latitude": 41.8781, "longitude": -87.6298}),
        )
        .await;

    let error = response["error"].as_str().unwrap();
    assert!(error.contains("unavailable"), "got: {error}");
    assert_eq!(weather.call_count(), 1);
}

#[tokio::test]
async fn malformed_arguments_become_envelopes() {
    let geocoder = FakeGeocoder::returning(vec![chicago_place()]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry
        .dispatch(
            "get_weather_forecast",
            json!({"location": "Chicago", "days": "lots"}),
        )
        .await;

    let error = response["error"].as_str().unwrap();
    assert!(error.contains("Invalid tool arguments"), "got: {error}");
    assert_eq!(weather.call_count(), 0);
}

#[tokio::test]
async fn unknown_tool_is_an_envelope_too() {
    let geocoder = FakeGeocoder::returning(vec![]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    let response = registry.dispatch("get_tide_tables", json!({})).await;
    assert!(
        response["error"]
            .as_str()
            .unwrap()
            .contains("Unknown tool")
    );
}

#[test]
fn registry_lists_all_three_tools() {
    let geocoder = FakeGeocoder::returning(vec![]);
    let weather = FakeWeather::ok();
    let registry = registry_with(&geocoder, &weather);

    assert_eq!(registry.len(), 3);
    let defs = registry.definitions();
    let names: Vec<&str> = defs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "get_agricultural_conditions",
            "get_historical_weather",
            "get_weather_forecast"
        ]
    );
    for def in defs.as_array().unwrap() {
        assert!(def["input_schema"]["properties"].get("latitude").is_some());
    }
}
