//! `Agricast` - weather and agricultural data tools for LLM agents
//!
//! This library provides the coordinate-resolution and tool-dispatch
//! layer of an LLM-backed weather agent: loosely-typed coordinate
//! parsing, location resolution with geocoding fallback, per-tool
//! request validation, and three dispatchers returning a uniform JSON
//! envelope to the calling agent framework.

pub mod api;
pub mod config;
pub mod coords;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod tools;
pub mod validate;

// Re-export core types for public API
pub use api::{GeocodedPlace, GeocodingProvider, OpenMeteoClient, WeatherDataProvider};
pub use config::AgricastConfig;
pub use coords::CoordinateInput;
pub use error::{AgricastError, Axis};
pub use location_resolver::LocationResolver;
pub use models::{
    AgriculturalRequest, ForecastRequest, HistoricalRequest, LocationQuery, ResolvedLocation,
};
pub use tools::{Tool, ToolRegistry, builtin_registry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AgricastError>;
