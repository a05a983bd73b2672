//! Data models for tool requests, resolved locations, and responses

pub mod location;
pub mod request;
pub mod response;

pub use location::ResolvedLocation;
pub use request::{AgriculturalRequest, ForecastRequest, HistoricalRequest, LocationQuery};
pub use response::{Coordinates, LocationInfo, enrich};
