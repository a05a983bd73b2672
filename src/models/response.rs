//! Uniform tool response envelope

use crate::models::ResolvedLocation;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Coordinate pair echoed back to the caller
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolved location metadata attached to every tool response
#[derive(Debug, Clone, Serialize)]
pub struct LocationInfo {
    pub name: String,
    pub coordinates: Coordinates,
}

impl From<&ResolvedLocation> for LocationInfo {
    fn from(resolved: &ResolvedLocation) -> Self {
        Self {
            name: resolved.name.clone(),
            coordinates: Coordinates {
                latitude: resolved.latitude,
                longitude: resolved.longitude,
            },
        }
    }
}

/// Merge a raw backend payload with location metadata and a summary.
///
/// The upstream schema is passed through unmodified; `location_info`
/// and `summary` are added alongside it. A non-object payload is
/// preserved under a `data` key so the envelope is always an object.
#[must_use]
pub fn enrich(raw: Value, resolved: &ResolvedLocation, summary: String) -> Value {
    let mut body = match raw {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    body.insert(
        "location_info".to_string(),
        json!(LocationInfo::from(resolved)),
    );
    body.insert("summary".to_string(), Value::String(summary));
    Value::Object(body)
}
