//! `get_weather_forecast` tool

use super::{BackendQuery, Tool, ToolDeps, into_envelope, parse_args, run_pipeline};
use crate::models::ForecastRequest;
use crate::validate::{FORECAST_MAX_DAYS, clamp_days};
use crate::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

/// Daily weather forecast by location name or coordinates
pub struct ForecastTool {
    deps: Arc<ToolDeps>,
}

impl ForecastTool {
    pub fn new(deps: Arc<ToolDeps>) -> Self {
        Self { deps }
    }

    async fn run(&self, args: Value) -> Result<Value> {
        let request: ForecastRequest = parse_args(args)?;
        let days = clamp_days(request.days, FORECAST_MAX_DAYS);

        run_pipeline(
            &self.deps,
            &request.query,
            BackendQuery::Forecast { days },
            |resolved| format!("Weather forecast for {} ({} days)", resolved.name, days),
        )
        .await
    }
}

#[async_trait]
impl Tool for ForecastTool {
    fn name(&self) -> &str {
        "get_weather_forecast"
    }

    fn description(&self) -> &str {
        "Get a daily weather forecast for a location. Accepts a location name, \
         explicit latitude/longitude coordinates, or both (coordinates take priority)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Location name, e.g. 'Chicago, IL'"
                },
                "latitude": {
                    "type": ["number", "string"],
                    "description": "Latitude in decimal degrees (-90 to 90)"
                },
                "longitude": {
                    "type": ["number", "string"],
                    "description": "Longitude in decimal degrees (-180 to 180)"
                },
                "days": {
                    "type": "integer",
                    "description": "Forecast horizon in days (1-16, default 7)"
                }
            }
        })
    }

    async fn call(&self, args: Value) -> Value {
        into_envelope(self.name(), self.run(args).await)
    }
}
