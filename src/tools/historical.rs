//! `get_historical_weather` tool

use super::{BackendQuery, Tool, ToolDeps, into_envelope, parse_args, run_pipeline};
use crate::models::HistoricalRequest;
use crate::validate::validate_date_range;
use crate::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

/// Archived daily weather for a past date range
pub struct HistoricalTool {
    deps: Arc<ToolDeps>,
}

impl HistoricalTool {
    pub fn new(deps: Arc<ToolDeps>) -> Self {
        Self { deps }
    }

    async fn run(&self, args: Value) -> Result<Value> {
        let request: HistoricalRequest = parse_args(args)?;
        // Date validation runs before resolution so a bad range never
        // costs a network round trip
        let (start, end) = validate_date_range(&request.start_date, &request.end_date)?;

        run_pipeline(
            &self.deps,
            &request.query,
            BackendQuery::Historical { start, end },
            |resolved| format!("Historical weather for {} ({} to {})", resolved.name, start, end),
        )
        .await
    }
}

#[async_trait]
impl Tool for HistoricalTool {
    fn name(&self) -> &str {
        "get_historical_weather"
    }

    fn description(&self) -> &str {
        "Get archived daily weather for a past date range. The archive ends five \
         days behind today; use get_weather_forecast for recent or future dates."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "start_date": {
                    "type": "string",
                    "description": "Range start, YYYY-MM-DD"
                },
                "end_date": {
                    "type": "string",
                    "description": "Range end, YYYY-MM-DD"
                },
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
                }
            },
            "required": ["start_date", "end_date"]
        })
    }

    async fn call(&self, args: Value) -> Value {
        into_envelope(self.name(), self.run(args).await)
    }
}
