//! `get_agricultural_conditions` tool

use super::{BackendQuery, Tool, ToolDeps, into_envelope, parse_args, run_pipeline};
use crate::models::AgriculturalRequest;
use crate::validate::{AGRICULTURAL_MAX_DAYS, clamp_days};
use crate::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

/// Soil moisture, soil temperature, and evapotranspiration outlook
pub struct AgriculturalTool {
    deps: Arc<ToolDeps>,
}

impl AgriculturalTool {
    pub fn new(deps: Arc<ToolDeps>) -> Self {
        Self { deps }
    }

    async fn run(&self, args: Value) -> Result<Value> {
        let request: AgriculturalRequest = parse_args(args)?;
        let days = clamp_days(request.days, AGRICULTURAL_MAX_DAYS);

        run_pipeline(
            &self.deps,
            &request.query,
            BackendQuery::Agricultural { days },
            |resolved| format!("Agricultural conditions for {} ({} days)", resolved.name, days),
        )
        .await
    }
}

#[async_trait]
impl Tool for AgriculturalTool {
    fn name(&self) -> &str {
        "get_agricultural_conditions"
    }

    fn description(&self) -> &str {
        "Get agricultural conditions for a location: soil moisture and temperature, \
         evapotranspiration, humidity, and precipitation outlook."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Location name, e.g. 'Ames, Iowa'"
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
                    "description": "Outlook horizon in days (1-7, default 7)"
                }
            }
        })
    }

    async fn call(&self, args: Value) -> Value {
        into_envelope(self.name(), self.run(args).await)
    }
}
