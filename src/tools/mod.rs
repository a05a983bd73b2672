//! Tool dispatchers exposed to the LLM agent framework
//!
//! Every dispatcher follows the same pipeline: validate the request,
//! resolve the location, fetch from the weather data collaborator, and
//! enrich the raw payload into the uniform response envelope. Failures
//! never escape as errors; the boundary always returns parseable JSON
//! with an `error` field, because the consumer is an automated agent.

pub mod agricultural;
pub mod forecast;
pub mod historical;

pub use agricultural::AgriculturalTool;
pub use forecast::ForecastTool;
pub use historical::HistoricalTool;

use crate::api::{GeocodingProvider, WeatherDataProvider};
use crate::error::AgricastError;
use crate::location_resolver::LocationResolver;
use crate::models::{LocationQuery, ResolvedLocation, enrich};
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Trait for tools that LLM agents can invoke
///
/// Each tool provides a name, description, and JSON schema for its
/// arguments; the agent framework uses these to generate tool calls.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, unique within a registry
    fn name(&self) -> &str;

    /// Description shown to the LLM when it decides which tool to use
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments
    fn input_schema(&self) -> Value;

    /// Execute the tool. Always returns JSON: either the enriched
    /// response envelope or `{"error": "..."}`.
    async fn call(&self, args: Value) -> Value;
}

/// Collaborators shared by all tool dispatchers, injected at construction
pub struct ToolDeps {
    pub resolver: LocationResolver,
    pub weather: Arc<dyn WeatherDataProvider>,
}

impl ToolDeps {
    /// Wire the dispatchers' collaborators
    pub fn new(geocoder: Arc<dyn GeocodingProvider>, weather: Arc<dyn WeatherDataProvider>) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
            weather,
        }
    }
}

/// Backend query plan built by a tool's validator
pub(crate) enum BackendQuery {
    Forecast { days: u32 },
    Historical { start: NaiveDate, end: NaiveDate },
    Agricultural { days: u32 },
}

/// Shared validate-resolve-fetch-enrich pipeline.
///
/// Runs after per-tool validation: resolves the location, dispatches
/// the planned query to the weather collaborator, and merges the raw
/// payload with location metadata and the tool's summary line.
pub(crate) async fn run_pipeline(
    deps: &ToolDeps,
    query: &LocationQuery,
    backend: BackendQuery,
    summary: impl FnOnce(&ResolvedLocation) -> String,
) -> Result<Value> {
    let resolved = deps.resolver.resolve(query).await?;

    let raw = match backend {
        BackendQuery::Forecast { days } => {
            deps.weather
                .forecast(resolved.latitude, resolved.longitude, days)
                .await?
        }
        BackendQuery::Historical { start, end } => {
            deps.weather
                .historical(resolved.latitude, resolved.longitude, start, end)
                .await?
        }
        BackendQuery::Agricultural { days } => {
            deps.weather
                .agricultural(resolved.latitude, resolved.longitude, days)
                .await?
        }
    };

    let summary = summary(&resolved);
    Ok(enrich(raw, &resolved, summary))
}

/// Deserialize tool-call arguments, mapping shape mismatches to the
/// arguments error so the agent sees what was wrong
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| AgricastError::arguments(e.to_string()))
}

/// Convert a pipeline outcome into the boundary JSON
pub(crate) fn into_envelope(tool: &str, result: Result<Value>) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!("{} failed: {}", tool, err);
            json!({ "error": err.agent_message() })
        }
    }
}

/// Registry of tools exposed to the agent framework
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap();
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        tools.get(name).cloned()
    }

    /// List tool definitions for the agent framework: name,
    /// description, and input schema per tool
    #[must_use]
    pub fn definitions(&self) -> Value {
        let tools = self.tools.read().unwrap();
        let mut defs: Vec<Value> = tools
            .values()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "input_schema": tool.input_schema(),
                })
            })
            .collect();
        defs.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
        Value::Array(defs)
    }

    /// Dispatch a tool call by name. Unknown names produce the same
    /// error envelope as any other failure.
    pub async fn dispatch(&self, name: &str, args: Value) -> Value {
        match self.get(name) {
            Some(tool) => tool.call(args).await,
            None => {
                warn!("Unknown tool requested: {}", name);
                json!({ "error": format!("Unknown tool: {name}") })
            }
        }
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap();
        tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap();
        tools.is_empty()
    }
}

/// Build the registry with the three weather tools over shared collaborators
#[must_use]
pub fn builtin_registry(
    geocoder: Arc<dyn GeocodingProvider>,
    weather: Arc<dyn WeatherDataProvider>,
) -> ToolRegistry {
    let deps = Arc::new(ToolDeps::new(geocoder, weather));

    let registry = ToolRegistry::new();
    registry.register(Arc::new(ForecastTool::new(deps.clone())));
    registry.register(Arc::new(HistoricalTool::new(deps.clone())));
    registry.register(Arc::new(AgriculturalTool::new(deps)));
    registry
}
