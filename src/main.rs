//! Command-line entry point: execute one tool call against the live
//! backends and print the JSON result. Useful for smoke-testing the
//! same boundary the agent framework consumes.

use agricast::config::AgricastConfig;
use agricast::tools::builtin_registry;
use agricast::OpenMeteoClient;
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AgricastConfig::load().with_context(|| "Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let client = Arc::new(OpenMeteoClient::new(&config)?);
    let registry = builtin_registry(client.clone(), client);

    let mut args = std::env::args().skip(1);
    let Some(tool_name) = args.next() else {
        eprintln!("Usage: agricast <tool> [json-arguments]");
        eprintln!("       agricast list");
        bail!("no tool name given");
    };

    if tool_name == "list" {
        println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        return Ok(());
    }

    let raw_args = args.next().unwrap_or_else(|| "{}".to_string());
    let tool_args =
        serde_json::from_str(&raw_args).with_context(|| "Tool arguments must be valid JSON")?;

    let result = registry.dispatch(&tool_name, tool_args).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
