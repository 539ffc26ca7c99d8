//! MCP server exposing the aggregator as the `get_weather` tool over stdio.

use std::sync::Arc;

use anyhow::Context;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::{Deserialize, Serialize};
use weather_dash_core::{Coordinates, WeatherSource};

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct WeatherParams {
    #[schemars(description = "Latitude in decimal degrees")]
    pub lat: f64,
    #[schemars(description = "Longitude in decimal degrees")]
    pub lon: f64,
}

#[derive(Clone)]
pub struct WeatherTool {
    source: Arc<dyn WeatherSource>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WeatherTool {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Get current, hourly and 7-day weather for a location, including temperature, humidity, wind and US air-quality index"
    )]
    async fn get_weather(
        &self,
        Parameters(params): Parameters<WeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = weather_report(self.source.as_ref(), &params).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for WeatherTool {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Call get_weather with lat/lon to receive the merged Open-Meteo forecast and air-quality data as JSON."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

/// Text payload for one tool call: the pretty-printed bundle, or an error
/// message. Failures are reported in-band rather than as protocol errors.
pub async fn weather_report(source: &dyn WeatherSource, params: &WeatherParams) -> String {
    let coords = match Coordinates::new(params.lat, params.lon) {
        Ok(coords) => coords,
        Err(err) => return format!("Invalid coordinates: {err}"),
    };

    match source.fetch_weather(coords).await {
        Ok(bundle) => serde_json::to_string_pretty(&bundle)
            .unwrap_or_else(|err| format!("Failed to serialize weather data: {err}")),
        Err(err) => {
            tracing::warn!(error = %err, "get_weather tool call failed");
            err.user_message().to_string()
        }
    }
}

/// Serve the tool on stdin/stdout until the client disconnects.
pub async fn serve_stdio(source: Arc<dyn WeatherSource>) -> anyhow::Result<()> {
    tracing::info!("starting MCP server on stdio");

    let service = WeatherTool::new(source)
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;

    let reason = service.waiting().await.context("MCP server task failed")?;
    tracing::info!(?reason, "MCP server stopped");
    Ok(())
}
