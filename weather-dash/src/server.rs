//! HTTP endpoint: `GET /api/weather?lat=&lon=`.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use weather_dash_core::{CoordinateError, Coordinates, UpstreamError, WeatherBundle, WeatherSource};

#[derive(Debug, Clone)]
pub struct AppState {
    source: Arc<dyn WeatherSource>,
}

/// Raw query; both values are validated by [`Coordinates::parse`].
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(CoordinateError),
    Upstream(UpstreamError),
}

impl From<CoordinateError> for ApiError {
    fn from(err: CoordinateError) -> Self {
        ApiError::BadRequest(err)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Upstream(err) => (StatusCode::BAD_GATEWAY, err.user_message().to_string()),
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(source: Arc<dyn WeatherSource>) -> Router {
    Router::new()
        .route("/api/weather", get(weather))
        .route("/healthz", get(healthz))
        .with_state(AppState { source })
}

async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherBundle>, ApiError> {
    let coords = Coordinates::parse(query.lat.as_deref(), query.lon.as_deref())?;
    let bundle = state.source.fetch_weather(coords).await?;
    Ok(Json(bundle))
}

async fn healthz() -> &'static str {
    "ok"
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, source: Arc<dyn WeatherSource>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, "weather endpoint listening");

    axum::serve(listener, router(source))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
