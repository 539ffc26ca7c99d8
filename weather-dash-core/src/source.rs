use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::{
    error::UpstreamError,
    model::{Coordinates, WeatherBundle},
};

pub mod api_client;
pub mod open_meteo;

pub use api_client::ApiClient;
pub use open_meteo::OpenMeteoAggregator;

/// Anything that can produce a [`WeatherBundle`] for a coordinate.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherBundle, UpstreamError>;
}

/// GET `url` and decode a JSON body, classifying failures by `service`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    service: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, UpstreamError> {
    tracing::debug!(service, url, "upstream request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| UpstreamError::Request { service, source })?;

    let status = res.status();
    if !status.is_success() {
        return Err(UpstreamError::Status { service, status });
    }

    res.json::<T>()
        .await
        .map_err(|source| UpstreamError::Decode { service, source })
}
