use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::{
    error::UpstreamError,
    model::{Coordinates, WeatherBundle},
};

use super::{WeatherSource, get_json};

const ENDPOINT: &str = "weather endpoint";

/// Reads bundles from a running `/api/weather` endpoint instead of the
/// upstream services.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .no_proxy()
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WeatherSource for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherBundle, UpstreamError> {
        let url = format!("{}/api/weather", self.base_url);
        let query = [
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
        ];

        let bundle: WeatherBundle = get_json(&self.http, ENDPOINT, &url, &query).await?;
        if !bundle.hourly.is_aligned() || !bundle.daily.is_aligned() {
            return Err(UpstreamError::Malformed {
                service: ENDPOINT,
                reason: "series differ in length".to_string(),
            });
        }
        Ok(bundle)
    }
}
