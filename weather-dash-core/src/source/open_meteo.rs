use async_trait::async_trait;
use reqwest::{Client, Proxy};
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::{
    config::UpstreamConfig,
    error::UpstreamError,
    model::{Coordinates, CurrentConditions, DailySeries, HourlySeries, WeatherBundle},
};

use super::{WeatherSource, get_json};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,weather_code,wind_speed_10m,wind_direction_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m,wind_direction_10m";
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,wind_speed_10m_max,wind_gusts_10m_max";
const AQI_FIELDS: &str = "us_aqi";

const FORECAST: &str = "forecast";
const AIR_QUALITY: &str = "air-quality";

const HOURS_PER_DAY: usize = 24;
/// Hour of each day whose AQI stands in for the daily value.
const MIDDAY_HOUR: usize = 12;

/// Fetches the forecast and air-quality APIs concurrently and merges them.
#[derive(Debug, Clone)]
pub struct OpenMeteoAggregator {
    http: Client,
    forecast_url: String,
    air_quality_url: String,
}

impl OpenMeteoAggregator {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        // Only the configured proxy is used; system proxy variables are not.
        let mut builder = match &config.proxy_url {
            Some(url) => builder.proxy(Proxy::all(url).map_err(UpstreamError::Client)?),
            None => builder.no_proxy(),
        };

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build().map_err(UpstreamError::Client)?,
            forecast_url: config.forecast_url.clone(),
            air_quality_url: config.air_quality_url.clone(),
        })
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_forecast(&self, coords: Coordinates) -> Result<ForecastResponse, UpstreamError> {
        let query = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];

        get_json(&self.http, FORECAST, &self.forecast_url, &query).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_air_quality(
        &self,
        coords: Coordinates,
    ) -> Result<AirQualityResponse, UpstreamError> {
        let query = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", AQI_FIELDS.to_string()),
            ("hourly", AQI_FIELDS.to_string()),
        ];

        get_json(&self.http, AIR_QUALITY, &self.air_quality_url, &query).await
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoAggregator {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherBundle, UpstreamError> {
        let joined = tokio::try_join!(
            self.fetch_forecast(coords),
            self.fetch_air_quality(coords)
        );

        let result = joined.and_then(|(forecast, air)| merge(forecast, air));
        if let Err(err) = &result {
            tracing::error!(error = ?err, "weather upstream failed");
        }
        result
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Default, Deserialize)]
pub struct AirQualityResponse {
    #[serde(default)]
    pub current: Option<AqiCurrent>,
    #[serde(default)]
    pub hourly: Option<AqiHourly>,
}

#[derive(Debug, Deserialize)]
pub struct AqiCurrent {
    #[serde(default)]
    pub us_aqi: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AqiHourly {
    #[serde(default)]
    pub us_aqi: Option<Vec<Option<f64>>>,
}

/// Combine the two upstream bodies into one bundle.
///
/// The hourly AQI series is padded or cut to the forecast's hour count; the
/// daily AQI samples are taken from the series as the upstream sent it.
pub fn merge(
    forecast: ForecastResponse,
    air: AirQualityResponse,
) -> Result<WeatherBundle, UpstreamError> {
    let ForecastResponse {
        mut current,
        mut hourly,
        mut daily,
    } = forecast;

    if !hourly.is_aligned() {
        return Err(malformed("hourly series differ in length"));
    }
    if !daily.is_aligned() {
        return Err(malformed("daily series differ in length"));
    }

    let hourly_aqi = air.hourly.and_then(|h| h.us_aqi);

    current.us_aqi = air.current.and_then(|c| c.us_aqi);
    daily.us_aqi_mean = hourly_aqi
        .as_deref()
        .map(daily_aqi_samples)
        .unwrap_or_default();

    let hours = hourly.len();
    hourly.us_aqi = hourly_aqi.map(|mut aqi| {
        aqi.resize(hours, None);
        aqi
    });

    daily.truncate(DailySeries::MAX_DAYS);

    Ok(WeatherBundle {
        current,
        hourly,
        daily,
    })
}

/// The AQI at 12:00 of each day (indices 12, 36, 60, ...), first week only.
pub fn daily_aqi_samples(hourly_aqi: &[Option<f64>]) -> Vec<Option<f64>> {
    hourly_aqi
        .iter()
        .skip(MIDDAY_HOUR)
        .step_by(HOURS_PER_DAY)
        .take(DailySeries::MAX_DAYS)
        .copied()
        .collect()
}

fn malformed(reason: &str) -> UpstreamError {
    UpstreamError::Malformed {
        service: FORECAST,
        reason: reason.to_string(),
    }
}
