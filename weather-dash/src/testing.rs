//! Test doubles shared by the endpoint and tool tests.

use std::sync::Mutex;

use async_trait::async_trait;
use weather_dash_core::{
    Coordinates, CurrentConditions, DailySeries, HourlySeries, UpstreamError, WeatherBundle,
    WeatherSource,
};

pub fn sample_bundle() -> WeatherBundle {
    WeatherBundle {
        current: CurrentConditions {
            time: "2025-03-01T09:00".into(),
            interval: 900,
            temperature_2m: 14.2,
            relative_humidity_2m: 81.0,
            apparent_temperature: 12.9,
            is_day: 1,
            weather_code: 2,
            wind_speed_10m: 17.3,
            wind_direction_10m: 64.0,
            us_aqi: Some(57.0),
        },
        hourly: HourlySeries {
            time: vec![
                "2025-03-01T08:00".into(),
                "2025-03-01T09:00".into(),
                "2025-03-01T10:00".into(),
            ],
            temperature_2m: vec![13.1, 14.2, 15.0],
            weather_code: vec![1, 2, 61],
            wind_speed_10m: vec![15.0, 17.3, 20.4],
            wind_direction_10m: vec![60.0, 64.0, 70.0],
            us_aqi: Some(vec![Some(55.0), Some(57.0), None]),
        },
        daily: DailySeries {
            time: vec!["2025-03-01".into(), "2025-03-02".into()],
            weather_code: vec![61, 0],
            temperature_2m_max: vec![16.4, 18.0],
            temperature_2m_min: vec![9.2, 8.0],
            wind_speed_10m_max: vec![25.0, 12.0],
            wind_gusts_10m_max: vec![48.2, 20.0],
            us_aqi_mean: vec![Some(57.0)],
        },
    }
}

/// Records every call; either always returns the same bundle or always
/// fails.
#[derive(Debug)]
pub struct FakeSource {
    bundle: Option<WeatherBundle>,
    calls: Mutex<Vec<Coordinates>>,
}

impl FakeSource {
    /// Succeeds with [`sample_bundle`].
    pub fn ok() -> Self {
        Self::returning(sample_bundle())
    }

    pub fn returning(bundle: WeatherBundle) -> Self {
        Self {
            bundle: Some(bundle),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            bundle: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Coordinates> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for FakeSource {
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherBundle, UpstreamError> {
        self.calls.lock().unwrap().push(coords);
        self.bundle.clone().ok_or_else(|| UpstreamError::Malformed {
            service: "air-quality",
            reason: "connection reset".into(),
        })
    }
}
