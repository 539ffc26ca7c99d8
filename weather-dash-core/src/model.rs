use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        Ok(Self {
            latitude: finite("lat", latitude)?,
            longitude: finite("lon", longitude)?,
        })
    }

    /// Validate raw query values. Absent or empty values are `Missing`;
    /// anything that is not a finite number is `NotANumber`.
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Result<Self, CoordinateError> {
        let (Some(lat), Some(lon)) = (non_empty(lat), non_empty(lon)) else {
            return Err(CoordinateError::Missing);
        };

        Ok(Self {
            latitude: parse_component("lat", lat)?,
            longitude: parse_component("lon", lon)?,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_component(name: &'static str, raw: &str) -> Result<f64, CoordinateError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError::NotANumber {
            name,
            value: raw.to_string(),
        })
}

fn finite(name: &'static str, value: f64) -> Result<f64, CoordinateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoordinateError::NotANumber {
            name,
            value: value.to_string(),
        })
    }
}

/// The place the dashboard is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub coordinates: Coordinates,
    pub name: String,
}

impl Location {
    pub fn new(coordinates: Coordinates, name: impl Into<String>) -> Self {
        Self {
            coordinates,
            name: name.into(),
        }
    }
}

impl Default for Location {
    /// Zhoushan, Zhejiang.
    fn default() -> Self {
        Self {
            coordinates: Coordinates {
                latitude: 29.9958,
                longitude: 122.2061,
            },
            name: "Zhoushan".to_string(),
        }
    }
}

/// Conditions at fetch time. Field names match the upstream wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Upstream local time, `YYYY-MM-DDTHH:MM`.
    pub time: String,
    /// Seconds covered by the reading.
    pub interval: u32,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    /// 1 during daylight, 0 at night.
    pub is_day: u8,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us_aqi: Option<f64>,
}

impl CurrentConditions {
    pub fn is_daytime(&self) -> bool {
        self.is_day != 0
    }
}

/// Hour-by-hour series; index `i` of every vector describes the same hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub weather_code: Vec<i32>,
    pub wind_speed_10m: Vec<f64>,
    pub wind_direction_10m: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us_aqi: Option<Vec<Option<f64>>>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        let n = self.len();
        self.temperature_2m.len() == n
            && self.weather_code.len() == n
            && self.wind_speed_10m.len() == n
            && self.wind_direction_10m.len() == n
            && self.us_aqi.as_ref().is_none_or(|aqi| aqi.len() == n)
    }

    /// Index of the first hour at or after `time` (both upstream local
    /// ISO strings, which sort lexically).
    pub fn position_at_or_after(&self, time: &str) -> Option<usize> {
        self.time.iter().position(|t| t.as_str() >= time)
    }

    pub fn aqi_at(&self, index: usize) -> Option<f64> {
        self.us_aqi.as_ref()?.get(index).copied().flatten()
    }
}

/// Day-by-day series, at most [`DailySeries::MAX_DAYS`] long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub weather_code: Vec<i32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub wind_speed_10m_max: Vec<f64>,
    pub wind_gusts_10m_max: Vec<f64>,
    /// Midday sample of the hourly AQI for each day, not a true mean.
    /// Shorter than the other vectors when the air-quality forecast
    /// covers fewer days.
    #[serde(default)]
    pub us_aqi_mean: Vec<Option<f64>>,
}

impl DailySeries {
    pub const MAX_DAYS: usize = 7;

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        let n = self.len();
        self.weather_code.len() == n
            && self.temperature_2m_max.len() == n
            && self.temperature_2m_min.len() == n
            && self.wind_speed_10m_max.len() == n
            && self.wind_gusts_10m_max.len() == n
    }

    pub fn truncate(&mut self, days: usize) {
        self.time.truncate(days);
        self.weather_code.truncate(days);
        self.temperature_2m_max.truncate(days);
        self.temperature_2m_min.truncate(days);
        self.wind_speed_10m_max.truncate(days);
        self.wind_gusts_10m_max.truncate(days);
        self.us_aqi_mean.truncate(days);
    }
}

/// Merged forecast and air-quality data for one location, built fresh on
/// every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}
