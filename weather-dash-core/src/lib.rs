//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The merged forecast + air-quality data model
//! - Upstream aggregation over Open-Meteo (and a client for the HTTP endpoint)
//! - Display conversions for weather codes, wind, temperature and AQI
//! - Persisted unit preferences
//! - Configuration handling
//!
//! It is used by the `weather-dash` binary, which serves it over HTTP and MCP.

pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod preferences;
pub mod source;
pub mod units;

pub use config::{Config, ServerConfig, UpstreamConfig};
pub use convert::{AqiLevel, UnitFormatter};
pub use dashboard::Dashboard;
pub use error::{CoordinateError, PreferenceError, UpstreamError};
pub use model::{Coordinates, CurrentConditions, DailySeries, HourlySeries, Location, WeatherBundle};
pub use preferences::{FileStore, KeyValueStore, MemoryStore, Preferences, UserPreferences};
pub use source::{ApiClient, OpenMeteoAggregator, WeatherSource};
pub use units::{TemperatureUnit, WindSpeedUnit};
