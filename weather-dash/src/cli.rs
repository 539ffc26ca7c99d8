use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Select;
use weather_dash_core::{
    ApiClient, Config, Coordinates, Dashboard, FileStore, Location, OpenMeteoAggregator,
    Preferences, TemperatureUnit, UnitFormatter, WeatherSource, WindSpeedUnit,
};

use crate::{render::DashboardView, server, tool};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Weather dashboard backend and terminal client")]
pub struct Cli {
    /// Preferences file; defaults to the platform data directory.
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /api/weather` over HTTP.
    Serve {
        /// Listen address, e.g. "0.0.0.0:3000".
        #[arg(long)]
        bind: Option<String>,
    },

    /// Serve the `get_weather` tool over MCP on stdin/stdout.
    Mcp,

    /// Fetch and print the dashboard for a location.
    Show {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Display name for the location.
        #[arg(long)]
        name: Option<String>,

        /// Base URL of a running `serve` instance; upstream is queried
        /// directly when absent.
        #[arg(long)]
        server: Option<String>,

        /// Wind unit for this run only (km/h, m/s, mph, knots, bft).
        #[arg(long)]
        wind_unit: Option<WindSpeedUnit>,
    },

    /// Choose display units. Prompts for both when no flag is given.
    Configure {
        #[arg(long)]
        wind_unit: Option<WindSpeedUnit>,

        #[arg(long)]
        temperature_unit: Option<TemperatureUnit>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let config = Config::load()?;
                let bind = bind.unwrap_or_else(|| config.server.bind.clone());
                server::serve(&bind, aggregator(&config)?).await
            }
            Command::Mcp => {
                let config = Config::load()?;
                tool::serve_stdio(aggregator(&config)?).await
            }
            Command::Show {
                lat,
                lon,
                name,
                server,
                wind_unit,
            } => {
                let prefs = open_preferences(self.preferences)?;
                let formatter = UnitFormatter::new(prefs.snapshot()?);

                let source: Arc<dyn WeatherSource> = match server {
                    Some(url) => Arc::new(ApiClient::new(&url)?),
                    None => aggregator(&Config::load()?)?,
                };

                let mut dashboard = Dashboard::default();
                let coords = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)?),
                    _ => None,
                };
                if let Some(coords) = coords {
                    let name = name.unwrap_or_else(|| {
                        format!("{:.4}, {:.4}", coords.latitude, coords.longitude)
                    });
                    dashboard.set_location(Location::new(coords, name));
                } else if let Some(name) = name {
                    let coords = dashboard.location().coordinates;
                    dashboard.set_location(Location::new(coords, name));
                }

                dashboard
                    .refresh(source.as_ref(), None)
                    .await
                    .context("Failed to fetch weather data")?;

                print!(
                    "{}",
                    DashboardView {
                        dashboard: &dashboard,
                        formatter,
                        wind_unit,
                    }
                );
                Ok(())
            }
            Command::Configure {
                wind_unit,
                temperature_unit,
            } => {
                let mut prefs = open_preferences(self.preferences)?;
                let interactive = wind_unit.is_none() && temperature_unit.is_none();

                let wind_unit = match wind_unit {
                    Some(unit) => Some(unit),
                    None if interactive => Some(prompt_unit(
                        "Wind speed unit:",
                        WindSpeedUnit::all(),
                        prefs.wind_speed_unit()?,
                        WindSpeedUnit::label,
                    )?),
                    None => None,
                };
                let temperature_unit = match temperature_unit {
                    Some(unit) => Some(unit),
                    None if interactive => Some(prompt_unit(
                        "Temperature unit:",
                        TemperatureUnit::all(),
                        prefs.temperature_unit()?,
                        TemperatureUnit::label,
                    )?),
                    None => None,
                };

                if let Some(unit) = wind_unit {
                    prefs.set_wind_speed_unit(unit)?;
                }
                if let Some(unit) = temperature_unit {
                    prefs.set_temperature_unit(unit)?;
                }

                let saved = prefs.snapshot()?;
                println!(
                    "Saved: wind speed in {}, temperature in {}",
                    saved.wind_speed_unit, saved.temperature_unit
                );
                Ok(())
            }
        }
    }
}

fn aggregator(config: &Config) -> anyhow::Result<Arc<dyn WeatherSource>> {
    let aggregator = OpenMeteoAggregator::new(&config.upstream)
        .context("Failed to set up upstream HTTP client")?;
    Ok(Arc::new(aggregator))
}

fn open_preferences(path: Option<PathBuf>) -> anyhow::Result<Preferences<FileStore>> {
    let path = match path {
        Some(path) => path,
        None => Config::preferences_file_path()?,
    };
    let store = FileStore::open(&path)
        .with_context(|| format!("Failed to open preferences: {}", path.display()))?;
    Ok(Preferences::new(store))
}

/// Ask the user to pick one of `options`, starting on `current`.
fn prompt_unit<T: Copy + PartialEq>(
    message: &str,
    options: &[T],
    current: T,
    label: fn(&T) -> &'static str,
) -> anyhow::Result<T> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let cursor = options.iter().position(|o| *o == current).unwrap_or(0);

    let choice = Select::new(message, labels)
        .with_starting_cursor(cursor)
        .raw_prompt()
        .context("Prompt cancelled")?;

    Ok(options[choice.index])
}
