use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use weather_dash_core::{
    Dashboard, UnitFormatter, WeatherBundle, WindSpeedUnit,
    convert::{aqi_description, icon_for, name_for, wind_level_for},
};

const HOURS_SHOWN: usize = 12;

/// Human-friendly view of a dashboard snapshot.
pub struct DashboardView<'a> {
    pub dashboard: &'a Dashboard,
    pub formatter: UnitFormatter,
    /// Overrides the preferred wind unit for this view only.
    pub wind_unit: Option<WindSpeedUnit>,
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.dashboard.location();
        write!(
            f,
            "{} ({:.4}, {:.4})",
            location.name, location.coordinates.latitude, location.coordinates.longitude
        )?;
        if let Some(at) = self.dashboard.fetched_at() {
            write!(f, "  fetched {}", at.format("%Y-%m-%d %H:%M UTC"))?;
        }
        writeln!(f)?;

        match self.dashboard.data() {
            Some(bundle) => self.bundle(f, bundle),
            None => writeln!(f, "  No weather data"),
        }
    }
}

impl DashboardView<'_> {
    fn wind(&self, speed_kmh: f64) -> String {
        self.formatter.wind_speed(speed_kmh, self.wind_unit)
    }

    fn temp(&self, celsius: f64) -> String {
        self.formatter.temperature(celsius, true)
    }

    fn bundle(&self, f: &mut fmt::Formatter<'_>, bundle: &WeatherBundle) -> fmt::Result {
        let current = &bundle.current;
        let aqi = aqi_description(current.us_aqi);

        writeln!(
            f,
            "  {} [{}] at {}",
            name_for(current.weather_code),
            icon_for(current.weather_code, current.is_daytime()),
            hour_label(&current.time)
        )?;
        writeln!(
            f,
            "  Temperature {} (feels like {})  Humidity {:.0}%",
            self.temp(current.temperature_2m),
            self.temp(current.apparent_temperature),
            current.relative_humidity_2m
        )?;
        writeln!(
            f,
            "  Wind {} from {} (Beaufort {})",
            self.wind(current.wind_speed_10m),
            compass(current.wind_direction_10m),
            wind_level_for(current.wind_speed_10m)
        )?;
        match current.us_aqi {
            Some(value) => writeln!(f, "  Air quality {value:.0} {}", aqi.label())?,
            None => writeln!(f, "  Air quality: {}", aqi.label())?,
        }

        // Rows stop at the shortest series.
        let hourly = &bundle.hourly;
        let start = hourly.position_at_or_after(&current.time).unwrap_or(0);
        let hours: Vec<_> = hourly
            .time
            .iter()
            .zip(&hourly.temperature_2m)
            .zip(&hourly.weather_code)
            .zip(&hourly.wind_speed_10m)
            .enumerate()
            .skip(start)
            .take(HOURS_SHOWN)
            .collect();
        if !hours.is_empty() {
            writeln!(f)?;
            writeln!(f, "Next hours")?;
        }
        for (i, (((time, &temp), &code), &wind)) in hours {
            writeln!(
                f,
                "  {:>5}  {:>6}  {:<24} {:>12}  AQI {}",
                hour_label(time),
                self.temp(temp),
                name_for(code),
                self.wind(wind),
                aqi_text(hourly.aqi_at(i))
            )?;
        }

        let daily = &bundle.daily;
        let days: Vec<_> = daily
            .time
            .iter()
            .zip(&daily.temperature_2m_max)
            .zip(&daily.temperature_2m_min)
            .zip(&daily.weather_code)
            .zip(daily.wind_speed_10m_max.iter().zip(&daily.wind_gusts_10m_max))
            .enumerate()
            .collect();
        if !days.is_empty() {
            writeln!(f)?;
            writeln!(f, "Next days")?;
        }
        for (i, ((((date, &max), &min), &code), (&wind, &gusts))) in days {
            writeln!(
                f,
                "  {:<10}  {:>6} / {:<6}  {:<24} wind {} gusts {}  AQI {}",
                day_label(date),
                self.temp(max),
                self.temp(min),
                name_for(code),
                self.wind(wind),
                self.wind(gusts),
                aqi_text(daily.us_aqi_mean.get(i).copied().flatten())
            )?;
        }

        Ok(())
    }
}

fn aqi_text(aqi: Option<f64>) -> String {
    match aqi {
        Some(value) => format!("{value:.0} ({})", aqi_description(aqi).label()),
        None => "-".to_string(),
    }
}

/// `2025-03-01T09:00` -> `09:00`; unparseable input is shown as-is.
fn hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|_| time.to_string())
}

/// `2025-03-01` -> `Sat 01 Mar`.
fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Eight-point compass name for a direction the wind blows from.
fn compass(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((degrees.rem_euclid(360.0) + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[index]
}
