use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PreferenceError;

/// Unit used to display wind speeds. Upstream always reports km/h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindSpeedUnit {
    #[default]
    #[serde(rename = "km/h")]
    KilometresPerHour,
    #[serde(rename = "m/s")]
    MetresPerSecond,
    #[serde(rename = "mph")]
    MilesPerHour,
    #[serde(rename = "knots")]
    Knots,
    #[serde(rename = "bft")]
    Beaufort,
}

impl WindSpeedUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindSpeedUnit::KilometresPerHour => "km/h",
            WindSpeedUnit::MetresPerSecond => "m/s",
            WindSpeedUnit::MilesPerHour => "mph",
            WindSpeedUnit::Knots => "knots",
            WindSpeedUnit::Beaufort => "bft",
        }
    }

    /// Human-readable option label for settings menus.
    pub fn label(&self) -> &'static str {
        match self {
            WindSpeedUnit::KilometresPerHour => "Kilometres per hour (km/h)",
            WindSpeedUnit::MetresPerSecond => "Metres per second (m/s)",
            WindSpeedUnit::MilesPerHour => "Miles per hour (mph)",
            WindSpeedUnit::Knots => "Knots (knots)",
            WindSpeedUnit::Beaufort => "Beaufort scale (Bft)",
        }
    }

    pub const fn all() -> &'static [WindSpeedUnit] {
        &[
            WindSpeedUnit::KilometresPerHour,
            WindSpeedUnit::MetresPerSecond,
            WindSpeedUnit::MilesPerHour,
            WindSpeedUnit::Knots,
            WindSpeedUnit::Beaufort,
        ]
    }
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindSpeedUnit {
    type Err = PreferenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        WindSpeedUnit::all()
            .iter()
            .copied()
            .find(|unit| unit.as_str() == value)
            .ok_or_else(|| PreferenceError::InvalidValue {
                kind: "wind speed unit",
                value: value.to_string(),
            })
    }
}

/// Unit used to display temperatures. Upstream always reports Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius (°C)",
            TemperatureUnit::Fahrenheit => "Fahrenheit (°F)",
            TemperatureUnit::Kelvin => "Kelvin (K)",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[
            TemperatureUnit::Celsius,
            TemperatureUnit::Fahrenheit,
            TemperatureUnit::Kelvin,
        ]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = PreferenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TemperatureUnit::all()
            .iter()
            .copied()
            .find(|unit| unit.as_str() == value)
            .ok_or_else(|| PreferenceError::InvalidValue {
                kind: "temperature unit",
                value: value.to_string(),
            })
    }
}
