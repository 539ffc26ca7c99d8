//! Display conversions: WMO weather codes, wind speed, temperature and AQI.
//!
//! Every function here is total. Unknown codes and missing readings map to
//! sentinel values instead of errors.

use crate::{
    preferences::UserPreferences,
    units::{TemperatureUnit, WindSpeedUnit},
};

/// Icon class returned for codes outside the WMO table.
pub const ICON_NOT_AVAILABLE: &str = "i-wi-na";

/// Label returned for codes outside the WMO table.
pub const UNKNOWN_CONDITION: &str = "unknown";

/// Map a WMO weather code to a Weather Icons class name.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn icon_for(code: i32, is_day: bool) -> &'static str {
    match code {
        0 if is_day => "i-wi-day-sunny",
        0 => "i-wi-night-clear",
        1 | 2 if is_day => "i-wi-day-cloudy",
        1 | 2 => "i-wi-night-alt-cloudy",
        3 => "i-wi-cloudy",
        45 | 48 => "i-wi-fog",
        51 | 53 | 55 => "i-wi-sprinkle",
        61 | 63 | 65 => "i-wi-rain",
        66 | 67 => "i-wi-rain-mix",
        71 | 73 | 75 | 77 | 85 | 86 => "i-wi-snow",
        80..=82 => "i-wi-showers",
        95 | 96 | 99 => "i-wi-thunderstorm",
        _ => ICON_NOT_AVAILABLE,
    }
}

/// Map a WMO weather code to its condition label.
pub fn name_for(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snowfall",
        73 => "Moderate snowfall",
        75 => "Heavy snowfall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_CONDITION,
    }
}

/// Upper bounds (exclusive, km/h) of Beaufort levels 0 through 10.
const BEAUFORT_LIMITS_KMH: [f64; 11] = [
    1.0, 6.0, 12.0, 20.0, 29.0, 39.0, 50.0, 62.0, 75.0, 89.0, 103.0,
];

/// Beaufort level (0..=11) for a wind speed in km/h.
pub fn wind_level_for(speed_kmh: f64) -> u8 {
    if speed_kmh.is_nan() {
        return 0;
    }

    BEAUFORT_LIMITS_KMH
        .iter()
        .position(|limit| speed_kmh < *limit)
        .unwrap_or(BEAUFORT_LIMITS_KMH.len()) as u8
}

/// Format a km/h wind speed in `unit`. The speed is rounded to whole km/h
/// before conversion.
pub fn format_wind_speed(speed_kmh: f64, unit: WindSpeedUnit) -> String {
    let kmh = round_half_up(speed_kmh);

    match unit {
        WindSpeedUnit::KilometresPerHour => format!("{kmh} km/h"),
        WindSpeedUnit::MetresPerSecond => format!("{:.1} m/s", kmh / 3.6),
        WindSpeedUnit::MilesPerHour => format!("{:.1} mph", kmh / 1.609),
        WindSpeedUnit::Knots => format!("{:.1} knots", kmh / 1.852),
        WindSpeedUnit::Beaufort => format!("{} level", wind_level_for(kmh)),
    }
}

/// Format a Celsius temperature in `unit`, rounded to a whole degree.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit, show_unit: bool) -> String {
    let (value, suffix) = match unit {
        TemperatureUnit::Celsius => (celsius, "°"),
        TemperatureUnit::Fahrenheit => (celsius * 9.0 / 5.0 + 32.0, "°F"),
        TemperatureUnit::Kelvin => (celsius + 273.15, " K"),
    };

    let value = round_half_up(value);
    if show_unit {
        format!("{value}{suffix}")
    } else {
        value.to_string()
    }
}

/// Rounds ties towards positive infinity, so -2.5 becomes -2 on the
/// dashboard. Never yields negative zero.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded + 0.0
}

/// US EPA air-quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiLevel {
    NoData,
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::NoData => "No data",
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for sensitive groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }

    /// Colour class used to tint the label.
    pub fn severity_tag(&self) -> &'static str {
        match self {
            AqiLevel::NoData => "text-gray-400",
            AqiLevel::Good => "text-green-500",
            AqiLevel::Moderate => "text-yellow-500",
            AqiLevel::UnhealthyForSensitiveGroups => "text-orange-500",
            AqiLevel::Unhealthy => "text-red-500",
            AqiLevel::VeryUnhealthy => "text-purple-500",
            AqiLevel::Hazardous => "text-red-900",
        }
    }
}

/// Classify a US AQI reading. Each tier includes its upper bound.
pub fn aqi_description(aqi: Option<f64>) -> AqiLevel {
    match aqi {
        None => AqiLevel::NoData,
        Some(v) if v.is_nan() => AqiLevel::NoData,
        Some(v) if v <= 50.0 => AqiLevel::Good,
        Some(v) if v <= 100.0 => AqiLevel::Moderate,
        Some(v) if v <= 150.0 => AqiLevel::UnhealthyForSensitiveGroups,
        Some(v) if v <= 200.0 => AqiLevel::Unhealthy,
        Some(v) if v <= 300.0 => AqiLevel::VeryUnhealthy,
        Some(_) => AqiLevel::Hazardous,
    }
}

/// Formats readings using a snapshot of the user's preferred units.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitFormatter {
    prefs: UserPreferences,
}

impl UnitFormatter {
    pub fn new(prefs: UserPreferences) -> Self {
        Self { prefs }
    }

    pub fn preferences(&self) -> UserPreferences {
        self.prefs
    }

    /// `unit` overrides the preferred wind unit for this call only.
    pub fn wind_speed(&self, speed_kmh: f64, unit: Option<WindSpeedUnit>) -> String {
        format_wind_speed(speed_kmh, unit.unwrap_or(self.prefs.wind_speed_unit))
    }

    pub fn temperature(&self, celsius: f64, show_unit: bool) -> String {
        format_temperature(celsius, self.prefs.temperature_unit, show_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WMO_CODES: [i32; 26] = [
        0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95,
        96, 99,
    ];

    #[test]
    fn every_wmo_code_has_an_icon_and_a_name() {
        for code in WMO_CODES {
            assert_ne!(icon_for(code, true), ICON_NOT_AVAILABLE, "code {code}");
            assert_ne!(icon_for(code, false), ICON_NOT_AVAILABLE, "code {code}");
            assert_ne!(name_for(code), UNKNOWN_CONDITION, "code {code}");
        }
    }

    #[test]
    fn icon_table_values() {
        assert_eq!(icon_for(3, true), "i-wi-cloudy");
        assert_eq!(icon_for(48, true), "i-wi-fog");
        assert_eq!(icon_for(53, false), "i-wi-sprinkle");
        assert_eq!(icon_for(65, true), "i-wi-rain");
        assert_eq!(icon_for(66, true), "i-wi-rain-mix");
        assert_eq!(icon_for(77, true), "i-wi-snow");
        assert_eq!(icon_for(86, false), "i-wi-snow");
        assert_eq!(icon_for(81, true), "i-wi-showers");
        assert_eq!(icon_for(99, false), "i-wi-thunderstorm");
    }

    #[test]
    fn only_clear_and_partly_cloudy_depend_on_daylight() {
        assert_eq!(icon_for(0, true), "i-wi-day-sunny");
        assert_eq!(icon_for(0, false), "i-wi-night-clear");
        assert_eq!(icon_for(1, true), "i-wi-day-cloudy");
        assert_eq!(icon_for(2, false), "i-wi-night-alt-cloudy");

        for code in WMO_CODES.into_iter().filter(|c| *c > 2) {
            assert_eq!(icon_for(code, true), icon_for(code, false), "code {code}");
        }
    }

    #[test]
    fn unknown_codes_map_to_sentinels() {
        for code in [-1, 4, 56, 57, 100, i32::MAX] {
            assert_eq!(icon_for(code, true), ICON_NOT_AVAILABLE);
            assert_eq!(name_for(code), UNKNOWN_CONDITION);
        }
    }

    #[test]
    fn code_zero_is_a_real_condition() {
        assert_eq!(name_for(0), "Clear sky");
    }

    #[test]
    fn wind_level_boundaries() {
        assert_eq!(wind_level_for(0.0), 0);
        assert_eq!(wind_level_for(0.99), 0);
        assert_eq!(wind_level_for(1.0), 1);
        assert_eq!(wind_level_for(5.99), 1);
        assert_eq!(wind_level_for(6.0), 2);
        assert_eq!(wind_level_for(11.9), 2);
        assert_eq!(wind_level_for(12.0), 3);
        assert_eq!(wind_level_for(88.9), 9);
        assert_eq!(wind_level_for(89.0), 10);
        assert_eq!(wind_level_for(102.9), 10);
        assert_eq!(wind_level_for(103.0), 11);
        assert_eq!(wind_level_for(500.0), 11);
        assert_eq!(wind_level_for(f64::NAN), 0);
    }

    #[test]
    fn wind_level_is_monotonic() {
        let mut previous = 0;
        for tenths in 0..1200 {
            let level = wind_level_for(tenths as f64 / 10.0);
            assert!(level >= previous, "dropped at {tenths}");
            previous = level;
        }
        assert_eq!(previous, 11);
    }

    #[test]
    fn wind_speed_formatting_per_unit() {
        assert_eq!(format_wind_speed(12.4, WindSpeedUnit::KilometresPerHour), "12 km/h");
        assert_eq!(format_wind_speed(12.4, WindSpeedUnit::MetresPerSecond), "3.3 m/s");
        assert_eq!(format_wind_speed(16.0, WindSpeedUnit::MilesPerHour), "9.9 mph");
        assert_eq!(format_wind_speed(37.0, WindSpeedUnit::Knots), "20.0 knots");
        assert_eq!(format_wind_speed(15.0, WindSpeedUnit::Beaufort), "3 level");
    }

    #[test]
    fn wind_speed_is_rounded_before_conversion() {
        // 0.6 km/h rounds to 1 km/h, which is Beaufort 1 rather than 0.
        assert_eq!(format_wind_speed(0.6, WindSpeedUnit::Beaufort), "1 level");
        assert_eq!(format_wind_speed(3.5, WindSpeedUnit::MetresPerSecond), "1.1 m/s");
    }

    #[test]
    fn temperature_formatting_per_unit() {
        assert_eq!(format_temperature(0.0, TemperatureUnit::Celsius, true), "0°");
        assert_eq!(format_temperature(100.0, TemperatureUnit::Fahrenheit, true), "212°F");
        assert_eq!(format_temperature(0.0, TemperatureUnit::Kelvin, true), "273 K");
        assert_eq!(format_temperature(21.6, TemperatureUnit::Celsius, false), "22");
    }

    #[test]
    fn temperature_rounding_never_prints_negative_zero() {
        assert_eq!(format_temperature(-0.4, TemperatureUnit::Celsius, true), "0°");
        assert_eq!(format_temperature(-2.5, TemperatureUnit::Celsius, true), "-2°");
        assert_eq!(format_temperature(-2.6, TemperatureUnit::Celsius, false), "-3");
    }

    #[test]
    fn rounding_ties_go_up_and_near_ties_do_not() {
        let below_half = 0.5 - f64::EPSILON / 4.0;
        assert_eq!(below_half, 0.49999999999999994);
        assert_eq!(round_half_up(below_half), 0.0);
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert!(round_half_up(-0.5).is_sign_positive());
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(4503599627370497.0), 4503599627370497.0);
        assert_eq!(format_wind_speed(below_half, WindSpeedUnit::KilometresPerHour), "0 km/h");
    }

    #[test]
    fn aqi_tiers_include_their_upper_bound() {
        assert_eq!(aqi_description(None), AqiLevel::NoData);
        assert_eq!(aqi_description(Some(f64::NAN)), AqiLevel::NoData);
        assert_eq!(aqi_description(Some(0.0)), AqiLevel::Good);
        assert_eq!(aqi_description(Some(50.0)), AqiLevel::Good);
        assert_eq!(aqi_description(Some(51.0)), AqiLevel::Moderate);
        assert_eq!(aqi_description(Some(100.0)), AqiLevel::Moderate);
        assert_eq!(aqi_description(Some(150.0)), AqiLevel::UnhealthyForSensitiveGroups);
        assert_eq!(aqi_description(Some(200.0)), AqiLevel::Unhealthy);
        assert_eq!(aqi_description(Some(300.0)), AqiLevel::VeryUnhealthy);
        assert_eq!(aqi_description(Some(300.1)), AqiLevel::Hazardous);
        assert_eq!(aqi_description(Some(999.0)), AqiLevel::Hazardous);
    }

    #[test]
    fn aqi_labels_and_tags() {
        assert_eq!(AqiLevel::NoData.label(), "No data");
        assert_eq!(AqiLevel::Good.severity_tag(), "text-green-500");
        assert_eq!(AqiLevel::Hazardous.severity_tag(), "text-red-900");
    }

    #[test]
    fn formatter_defaults_to_preferred_units() {
        let fmt = UnitFormatter::new(UserPreferences {
            wind_speed_unit: WindSpeedUnit::Knots,
            temperature_unit: TemperatureUnit::Fahrenheit,
        });

        assert_eq!(fmt.wind_speed(37.0, None), "20.0 knots");
        assert_eq!(
            fmt.wind_speed(37.0, Some(WindSpeedUnit::KilometresPerHour)),
            "37 km/h"
        );
        assert_eq!(fmt.temperature(100.0, true), "212°F");
        assert_eq!(fmt.temperature(100.0, false), "212");
    }
}
