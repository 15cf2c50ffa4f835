//! Daily weather forecast model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of forecast data, 1-based day numbering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    /// Day number within the trip (1-based)
    pub day: u32,
    /// Calendar date when the provider supplied one
    pub date: Option<NaiveDate>,
    /// Daily maximum temperature in Celsius
    pub temp_max: f64,
    /// Daily minimum temperature in Celsius
    pub temp_min: f64,
    /// Precipitation sum in mm
    pub precipitation: f64,
    /// WMO weather code
    pub weather_code: i64,
    /// Human-readable description of the weather code
    pub description: String,
}

impl DailyForecast {
    /// Empty record used when no forecast is available for a day.
    /// Precipitation defaults to 0 so attraction selection takes the
    /// fair-weather branch.
    #[must_use]
    pub fn empty(day: u32) -> Self {
        Self {
            day,
            date: None,
            temp_max: 0.0,
            temp_min: 0.0,
            precipitation: 0.0,
            weather_code: 0,
            description: weather_code_to_description(0).to_string(),
        }
    }
}

/// Weather outcome embedded in the plan response: either the per-day
/// forecast list or the error shape the fetch failure degraded to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherOutcome {
    Forecast(Vec<DailyForecast>),
    Unavailable { error: String },
}

impl WeatherOutcome {
    /// Forecast record for a 1-based day, if one exists
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&DailyForecast> {
        let index = (day as usize).checked_sub(1)?;
        match self {
            WeatherOutcome::Forecast(days) => days.get(index),
            WeatherOutcome::Unavailable { .. } => None,
        }
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: i64) -> &'static str {
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
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
