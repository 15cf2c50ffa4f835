//! Assembled itinerary and plan response models

use serde::{Deserialize, Serialize};

use super::forecast::{DailyForecast, WeatherOutcome};

/// One assembled day of the trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryDay {
    /// Day number (1-based)
    pub day: u32,
    /// Attraction label, formatted `"name (category)"`
    pub attraction: String,
    /// Restaurant label, formatted `"name (category)"`
    pub restaurant: String,
    /// Forecast used when picking this day's attraction
    pub weather: DailyForecast,
}

/// Full plan response returned by `POST /plan`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub city: String,
    pub budget: i64,
    pub days: u32,
    pub preferences: Vec<String>,
    pub weather_forecast: WeatherOutcome,
    /// May hold fewer entries than `days` when attractions run out
    pub itinerary: Vec<ItineraryDay>,
}
