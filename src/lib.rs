//! Smart travel planner - naive day-by-day itinerary assembly
//!
//! This library accepts a destination city, trip length and budget,
//! queries Overpass (attractions, restaurants) and Open-Meteo (daily
//! forecast), and assembles one itinerary entry per day.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod places;
pub mod planner;
pub mod routing;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use models::{
    Coordinates, DailyForecast, ItineraryDay, PointOfInterest, Restaurant, TripPlan,
    WeatherOutcome,
};
pub use places::{OverpassClient, PlaceProvider};
pub use planner::PlanRequest;
pub use weather::{ForecastProvider, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
