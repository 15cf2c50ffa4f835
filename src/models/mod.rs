//! Data models for the travel planner
//!
//! Core domain models organized by concern:
//! - Location: geographic coordinates
//! - Place: points of interest and restaurants
//! - Forecast: per-day weather records
//! - Itinerary: assembled plan output

pub mod forecast;
pub mod itinerary;
pub mod location;
pub mod place;

// Re-export all public types for convenient access
pub use forecast::{DailyForecast, WeatherOutcome, weather_code_to_description};
pub use itinerary::{ItineraryDay, TripPlan};
pub use location::Coordinates;
pub use place::{PointOfInterest, Restaurant};
