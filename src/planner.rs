//! Itinerary assembly
//!
//! The one piece of real decision logic in this service: deduplicate
//! attractions, branch the per-day attraction pool on a precipitation
//! threshold, and round-robin restaurants across days while never
//! repeating an attraction. Deterministic, greedy, single pass.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::warn;

use crate::PlannerError;
use crate::config::PlannerConfig;
use crate::models::{
    DailyForecast, ItineraryDay, PointOfInterest, Restaurant, TripPlan, WeatherOutcome,
};
use crate::places::PlaceProvider;
use crate::weather::ForecastProvider;

/// Precipitation (mm) above which a day counts as rainy
const RAIN_THRESHOLD_MM: f64 = 2.0;

/// Attraction categories preferred on rainy days
const RAINY_CATEGORIES: [&str; 3] = ["museum", "temple", "food"];

/// Attraction categories preferred otherwise
const FAIR_CATEGORIES: [&str; 4] = ["landmark", "neighborhood", "sightseeing", "park"];

/// Open-Meteo serves at most 16 days of daily forecast
const MAX_TRIP_DAYS: u32 = 16;

/// Incoming plan request body
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub city: String,
    pub budget: i64,
    pub days: u32,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Validate the request, resolve the city, run the three fetches and
/// assemble the response. External-call failures degrade to empty data;
/// only the unknown-city and no-attractions conditions surface as errors.
pub async fn plan_trip(
    config: &PlannerConfig,
    places: &dyn PlaceProvider,
    forecasts: &dyn ForecastProvider,
    request: &PlanRequest,
) -> Result<TripPlan, PlannerError> {
    if request.days == 0 {
        return Err(PlannerError::validation("days must be at least 1"));
    }
    if request.days > MAX_TRIP_DAYS {
        return Err(PlannerError::validation(format!(
            "days cannot exceed {MAX_TRIP_DAYS}"
        )));
    }

    let coords = config
        .city_coordinates(&request.city)
        .ok_or_else(|| PlannerError::unknown_city(request.city.clone()))?;

    let pois = match places
        .fetch_pois(coords, config.overpass.poi_radius_m, &request.preferences)
        .await
    {
        Ok(pois) => pois,
        Err(e) => {
            warn!("Attraction fetch failed, continuing with none: {e}");
            Vec::new()
        }
    };

    let pois = dedupe_pois(pois);
    if pois.is_empty() {
        return Err(PlannerError::no_attractions(request.city.clone()));
    }

    let restaurants = match places
        .fetch_restaurants(
            coords,
            config.overpass.restaurant_radius_m,
            &request.preferences,
        )
        .await
    {
        Ok(restaurants) => restaurants,
        Err(e) => {
            warn!("Restaurant fetch failed, continuing with none: {e}");
            Vec::new()
        }
    };

    let weather = match forecasts.fetch_daily(coords, request.days).await {
        Ok(days) => WeatherOutcome::Forecast(days),
        Err(e) => {
            warn!("Weather fetch failed, embedding error in response: {e}");
            WeatherOutcome::Unavailable {
                error: e.to_string(),
            }
        }
    };

    let itinerary = assemble(&pois, &restaurants, &weather, request.days);

    Ok(TripPlan {
        city: request.city.clone(),
        budget: request.budget,
        days: request.days,
        preferences: request.preferences.clone(),
        weather_forecast: weather,
        itinerary,
    })
}

/// Collapse duplicate attractions. The uniqueness key is the lowercased
/// name plus both coordinates rounded to 5 decimal places; the first
/// occurrence wins.
#[must_use]
pub fn dedupe_pois(pois: Vec<PointOfInterest>) -> Vec<PointOfInterest> {
    let mut seen = HashSet::new();
    pois.into_iter()
        .filter(|poi| seen.insert(dedup_key(poi)))
        .collect()
}

fn dedup_key(poi: &PointOfInterest) -> (String, i64, i64) {
    (
        poi.name.to_lowercase(),
        round_5dp(poi.latitude),
        round_5dp(poi.longitude),
    )
}

fn round_5dp(value: f64) -> i64 {
    (value * 100_000.0).round() as i64
}

/// Produce one itinerary entry per day, stopping early when the
/// attractions run out. Allocation is index-based over the immutable
/// POI slice: an index leaves the unused pool once assigned, so no
/// attraction repeats within a plan.
#[must_use]
pub fn assemble(
    pois: &[PointOfInterest],
    restaurants: &[Restaurant],
    weather: &WeatherOutcome,
    days: u32,
) -> Vec<ItineraryDay> {
    let mut unused: Vec<usize> = (0..pois.len()).collect();
    let mut itinerary = Vec::new();

    for day in 1..=days {
        let forecast = weather
            .day(day)
            .cloned()
            .unwrap_or_else(|| DailyForecast::empty(day));

        let wanted: &[&str] = if forecast.precipitation > RAIN_THRESHOLD_MM {
            &RAINY_CATEGORIES
        } else {
            &FAIR_CATEGORIES
        };

        // Weather-conditioned pool first, then any still-unused attraction
        let position = unused
            .iter()
            .position(|&i| wanted.contains(&pois[i].category.as_str()))
            .or_else(|| (!unused.is_empty()).then_some(0));

        let Some(position) = position else {
            break;
        };
        let index = unused.remove(position);

        let restaurant = if restaurants.is_empty() {
            no_restaurant().label()
        } else {
            restaurants[(day as usize - 1) % restaurants.len()].label()
        };

        itinerary.push(ItineraryDay {
            day,
            attraction: pois[index].label(),
            restaurant,
            weather: forecast,
        });
    }

    itinerary
}

/// Sentinel emitted when the restaurant list is empty
fn no_restaurant() -> Restaurant {
    Restaurant {
        name: "No restaurant".to_string(),
        category: String::new(),
        latitude: 0.0,
        longitude: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn poi(name: &str, category: &str) -> PointOfInterest {
        PointOfInterest {
            name: name.to_string(),
            category: category.to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }

    fn poi_at(name: &str, category: &str, latitude: f64, longitude: f64) -> PointOfInterest {
        PointOfInterest {
            name: name.to_string(),
            category: category.to_string(),
            latitude,
            longitude,
        }
    }

    fn restaurant(name: &str, cuisine: &str) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            category: cuisine.to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }

    fn forecast(day: u32, precipitation: f64) -> DailyForecast {
        DailyForecast {
            precipitation,
            ..DailyForecast::empty(day)
        }
    }

    #[test]
    fn test_dedupe_first_occurrence_wins() {
        let pois = vec![
            poi_at("Louvre", "museum", 48.86060, 2.33760),
            poi_at("louvre", "gallery", 48.86060, 2.33760),
            poi_at("Louvre", "museum", 48.90000, 2.33760),
        ];
        let deduped = dedupe_pois(pois);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].category, "museum");
        assert_eq!(deduped[1].latitude, 48.9);
    }

    #[test]
    fn test_dedupe_rounds_to_five_decimal_places() {
        let pois = vec![
            poi_at("Spot", "park", 1.000_001, 2.0),
            // Differs only past the 5th decimal place
            poi_at("Spot", "park", 1.000_001_2, 2.0),
            // Differs at the 5th decimal place
            poi_at("Spot", "park", 1.000_02, 2.0),
        ];
        let deduped = dedupe_pois(pois);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_dedupe_never_leaves_duplicate_keys() {
        let pois = vec![
            poi("A", "museum"),
            poi("a", "museum"),
            poi("B", "park"),
            poi("A", "museum"),
        ];
        let deduped = dedupe_pois(pois);
        let mut keys: Vec<_> = deduped.iter().map(dedup_key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn test_paris_scenario() {
        // Rainy day 1 picks the museum, fair days take landmarks in order
        let pois = vec![
            poi("Louvre", "museum"),
            poi("Eiffel Tower", "landmark"),
            poi("Notre-Dame", "landmark"),
        ];
        let restaurants = vec![restaurant("R1", "french")];
        let weather = WeatherOutcome::Forecast(vec![
            forecast(1, 5.0),
            forecast(2, 0.0),
            forecast(3, 0.0),
        ]);

        let itinerary = assemble(&pois, &restaurants, &weather, 3);

        assert_eq!(itinerary.len(), 3);
        assert_eq!(itinerary[0].attraction, "Louvre (museum)");
        assert_eq!(itinerary[1].attraction, "Eiffel Tower (landmark)");
        assert_eq!(itinerary[2].attraction, "Notre-Dame (landmark)");
        for day in &itinerary {
            assert_eq!(day.restaurant, "R1 (french)");
        }
    }

    #[rstest]
    #[case(2.0, "Eiffel Tower (landmark)")] // at the threshold is not rainy
    #[case(2.1, "Louvre (museum)")]
    fn test_rain_threshold_is_strict(#[case] precipitation: f64, #[case] expected: &str) {
        let pois = vec![poi("Eiffel Tower", "landmark"), poi("Louvre", "museum")];
        let weather = WeatherOutcome::Forecast(vec![forecast(1, precipitation)]);
        let itinerary = assemble(&pois, &[], &weather, 1);
        assert_eq!(itinerary[0].attraction, expected);
    }

    #[test]
    fn test_rainy_pool_falls_back_to_any_category() {
        let pois = vec![poi("Eiffel Tower", "landmark")];
        let weather = WeatherOutcome::Forecast(vec![forecast(1, 9.0)]);
        let itinerary = assemble(&pois, &[], &weather, 1);
        assert_eq!(itinerary[0].attraction, "Eiffel Tower (landmark)");
    }

    #[test]
    fn test_no_attraction_repeats_and_exhaustion_stops() {
        let pois = vec![poi("A", "park"), poi("B", "museum")];
        let weather = WeatherOutcome::Forecast(vec![
            forecast(1, 0.0),
            forecast(2, 0.0),
            forecast(3, 0.0),
            forecast(4, 0.0),
        ]);
        let itinerary = assemble(&pois, &[], &weather, 4);

        assert_eq!(itinerary.len(), 2);
        assert_eq!(itinerary[0].attraction, "A (park)");
        assert_eq!(itinerary[1].attraction, "B (museum)");
    }

    #[test]
    fn test_restaurants_cycle_round_robin() {
        let pois = vec![
            poi("A", "park"),
            poi("B", "park"),
            poi("C", "park"),
            poi("D", "park"),
            poi("E", "park"),
        ];
        let restaurants = vec![restaurant("R1", "french"), restaurant("R2", "thai")];
        let weather = WeatherOutcome::Forecast(
            (1..=5).map(|day| forecast(day, 0.0)).collect(),
        );

        let itinerary = assemble(&pois, &restaurants, &weather, 5);

        let assigned: Vec<_> = itinerary.iter().map(|d| d.restaurant.as_str()).collect();
        assert_eq!(
            assigned,
            vec![
                "R1 (french)",
                "R2 (thai)",
                "R1 (french)",
                "R2 (thai)",
                "R1 (french)",
            ]
        );
    }

    #[test]
    fn test_empty_restaurant_list_uses_sentinel() {
        let pois = vec![poi("A", "park")];
        let weather = WeatherOutcome::Forecast(vec![forecast(1, 0.0)]);
        let itinerary = assemble(&pois, &[], &weather, 1);
        assert_eq!(itinerary[0].restaurant, "No restaurant ()");
    }

    #[test]
    fn test_weather_error_means_empty_records() {
        let pois = vec![poi("Louvre", "museum"), poi("Eiffel Tower", "landmark")];
        let weather = WeatherOutcome::Unavailable {
            error: "timeout".to_string(),
        };
        let itinerary = assemble(&pois, &[], &weather, 2);

        // Precipitation defaults to 0, so the fair-weather pool applies
        assert_eq!(itinerary[0].attraction, "Eiffel Tower (landmark)");
        assert_eq!(itinerary[0].weather.precipitation, 0.0);
        assert_eq!(itinerary[1].weather.day, 2);
    }

    #[test]
    fn test_short_forecast_pads_missing_days_with_empty_records() {
        let pois = vec![poi("A", "park"), poi("B", "park")];
        let weather = WeatherOutcome::Forecast(vec![forecast(1, 0.0)]);
        let itinerary = assemble(&pois, &[], &weather, 2);
        assert_eq!(itinerary.len(), 2);
        assert_eq!(itinerary[1].weather, DailyForecast::empty(2));
    }
}
