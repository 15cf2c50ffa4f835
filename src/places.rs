//! Points-of-interest and restaurant lookup via the Overpass API
//!
//! Queries the OpenStreetMap Overpass index for tourism/historic
//! elements and restaurants around a coordinate. Ways and relations
//! carry their coordinates in the `center` member.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::PlannerError;
use crate::config::{HttpConfig, OverpassConfig};
use crate::models::{Coordinates, PointOfInterest, Restaurant};

/// At most this many attractions are returned per fetch, in index order
pub const MAX_POIS: usize = 15;
/// At most this many restaurants are returned per fetch, in index order
pub const MAX_RESTAURANTS: usize = 10;

/// Source of attractions and restaurants around a coordinate
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Named tourism/historic points of interest within `radius_m`,
    /// optionally narrowed by preference terms
    async fn fetch_pois(
        &self,
        center: Coordinates,
        radius_m: u32,
        preferences: &[String],
    ) -> Result<Vec<PointOfInterest>, PlannerError>;

    /// Restaurants within `radius_m`, cuisine as the category tag
    async fn fetch_restaurants(
        &self,
        center: Coordinates,
        radius_m: u32,
        preferences: &[String],
    ) -> Result<Vec<Restaurant>, PlannerError>;
}

/// Overpass API client
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

/// Overpass interpreter response
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// A single Overpass element (node, way or relation)
#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    /// Centroid supplied for non-point geometries via `out center`
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        }
    }

    /// Non-empty name, or `None` when the element should be skipped
    fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str).filter(|n| !n.is_empty())
    }
}

impl OverpassClient {
    /// Create a new client
    pub fn new(http: &HttpConfig, config: &OverpassConfig) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_seconds.into()))
            .user_agent(http.user_agent.clone())
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn run_query(&self, query: &str) -> Result<OverpassResponse, PlannerError> {
        debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.base_url)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| PlannerError::upstream(format!("Overpass request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::upstream(format!(
                "Overpass API error {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PlannerError::upstream(format!("Failed to parse Overpass response: {e}")))
    }
}

#[async_trait]
impl PlaceProvider for OverpassClient {
    #[tracing::instrument(skip(self), fields(center = %center.format_coordinates()))]
    async fn fetch_pois(
        &self,
        center: Coordinates,
        radius_m: u32,
        preferences: &[String],
    ) -> Result<Vec<PointOfInterest>, PlannerError> {
        let query = poi_query(center, radius_m);
        let response = self.run_query(&query).await?;

        let candidates: Vec<PointOfInterest> = response
            .elements
            .iter()
            .filter_map(element_to_poi)
            .collect();

        let pois = select_candidates(candidates, preferences, MAX_POIS, |poi: &PointOfInterest| {
            (poi.name.as_str(), poi.category.as_str())
        });

        info!(
            "Found {} attractions within {}m of {}",
            pois.len(),
            radius_m,
            center.format_coordinates()
        );
        Ok(pois)
    }

    #[tracing::instrument(skip(self), fields(center = %center.format_coordinates()))]
    async fn fetch_restaurants(
        &self,
        center: Coordinates,
        radius_m: u32,
        preferences: &[String],
    ) -> Result<Vec<Restaurant>, PlannerError> {
        let query = restaurant_query(center, radius_m);
        let response = self.run_query(&query).await?;

        let candidates: Vec<Restaurant> = response
            .elements
            .iter()
            .filter_map(element_to_restaurant)
            .collect();

        let restaurants = select_candidates(
            candidates,
            preferences,
            MAX_RESTAURANTS,
            |restaurant: &Restaurant| (restaurant.name.as_str(), restaurant.category.as_str()),
        );

        info!(
            "Found {} restaurants within {}m of {}",
            restaurants.len(),
            radius_m,
            center.format_coordinates()
        );
        Ok(restaurants)
    }
}

fn poi_query(center: Coordinates, radius_m: u32) -> String {
    format!(
        "[out:json][timeout:25];\
         (\
           node[\"tourism\"](around:{radius},{lat},{lon});\
           way[\"tourism\"](around:{radius},{lat},{lon});\
           node[\"historic\"](around:{radius},{lat},{lon});\
           way[\"historic\"](around:{radius},{lat},{lon});\
         );\
         out center 60;",
        radius = radius_m,
        lat = center.latitude,
        lon = center.longitude,
    )
}

fn restaurant_query(center: Coordinates, radius_m: u32) -> String {
    format!(
        "[out:json][timeout:25];\
         node[\"amenity\"=\"restaurant\"](around:{radius},{lat},{lon});\
         out 40;",
        radius = radius_m,
        lat = center.latitude,
        lon = center.longitude,
    )
}

/// Convert an Overpass element to a point of interest.
/// Elements without a name or coordinates are skipped; the category
/// falls back from the tourism tag to the historic tag to "unknown".
fn element_to_poi(element: &OverpassElement) -> Option<PointOfInterest> {
    let name = element.name()?;
    let (latitude, longitude) = element.coordinates()?;

    let category = element
        .tags
        .get("tourism")
        .or_else(|| element.tags.get("historic"))
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    Some(PointOfInterest {
        name: name.to_string(),
        category,
        latitude,
        longitude,
    })
}

/// Convert an Overpass element to a restaurant, cuisine as category
fn element_to_restaurant(element: &OverpassElement) -> Option<Restaurant> {
    let name = element.name()?;
    let (latitude, longitude) = element.coordinates()?;

    let category = element
        .tags
        .get("cuisine")
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    Some(Restaurant {
        name: name.to_string(),
        category,
        latitude,
        longitude,
    })
}

/// Apply the advisory preference filter, then cap the result. The
/// filter runs first so preference matches beyond the cap still make
/// the cut; the cap keeps index order.
fn select_candidates<T, F>(
    candidates: Vec<T>,
    preferences: &[String],
    limit: usize,
    text: F,
) -> Vec<T>
where
    F: Fn(&T) -> (&str, &str),
{
    let mut selected = apply_preference_filter(candidates, preferences, text);
    selected.truncate(limit);
    selected
}

/// Advisory preference filter: keep candidates whose name or category
/// contains any preference term (case-insensitive substring). A filter
/// that would eliminate every candidate is ignored and the full list is
/// returned unchanged.
pub(crate) fn apply_preference_filter<T, F>(
    candidates: Vec<T>,
    preferences: &[String],
    text: F,
) -> Vec<T>
where
    F: Fn(&T) -> (&str, &str),
{
    let terms: Vec<String> = preferences
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    if terms.is_empty() {
        return candidates;
    }

    let matches: Vec<bool> = candidates
        .iter()
        .map(|candidate| {
            let (name, category) = text(candidate);
            let name = name.to_lowercase();
            let category = category.to_lowercase();
            terms
                .iter()
                .any(|term| name.contains(term) || category.contains(term))
        })
        .collect();

    if !matches.iter().any(|&m| m) {
        debug!("Preference filter matched nothing, keeping unfiltered list");
        return candidates;
    }

    candidates
        .into_iter()
        .zip(matches)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect()
}
