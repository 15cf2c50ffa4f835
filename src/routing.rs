//! Point-to-point travel time from an OSRM-compatible routing API.
//!
//! Utility only; travel times are not wired into the itinerary response.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::PlannerError;
use crate::models::Coordinates;

#[derive(Debug, Deserialize)]
struct RouteResponse {
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// Travel duration in seconds
    duration: f64,
}

/// Driving time in seconds between two coordinates, first route wins
#[instrument(skip(client, base_url))]
pub async fn travel_time(
    client: &Client,
    base_url: &str,
    source: Coordinates,
    destination: Coordinates,
) -> Result<u64, PlannerError> {
    let url = format!(
        "{}/route/v1/driving/{},{};{},{}?overview=false",
        base_url,
        source.longitude,
        source.latitude,
        destination.longitude,
        destination.latitude,
    );

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| PlannerError::upstream(format!("Routing request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PlannerError::upstream(format!(
            "Routing API error {status}"
        )));
    }

    let response: RouteResponse = response
        .json()
        .await
        .map_err(|e| PlannerError::upstream(format!("Failed to parse routing response: {e}")))?;

    first_route_seconds(&response)
}

fn first_route_seconds(response: &RouteResponse) -> Result<u64, PlannerError> {
    response
        .routes
        .first()
        .map(|route| route.duration.round() as u64)
        .ok_or_else(|| PlannerError::upstream("No routes in response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_route_wins() {
        let response: RouteResponse = serde_json::from_str(
            r#"{"code": "Ok", "routes": [{"duration": 1823.6}, {"duration": 2100.0}]}"#,
        )
        .unwrap();
        assert_eq!(first_route_seconds(&response).unwrap(), 1824);
    }

    #[test]
    fn test_empty_routes_is_an_error() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert!(first_route_seconds(&response).is_err());
    }
}
