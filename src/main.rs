use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use travel_planner::api::AppState;
use travel_planner::config::PlannerConfig;
use travel_planner::places::OverpassClient;
use travel_planner::weather::OpenMeteoClient;
use travel_planner::web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PlannerConfig::load()?;

    let places = Arc::new(OverpassClient::new(&config.http, &config.overpass)?);
    let forecasts = Arc::new(OpenMeteoClient::new(&config.http, &config.weather)?);

    let state = AppState {
        config: Arc::new(config),
        places,
        forecasts,
    };

    web::run(state).await
}
