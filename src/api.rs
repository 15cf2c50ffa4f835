//! HTTP surface: the welcome route and the plan endpoint

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::PlannerError;
use crate::config::PlannerConfig;
use crate::places::PlaceProvider;
use crate::planner::{self, PlanRequest};
use crate::weather::ForecastProvider;

/// Shared per-process state, injected into every handler.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PlannerConfig>,
    pub places: Arc<dyn PlaceProvider>,
    pub forecasts: Arc<dyn ForecastProvider>,
}

#[derive(Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/plan", post(plan))
        .with_state(state)
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Smart Travel Planner!".to_string(),
    })
}

async fn plan(State(state): State<AppState>, Json(request): Json<PlanRequest>) -> Response {
    match planner::plan_trip(
        &state.config,
        state.places.as_ref(),
        state.forecasts.as_ref(),
        &request,
    )
    .await
    {
        Ok(plan) => Json(plan).into_response(),
        Err(error) => error_response(&error),
    }
}

/// Domain errors keep the `{error}` body shape of the original surface;
/// only malformed input and internal faults change the status code.
fn error_response(error: &PlannerError) -> Response {
    let status = match error {
        PlannerError::UnknownCity { .. } | PlannerError::NoAttractions { .. } => StatusCode::OK,
        PlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}
