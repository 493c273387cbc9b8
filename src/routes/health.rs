use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::health::HealthResponse, services::health, state::SharedState};

/// Liveness and storage reachability probe.
#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses(
        (status = 200, description = "Current health, degraded mode included", body = HealthResponse)
    )
)]
pub async fn healthcheck(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(health::health_status(&state).await)
}

/// Health probe subtree.
pub fn router() -> Router<SharedState> {
    Router::new().route("/healthcheck", get(healthcheck))
}
