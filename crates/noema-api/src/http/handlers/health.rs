//! GET /health - Backend health as a boolean status.

use axum::Json;
use axum::extract::State;

use noema_types::evidence::HealthResponse;

use crate::state::AppState;

/// GET /health - `ok` when the memory backend is operational, `error` otherwise.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let healthy = state.memory.health_check().await;
    Json(HealthResponse::from_healthy(healthy))
}
