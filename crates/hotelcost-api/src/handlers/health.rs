use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let loaded_at = state.estimator.completeness().loaded_at;
    Json(HealthResponse::new(state.estimator.is_ready(), loaded_at))
}
