use std::sync::Arc;

use axum::{extract::State, Json};
use hotelcost_estimator::DataCompleteness;

use crate::state::AppState;

pub async fn get_diagnostics(State(state): State<Arc<AppState>>) -> Json<DataCompleteness> {
    Json(state.estimator.completeness())
}
