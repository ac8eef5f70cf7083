use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use hotelcost_core::models::CostBreakdown;

use crate::dto::EstimateBody;
use crate::error::ApiError;
use crate::services::EstimateService;
use crate::state::AppState;

pub async fn handle_estimate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EstimateBody>, JsonRejection>,
) -> Result<Json<CostBreakdown>, ApiError> {
    let Json(body) = body?;

    tracing::info!(
        brand = body.brand.as_deref().unwrap_or_default(),
        rooms = body.rooms,
        floors = body.floors,
        location = body.location_name.as_deref().unwrap_or_default(),
        "Processing estimate request"
    );

    let breakdown = EstimateService::execute(&state, body)?;

    Ok(Json(breakdown))
}
