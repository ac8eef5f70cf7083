use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use hotelcost_core::models::ProjectStats;

use crate::dto::{
    AssemblyParams, AssemblyResponse, BrandInfo, BrandsResponse, LocationInfo, LocationsResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_brands(State(state): State<Arc<AppState>>) -> Json<BrandsResponse> {
    let brands = state
        .estimator
        .brands()
        .into_iter()
        .map(|(brand, reference_projects)| BrandInfo { brand, reference_projects })
        .collect();

    Json(BrandsResponse { brands })
}

pub async fn list_locations(State(state): State<Arc<AppState>>) -> Json<LocationsResponse> {
    let locations: Vec<LocationInfo> =
        state.estimator.locations().iter().map(LocationInfo::from).collect();

    Json(LocationsResponse { count: locations.len(), locations })
}

pub async fn get_assemblies(
    State(state): State<Arc<AppState>>,
    Path(division): Path<String>,
    params: Result<Query<AssemblyParams>, QueryRejection>,
) -> Result<Json<AssemblyResponse>, ApiError> {
    let Query(params) = params?;

    if !params.total.is_finite() || params.total < 0.0 {
        return Err(ApiError::bad_request("Invalid value for total")
            .with_details("total must be a non-negative number"));
    }

    let stats = ProjectStats { gsf: params.gsf, floors: params.floors, total_units: params.units };
    let found = state.estimator.assemblies_for(&division, params.total, &stats);

    tracing::debug!(
        division = %division,
        items = found.items.len(),
        lookup = ?found.lookup,
        "Resolved division line items"
    );

    Ok(Json(AssemblyResponse {
        division,
        total: params.total,
        stats,
        lookup: found.lookup,
        items: found.items,
    }))
}
