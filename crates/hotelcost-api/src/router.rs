use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/v1/estimate", post(handlers::handle_estimate))
        // Reference data
        .route("/api/v1/brands", get(handlers::list_brands))
        .route("/api/v1/locations", get(handlers::list_locations))
        .route("/api/v1/assemblies/{division}", get(handlers::get_assemblies))
        .route("/api/v1/diagnostics", get(handlers::get_diagnostics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the estimating UI origin
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
