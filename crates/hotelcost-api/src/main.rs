use anyhow::Context;
use hotelcost_api::{cors_layer, create_router, ApiConfig, AppState};
use hotelcost_estimator::EstimatorService;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotelcost_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let estimator_config =
        config.estimator_config().context("Failed to load reference data configuration")?;

    tracing::info!(
        port = config.port,
        cors_origin = %config.cors_origin,
        cost_table = %estimator_config.cost_table_path.display(),
        assemblies = %estimator_config.assemblies_path.display(),
        "Starting hotel cost API server"
    );

    // Load failures degrade to empty indices; see /api/v1/diagnostics
    let mut estimator = EstimatorService::new(estimator_config);
    estimator.initialize().await;

    let report = estimator.completeness();
    if !report.load_errors.is_empty() {
        tracing::warn!(
            errors = report.load_errors.len(),
            "Serving with incomplete reference data"
        );
    }
    for division in report.uncovered_divisions() {
        tracing::warn!(division, "Cost table division has no assembly line items");
    }

    let state = Arc::new(AppState::new(estimator));
    let app = create_router(state).layer(cors_layer(&config.cors_origin)?);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
