use hotelcost_estimator::EstimatorService;
use std::sync::Arc;

/// Shared handler state. The estimator is fully initialized before the
/// router is built and is only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<EstimatorService>,
}

impl AppState {
    pub fn new(estimator: EstimatorService) -> Self {
        Self { estimator: Arc::new(estimator) }
    }
}
