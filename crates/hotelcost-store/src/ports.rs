use async_trait::async_trait;
use hotelcost_core::error::Result;
use hotelcost_core::models::LocationRecord;

/// Port for the location cost-factor reference store
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Fetch every location record
    async fn list_locations(&self) -> Result<Vec<LocationRecord>>;

    /// Human-readable description of the backing source, for diagnostics
    fn describe(&self) -> String;
}
