//! In-memory location store for development and testing.
//!
//! Uses `RwLock` with poison recovery: a panic in another writer leaves the
//! record list intact, so readers keep going with what is there.

use async_trait::async_trait;
use hotelcost_core::error::Result;
use hotelcost_core::models::LocationRecord;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::ports::LocationStore;

/// In-memory implementation of LocationStore
#[derive(Debug, Clone, Default)]
pub struct MemoryLocationStore {
    records: Arc<RwLock<Vec<LocationRecord>>>,
}

impl MemoryLocationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: Vec<LocationRecord>) -> Self {
        Self { records: Arc::new(RwLock::new(records)) }
    }

    /// Add a location, generating an identifier. Returns the new id.
    pub fn insert(
        &self,
        name: &str,
        region: &str,
        cost_factor: f64,
        coordinate: Option<(f64, f64)>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        let record = LocationRecord {
            id: id.clone(),
            name: name.to_string(),
            region: region.to_string(),
            cost_factor,
            latitude: coordinate.map(|(lat, _)| lat),
            longitude: coordinate.map(|(_, lng)| lng),
        };
        self.records.write().unwrap_or_else(|e| e.into_inner()).push(record);
        id
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn list_locations(&self) -> Result<Vec<LocationRecord>> {
        Ok(self.records.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MemoryLocationStore::new();
        assert!(store.is_empty());

        let id = store.insert("Denver", "CO", 1.04, Some((39.7392, -104.9903)));
        store.insert("Remote Site", "AK", 1.35, None);

        let records = store.list_locations().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].latitude, Some(39.7392));
        assert_eq!(records[1].longitude, None);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryLocationStore::new();
        let clone = store.clone();
        store.insert("Boise", "ID", 0.93, None);
        assert_eq!(clone.list_locations().await.unwrap().len(), 1);
    }
}
