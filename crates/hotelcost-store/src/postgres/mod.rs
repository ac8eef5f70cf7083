//! PostgreSQL location store adapter

pub mod config;

pub use config::{ConfigError, PoolConfig, PostgresConfig};

use async_trait::async_trait;
use hotelcost_core::error::{EstimatorError, Result};
use hotelcost_core::models::LocationRecord;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::ports::LocationStore;

/// Location store reading a `locations` table with columns
/// `id, name, state, cost_factor, latitude, longitude`
pub struct PostgresLocationStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresLocationStore {
    /// Connect to the database and verify the connection
    pub async fn connect(config: PostgresConfig) -> Result<Self> {
        config.validate().map_err(|e| EstimatorError::ConfigInvalid {
            key: "database_url".to_string(),
            reason: e.to_string(),
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .connect(&config.database_url)
            .await
            .map_err(|e| EstimatorError::LocationStoreUnavailable {
                reason: format!("Failed to connect to database: {}", e),
            })?;

        sqlx::query("SELECT 1").fetch_one(&pool).await.map_err(|e| {
            EstimatorError::LocationStoreUnavailable {
                reason: format!("Connection test failed: {}", e),
            }
        })?;

        Ok(Self { pool, config })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn select_sql(&self) -> String {
        format!(
            r#"
            SELECT id::text AS id,
                   name,
                   COALESCE(state, '') AS region,
                   cost_factor::float8 AS cost_factor,
                   latitude::float8 AS latitude,
                   longitude::float8 AS longitude
            FROM {}
            ORDER BY name, state
            "#,
            self.config.table
        )
    }
}

#[async_trait]
impl LocationStore for PostgresLocationStore {
    async fn list_locations(&self) -> Result<Vec<LocationRecord>> {
        let sql = self.select_sql();
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| EstimatorError::LocationQuery(format!("Failed to list locations: {}", e)))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let cost_factor: Option<f64> = row.try_get("cost_factor").ok().flatten();
            let Some(cost_factor) = cost_factor else {
                tracing::debug!("Skipping location row without a cost factor");
                continue;
            };

            records.push(LocationRecord {
                id: row.try_get("id").unwrap_or_default(),
                name: row.try_get("name").unwrap_or_default(),
                region: row.try_get("region").unwrap_or_default(),
                cost_factor,
                latitude: row.try_get("latitude").ok().flatten(),
                longitude: row.try_get("longitude").ok().flatten(),
            });
        }

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("postgres:{}", self.config.table)
    }
}
