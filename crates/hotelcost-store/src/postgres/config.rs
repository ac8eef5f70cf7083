//! PostgreSQL configuration for the location reference table

use std::time::Duration;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Connection settings for the location reference database
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Connection pool configuration
    pub pool: PoolConfig,
    /// Table holding location records (optionally schema-qualified)
    pub table: String,
}

impl PostgresConfig {
    /// Create a configuration for the given URL with default pool settings
    pub fn from_database_url(database_url: &str) -> Result<Self, ConfigError> {
        let config = Self {
            database_url: database_url.to_string(),
            pool: PoolConfig::default(),
            table: "locations".to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "database_url".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        // The table name is interpolated into SQL
        let valid_table = !self.table.is_empty()
            && self.table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid_table {
            return Err(ConfigError::Invalid {
                key: "table".to_string(),
                reason: format!("'{}' is not a plain table identifier", self.table),
            });
        }

        self.pool.validate()
    }
}

/// Connection pool configuration
///
/// Locations are read once at startup, so the pool stays small.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_connections: 2, acquire_timeout: Duration::from_secs(10) }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "pool.max_connections".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
