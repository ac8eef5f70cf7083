use crate::error::{EstimatorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_COST_TABLE: &str = "HOTELCOST_COST_TABLE";
pub const ENV_ASSEMBLIES: &str = "HOTELCOST_ASSEMBLIES";
pub const ENV_LOCATIONS: &str = "HOTELCOST_LOCATIONS";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Where location cost factors are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSource {
    Postgres(String),
    Csv(PathBuf),
    None,
}

/// Layered configuration for the estimator's reference data
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub cost_table_path: ConfigValue<PathBuf>,
    pub assemblies_path: ConfigValue<PathBuf>,
    pub locations_path: ConfigValue<Option<PathBuf>>,
    pub database_url: ConfigValue<Option<String>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            cost_table_path: ConfigValue::new(
                PathBuf::from("data/cost_table.csv"),
                ConfigSource::Default,
            ),
            assemblies_path: ConfigValue::new(
                PathBuf::from("data/assemblies.csv"),
                ConfigSource::Default,
            ),
            locations_path: ConfigValue::new(
                Some(PathBuf::from("data/locations.csv")),
                ConfigSource::Default,
            ),
            database_url: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| EstimatorError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| EstimatorError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(path) = file_config.cost_table {
            self.cost_table_path.update(path, ConfigSource::File);
        }

        if let Some(path) = file_config.assemblies {
            self.assemblies_path.update(path, ConfigSource::File);
        }

        if let Some(path) = file_config.locations {
            self.locations_path.update(Some(path), ConfigSource::File);
        }

        if let Some(url) = file_config.database_url {
            self.database_url.update(Some(url), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Some(path) = non_empty_env(ENV_COST_TABLE) {
            self.cost_table_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        if let Some(path) = non_empty_env(ENV_ASSEMBLIES) {
            self.assemblies_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        if let Some(path) = non_empty_env(ENV_LOCATIONS) {
            self.locations_path.update(Some(PathBuf::from(path)), ConfigSource::Environment);
        }

        if let Some(url) = non_empty_env(ENV_DATABASE_URL) {
            self.database_url.update(Some(url), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(path) = overrides.cost_table {
            self.cost_table_path.update(path, ConfigSource::Cli);
        }

        if let Some(path) = overrides.assemblies {
            self.assemblies_path.update(path, ConfigSource::Cli);
        }

        if let Some(path) = overrides.locations {
            self.locations_path.update(Some(path), ConfigSource::Cli);
        }

        if let Some(url) = overrides.database_url {
            self.database_url.update(Some(url), ConfigSource::Cli);
        }
    }

    /// Resolve the location source; a database URL wins over a CSV path
    pub fn location_source(&self) -> LocationSource {
        if let Some(url) = &self.database_url.value {
            return LocationSource::Postgres(url.clone());
        }
        match &self.locations_path.value {
            Some(path) => LocationSource::Csv(path.clone()),
            None => LocationSource::None,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "cost_table".to_string(),
            (self.cost_table_path.value.display().to_string(), self.cost_table_path.source),
        );

        map.insert(
            "assemblies".to_string(),
            (self.assemblies_path.value.display().to_string(), self.assemblies_path.source),
        );

        map.insert(
            "locations".to_string(),
            (
                self.locations_path
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
                self.locations_path.source,
            ),
        );

        // Never echo credentials
        map.insert(
            "database_url".to_string(),
            (
                if self.database_url.value.is_some() { "(set)" } else { "(none)" }.to_string(),
                self.database_url.source,
            ),
        );

        map
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    cost_table: Option<PathBuf>,
    assemblies: Option<PathBuf>,
    locations: Option<PathBuf>,
    database_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub cost_table: Option<PathBuf>,
    pub assemblies: Option<PathBuf>,
    pub locations: Option<PathBuf>,
    pub database_url: Option<String>,
}
