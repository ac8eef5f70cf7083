use std::env;
use std::path::PathBuf;

use hotelcost_core::config::LayeredConfig;
use hotelcost_core::error::Result;
use hotelcost_estimator::EstimatorConfig;

pub const ENV_PORT: &str = "HOTELCOST_PORT";
pub const ENV_CORS_ORIGIN: &str = "HOTELCOST_CORS_ORIGIN";
pub const ENV_CONFIG_FILE: &str = "HOTELCOST_CONFIG";

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,

    /// Optional TOML file layered under the environment
    pub config_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 3001, cors_origin: "http://localhost:3000".to_string(), config_file: None }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var(ENV_PORT).ok().and_then(|p| p.parse().ok()).unwrap_or(defaults.port);

        let cors_origin = env::var(ENV_CORS_ORIGIN).unwrap_or(defaults.cors_origin);

        let config_file =
            env::var(ENV_CONFIG_FILE).ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Self { port, cors_origin, config_file }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Reference data settings: defaults, then the config file, then the
    /// `HOTELCOST_*` and `DATABASE_URL` environment variables
    pub fn layered_config(&self) -> Result<LayeredConfig> {
        let mut config = LayeredConfig::with_defaults();
        if let Some(path) = &self.config_file {
            config = config.load_from_file(path)?;
        }
        Ok(config.load_from_env())
    }

    pub fn estimator_config(&self) -> Result<EstimatorConfig> {
        Ok(EstimatorConfig::from_layered(&self.layered_config()?))
    }
}
