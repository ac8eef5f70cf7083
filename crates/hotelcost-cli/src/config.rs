//! Configuration assembly for CLI commands

use anyhow::{Context, Result};
use hotelcost_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "hotelcost.toml";

/// Build the layered configuration: defaults, config file, environment,
/// then command-line flags
pub fn load(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_file(cli.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        cost_table: cli.cost_table.clone(),
        assemblies: cli.assemblies.clone(),
        locations: cli.locations.clone(),
        database_url: cli.database_url.clone(),
    });

    Ok(config)
}

/// An explicit path is always used; the default only when it exists
fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}
