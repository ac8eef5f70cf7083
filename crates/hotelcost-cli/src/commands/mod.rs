//! Command implementations

mod assemblies;
mod doctor;
mod estimate;
mod reference;
mod show_config;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;
use hotelcost_core::config::LayeredConfig;
use hotelcost_estimator::{EstimatorConfig, EstimatorService};

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = crate::config::load(&cli)?;

    match cli.command {
        Commands::Estimate(args) => estimate::execute(args, &config, &output).await,
        Commands::Brands => reference::brands(&config, &output).await,
        Commands::Locations(args) => reference::locations(args, &config, &output).await,
        Commands::Assemblies(args) => assemblies::execute(args, &config, &output).await,
        Commands::Doctor(args) => doctor::execute(args, &config, &output).await,
        Commands::Config => show_config::execute(&config, &output),
    }
}

/// Load the estimator, reporting datasets that failed to load
async fn load_estimator(config: &LayeredConfig, output: &OutputWriter) -> EstimatorService {
    let mut estimator = EstimatorService::new(EstimatorConfig::from_layered(config));
    estimator.initialize().await;

    for error in estimator.completeness().load_errors {
        output.warning(format!("Could not load {}: {}", error.dataset, error.message));
    }

    estimator
}
