use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hotel Cost - Parametric construction cost estimates for hotel projects
#[derive(Parser, Debug)]
#[command(name = "hotelcost")]
#[command(about = "Parametric construction cost estimates for hotel projects", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML config file (defaults to ./hotelcost.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reference cost table CSV
    #[arg(long, global = true, value_name = "PATH")]
    pub cost_table: Option<PathBuf>,

    /// Assembly definitions CSV
    #[arg(long, global = true, value_name = "PATH")]
    pub assemblies: Option<PathBuf>,

    /// Location cost factor CSV
    #[arg(long, global = true, value_name = "PATH")]
    pub locations: Option<PathBuf>,

    /// PostgreSQL URL for location cost factors (takes priority over --locations)
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the construction cost of a hotel project
    Estimate(EstimateArgs),

    /// List brands with reference cost data
    Brands,

    /// List location cost factors
    Locations(LocationsArgs),

    /// Show line items for a construction division
    Assemblies(AssembliesArgs),

    /// Check that reference data loads and lines up
    Doctor(DoctorArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct EstimateArgs {
    /// Brand name (e.g. "Home2 Suites")
    #[arg(long)]
    pub brand: String,

    /// Number of guest rooms
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rooms: u32,

    /// Number of floors
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub floors: u32,

    /// City name for the location factor
    #[arg(long, requires = "region")]
    pub location: Option<String>,

    /// State or region for the location factor
    #[arg(long, requires = "location")]
    pub region: Option<String>,

    /// Site latitude
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Site longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Include line items under each division
    #[arg(long)]
    pub detail: bool,
}

#[derive(Parser, Debug)]
pub struct LocationsArgs {
    /// Only show locations in this state or region
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Parser, Debug)]
pub struct AssembliesArgs {
    /// Division label (e.g. "03 Concrete")
    pub division: String,

    /// Division dollar total to distribute across line items
    #[arg(long, default_value = "0")]
    pub total: f64,

    /// Gross square footage for quantity math
    #[arg(long, default_value = "0")]
    pub gsf: f64,

    /// Floor count for quantity math
    #[arg(long, default_value = "1")]
    pub floors: u32,

    /// Unit (room) count for quantity math
    #[arg(long, default_value = "1")]
    pub units: u32,
}

#[derive(Parser, Debug)]
pub struct DoctorArgs {
    /// Show detailed diagnostic information
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
