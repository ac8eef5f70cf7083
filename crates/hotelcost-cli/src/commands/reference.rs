//! Reference data listings

use crate::cli::LocationsArgs;
use crate::output::OutputWriter;
use crate::output_types::{BrandRow, LocationRow};
use anyhow::Result;
use hotelcost_core::config::LayeredConfig;

pub async fn brands(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let estimator = super::load_estimator(config, output).await;

    let rows: Vec<BrandRow> = estimator
        .brands()
        .into_iter()
        .map(|(brand, reference_projects)| BrandRow { brand, reference_projects })
        .collect();

    if output.is_json() {
        return output.result(rows);
    }

    output.section("Brands");
    output.table(rows);
    Ok(())
}

pub async fn locations(
    args: LocationsArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let estimator = super::load_estimator(config, output).await;

    let region = args.region.as_deref().map(str::trim);
    let locations: Vec<_> = estimator
        .locations()
        .iter()
        .filter(|loc| region.map_or(true, |r| loc.region.eq_ignore_ascii_case(r)))
        .collect();

    if output.is_json() {
        return output.result(&locations);
    }

    output.section(format!("Locations ({})", locations.len()));
    output.table(locations.into_iter().map(LocationRow::from).collect());
    Ok(())
}
