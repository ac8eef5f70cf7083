//! Estimate command implementation

use crate::cli::EstimateArgs;
use crate::output::{money, OutputWriter};
use crate::output_types::{DivisionRow, LineItemRow};
use anyhow::Result;
use hotelcost_core::config::LayeredConfig;
use hotelcost_core::models::{EstimateRequest, LocationQuery};

pub async fn execute(
    args: EstimateArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let estimator = super::load_estimator(config, output).await;

    let location =
        LocationQuery { name: args.location, region: args.region, lat: args.lat, lng: args.lng };
    let request = EstimateRequest::new(args.brand, args.rooms, args.floors).with_location(location);
    let breakdown = estimator.estimate(&request);

    if output.is_json() {
        return output.result(&breakdown);
    }

    if !breakdown.has_data() {
        output.warning(format!("No reference cost data for brand '{}'", breakdown.brand));
        let known: Vec<String> = estimator.brands().into_keys().collect();
        if !known.is_empty() {
            output.info(format!("Known brands: {}", known.join(", ")));
        }
        return Ok(());
    }

    output.section("Estimate");
    output.kv("Brand", &breakdown.brand);
    output.kv(
        "Program",
        format!("{} rooms, {} floors", breakdown.requested_rooms, breakdown.requested_floors),
    );
    let location = &breakdown.location;
    let mut location_line = format!("{} (factor {:.2})", location.label, location.cost_factor);
    if let Some(distance) = location.distance_miles {
        location_line.push_str(&format!(", {:.0} mi away", distance));
    }
    output.kv("Location", location_line);
    if let Some(reference) = &breakdown.reference {
        output.kv(
            "Reference project",
            format!(
                "{} rooms, {} floors, {:.0} GSF",
                reference.rooms, reference.floors, reference.gsf
            ),
        );
    }

    output.section("Totals");
    output.kv("Total", money(breakdown.total_local));
    output.kv("Per SF", format!("${:.2}", breakdown.cost_per_sf));
    output.kv("Per room", money(breakdown.cost_per_room));
    output.kv(
        "Footprint",
        format!(
            "{:.0} ft x {:.0} ft ({:.0} SF per floor)",
            breakdown.footprint.width_ft, breakdown.footprint.length_ft, breakdown.footprint.area_sf
        ),
    );

    if !breakdown.room_mix.is_empty() {
        output.section("Room mix");
        for room_type in &breakdown.room_mix {
            output.kv(&room_type.room_type, room_type.count);
        }
    }

    output.section("Divisions");
    output.table(breakdown.divisions.iter().map(DivisionRow::from).collect());

    if args.detail {
        for division in breakdown.divisions.iter().filter(|d| !d.assemblies.is_empty()) {
            output.section(&division.division);
            output.table(division.assemblies.iter().map(LineItemRow::from).collect());
        }
    }

    Ok(())
}
