//! Assemblies command implementation

use crate::cli::AssembliesArgs;
use crate::output::{money, OutputWriter};
use crate::output_types::LineItemRow;
use anyhow::Result;
use hotelcost_core::config::LayeredConfig;
use hotelcost_core::models::{AssemblyLookup, ProjectStats};

pub async fn execute(
    args: AssembliesArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let estimator = super::load_estimator(config, output).await;

    let stats = ProjectStats { gsf: args.gsf, floors: args.floors, total_units: args.units };
    let found = estimator.assemblies_for(&args.division, args.total, &stats);

    if output.is_json() {
        return output.result(&found);
    }

    match &found.lookup {
        AssemblyLookup::Direct => {}
        AssemblyLookup::Alias { key } => {
            output.info(format!("'{}' matched division '{}' by alias", args.division, key));
        }
        AssemblyLookup::Unmapped => {
            output.warning(format!("No assembly division matches '{}'", args.division));
            let known: Vec<String> =
                estimator.assembly_index().divisions().into_keys().collect();
            output.info(format!("Indexed divisions: {}", known.join(", ")));
            return Ok(());
        }
        AssemblyLookup::NotLoaded => {
            output.warning("Assembly definitions are not loaded");
            return Ok(());
        }
    }

    output.section(format!("{} ({})", args.division, money(args.total)));
    output.table(found.items.iter().map(LineItemRow::from).collect());
    Ok(())
}
