//! Config command: effective configuration with sources

use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use hotelcost_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    if output.is_json() {
        return output.result(rows);
    }

    output.section("Configuration");
    output.table(rows);
    Ok(())
}
