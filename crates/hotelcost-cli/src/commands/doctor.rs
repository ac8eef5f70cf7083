//! Doctor command: reference data health checks

use crate::cli::DoctorArgs;
use crate::output::OutputWriter;
use anyhow::Result;
use console::style;
use hotelcost_core::config::LayeredConfig;
use hotelcost_estimator::{DataCompleteness, Dataset};

pub async fn execute(
    args: DoctorArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let estimator = super::load_estimator(config, output).await;
    let report = estimator.completeness();

    if output.is_json() {
        return output.result(&report);
    }

    println!("\n{}", style("Hotel Cost Reference Data Check").bold().underlined());
    println!("{}", style("═".repeat(60)).dim());
    println!();

    let checks = [cost_table_check(&report), assemblies_check(&report), locations_check(&report)];
    let mut checks_passed = checks.iter().filter(|c| c.passed).count();
    let mut total_checks = checks.len();
    for check in &checks {
        check.print();
    }

    total_checks += 1;
    let uncovered = report.uncovered_divisions();
    if uncovered.is_empty() && report.assemblies.loaded && report.cost_table.rows > 0 {
        println!(
            "{} Coverage: all {} cost table divisions have line items",
            style("✓").green(),
            report.cost_table.division_coverage.len()
        );
        checks_passed += 1;
    } else if uncovered.is_empty() {
        println!("{} Coverage: nothing to compare", style("⚠").yellow());
    } else {
        println!(
            "{} Coverage: {} division(s) without line items",
            style("⚠").yellow(),
            uncovered.len()
        );
        for division in &uncovered {
            println!("  → {}", division);
        }
    }

    if args.verbose {
        verbose_details(&report);
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    let summary = format!("{}/{} checks passed", checks_passed, total_checks);
    if checks_passed == total_checks {
        output.success(summary);
    } else {
        println!("{} {}", style("⚠").yellow().bold(), summary);
        println!("  → Run with --verbose for sources and skipped row counts");
    }

    Ok(())
}

struct Check {
    passed: bool,
    line: String,
    hint: Option<String>,
}

impl Check {
    fn print(&self) {
        let mark = if self.passed { style("✓").green() } else { style("✗").red() };
        println!("{} {}", mark, self.line);
        if let Some(hint) = &self.hint {
            println!("  → {}", hint);
        }
    }
}

fn load_error(report: &DataCompleteness, dataset: Dataset) -> Option<&str> {
    report.load_errors.iter().find(|e| e.dataset == dataset).map(|e| e.message.as_str())
}

fn cost_table_check(report: &DataCompleteness) -> Check {
    if let Some(message) = load_error(report, Dataset::CostTable) {
        return Check {
            passed: false,
            line: format!("Cost table: {}", message),
            hint: Some("Set --cost-table or HOTELCOST_COST_TABLE".to_string()),
        };
    }
    Check {
        passed: report.cost_table.rows > 0,
        line: format!(
            "Cost table: {} rows across {} brands",
            report.cost_table.rows,
            report.cost_table.brands.len()
        ),
        hint: None,
    }
}

fn assemblies_check(report: &DataCompleteness) -> Check {
    if let Some(message) = load_error(report, Dataset::Assemblies) {
        return Check {
            passed: false,
            line: format!("Assemblies: {}", message),
            hint: Some("Set --assemblies or HOTELCOST_ASSEMBLIES".to_string()),
        };
    }
    Check {
        passed: report.assemblies.items > 0,
        line: format!(
            "Assemblies: {} line items in {} divisions",
            report.assemblies.items,
            report.assemblies.divisions.len()
        ),
        hint: None,
    }
}

fn locations_check(report: &DataCompleteness) -> Check {
    if let Some(message) = load_error(report, Dataset::Locations) {
        return Check {
            passed: false,
            line: format!("Locations: {}", message),
            hint: Some("Set --locations, --database-url or DATABASE_URL".to_string()),
        };
    }
    let hint = (report.locations.count == 0)
        .then(|| "Every estimate will use the national average".to_string());
    Check {
        passed: report.locations.count > 0,
        line: format!(
            "Locations: {} loaded, {} with coordinates",
            report.locations.count, report.locations.with_coordinates
        ),
        hint,
    }
}

fn verbose_details(report: &DataCompleteness) {
    println!();
    let source = |s: &Option<String>| s.clone().unwrap_or_else(|| "(none)".to_string());
    println!("  Cost table source: {}", source(&report.cost_table.source));
    println!("  Cost table rows skipped: {}", report.cost_table.skipped_rows);
    println!("  Assemblies source: {}", source(&report.assemblies.source));
    println!("  Assembly rows skipped: {}", report.assemblies.skipped_rows);
    println!("  Locations source: {}", source(&report.locations.source));
    println!("  Location records skipped: {}", report.locations.skipped_records);

    for (brand, rows) in &report.cost_table.brands {
        println!("  Brand {}: {} reference projects", brand, rows);
    }
    for (division, lookup) in &report.cost_table.division_coverage {
        println!("  Division {}: {:?}", division, lookup);
    }
}
