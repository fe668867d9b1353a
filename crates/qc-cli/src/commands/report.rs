//! Report command implementation
//!
//! Runs the completeness analyzer for the selected record families and
//! renders the results as tables, JSON, or a per-organization CSV.

use anyhow::{Context, Result};
use qc_core::family::{FieldGroup, RecordFamily};
use qc_quality::{run_report, CompletenessReport, FieldRate, ReportOptions};

use crate::cli::{GlobalArgs, OrgGroup, ReportArgs, ReportOutput};
use crate::commands::common::{self, load_config};

/// Execute the report command
pub async fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let db = common::create_database_connection(&config, global.database.as_deref())?;
    let families = common::resolve_families(&config, args.family.as_deref())?;

    if families.is_empty() {
        println!("No record families configured.");
        return Ok(());
    }

    let options = ReportOptions {
        required_weight: config.report.required_weight,
        org_column: if args.no_orgs {
            None
        } else {
            config.report.org_column.clone()
        },
        org_group: match args.org_group {
            OrgGroup::Required => FieldGroup::Required,
            OrgGroup::Recommended => FieldGroup::Recommended,
        },
    };

    let mut reports: Vec<CompletenessReport> = Vec::with_capacity(families.len());
    for family in &families {
        if global.verbose {
            eprintln!("[verbose] Analyzing family '{}'", family.name);
        }
        let report = run_report(db.as_ref(), family, &options)
            .await
            .with_context(|| format!("Report failed for family '{}'", family.name))?;
        reports.push(report);
    }

    match args.output {
        ReportOutput::Table => {
            for (family, report) in families.iter().zip(&reports) {
                print_report(family, report);
            }
        }
        ReportOutput::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .context("Failed to serialize reports")?;
            common::write_or_print(args.write.as_deref(), &format!("{json}\n"))?;
            return Ok(());
        }
        ReportOutput::Csv => {
            let csv = reports_to_csv(&reports);
            common::write_or_print(args.write.as_deref(), &csv)?;
            return Ok(());
        }
    }

    // --write always emits the JSON report, whatever the display format
    if let Some(path) = &args.write {
        let json =
            serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
        common::write_or_print(Some(path), &format!("{json}\n"))?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

fn print_report(family: &RecordFamily, report: &CompletenessReport) {
    println!("Family: {} ({})", report.family, family.parent_display_name);
    println!(
        "  {} child records, {} valid, {} orphaned",
        report.total_child_records, report.links.valid_children, report.links.orphaned_children
    );
    println!(
        "  {} parents with children, {} without",
        report.links.parents_with_children, report.links.parents_without_children
    );
    println!();

    print_rates("Required fields", &report.required_rates);
    if !report.recommended_rates.is_empty() {
        print_rates("Recommended fields", &report.recommended_rates);
    }

    println!("  required average:    {:.2}%", report.required_avg);
    if let Some(avg) = report.recommended_avg {
        println!("  recommended average: {avg:.2}%");
    }
    match report.composite_score {
        Some(score) => println!("  composite score:     {score:.2}"),
        None => println!("  composite score:     - (no recommended fields)"),
    }
    println!();

    if !report.by_organization.is_empty() {
        println!("By organization:");
        let headers = ["ORGANIZATION", "RECORDS", "COMPLETENESS"];
        let rows: Vec<Vec<String>> = report
            .by_organization
            .iter()
            .map(|org| {
                vec![
                    org.organization.clone(),
                    org.record_count.to_string(),
                    format!("{:.2}%", org.completeness),
                ]
            })
            .collect();
        common::print_table(&headers, &rows);
        println!();
    }
}

fn print_rates(label: &str, rates: &[FieldRate]) {
    println!("{label}:");
    let headers = ["FIELD", "COMPLETE"];
    let rows: Vec<Vec<String>> = rates
        .iter()
        .map(|r| vec![r.field.clone(), format!("{:.2}%", r.rate)])
        .collect();
    common::print_table(&headers, &rows);
    println!();
}

// ---------------------------------------------------------------------------
// CSV output
// ---------------------------------------------------------------------------

/// Render the per-organization breakdown as CSV, one row per family and
/// organization. Falls back to the per-field rate table for reports that
/// have no breakdown (no organization column configured, or `--no-orgs`).
fn reports_to_csv(reports: &[CompletenessReport]) -> String {
    if reports.iter().all(|r| r.by_organization.is_empty()) {
        return rates_to_csv(reports);
    }

    let mut out = common::csv_line(&[
        "family",
        "organization",
        "record_count",
        "field",
        "missing_count",
        "missing_rate",
        "completeness",
    ]);
    for report in reports {
        for org in &report.by_organization {
            for stat in &org.field_stats {
                out.push_str(&common::csv_line(&[
                    report.family.as_str(),
                    org.organization.as_str(),
                    &org.record_count.to_string(),
                    stat.field.as_str(),
                    &stat.missing_count.to_string(),
                    &format!("{:.2}", stat.missing_rate),
                    &format!("{:.2}", org.completeness),
                ]));
            }
        }
    }
    out
}

fn rates_to_csv(reports: &[CompletenessReport]) -> String {
    let mut out = common::csv_line(&["family", "group", "field", "rate"]);
    for report in reports {
        for rate in &report.required_rates {
            out.push_str(&common::csv_line(&[
                report.family.as_str(),
                "required",
                rate.field.as_str(),
                &format!("{:.2}", rate.rate),
            ]));
        }
        for rate in &report.recommended_rates {
            out.push_str(&common::csv_line(&[
                report.family.as_str(),
                "recommended",
                rate.field.as_str(),
                &format!("{:.2}", rate.rate),
            ]));
        }
    }
    out
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
