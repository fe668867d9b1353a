//! Families command implementation
//!
//! Shows the record families the other commands operate on, whether they
//! come from emrqc.yml or the built-in EMR defaults.

use anyhow::{Context, Result};

use crate::cli::{FamiliesArgs, FamiliesOutput, GlobalArgs};
use crate::commands::common::{self, load_config};

/// Execute the families command
pub async fn execute(args: &FamiliesArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let families = config.effective_families();

    match args.output {
        FamiliesOutput::Table => {
            let headers = ["NAME", "CHILD TABLE", "PARENT TABLE", "JOIN", "REQ", "REC"];
            let rows: Vec<Vec<String>> = families
                .iter()
                .map(|f| {
                    vec![
                        f.name.clone(),
                        f.child_table.clone(),
                        f.parent_table.clone(),
                        format!("{} -> {}", f.join_column, f.parent_key),
                        f.required_fields.len().to_string(),
                        f.recommended_fields.len().to_string(),
                    ]
                })
                .collect();
            common::print_table(&headers, &rows);
        }
        FamiliesOutput::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&families)
                    .context("Failed to serialize families")?
            );
        }
    }

    Ok(())
}
