//! Orphans command implementation
//!
//! Lists child rows whose join key matches no parent record.

use anyhow::{Context, Result};
use qc_quality::orphaned_rows;

use crate::cli::{GlobalArgs, OrphansArgs, RowsOutput};
use crate::commands::common::{self, load_config};

/// Execute the orphans command
pub async fn execute(args: &OrphansArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let db = common::create_database_connection(&config, global.database.as_deref())?;
    let family = common::resolve_family(&config, &args.family)?;

    let rows = orphaned_rows(db.as_ref(), &family, args.limit)
        .await
        .with_context(|| format!("Orphan listing failed for family '{}'", family.name))?;

    match args.output {
        RowsOutput::Table => {
            if rows.is_empty() {
                println!("No orphaned {} rows found.", family.name);
                return Ok(());
            }
            common::print_rows_table(&rows);
            println!(
                "\n{} orphaned {} row(s) (limit {})",
                rows.len(),
                family.name,
                args.limit
            );
        }
        RowsOutput::Csv => {
            common::write_or_print(args.write.as_deref(), &common::rows_to_csv(&rows))?;
            return Ok(());
        }
    }

    if let Some(path) = &args.write {
        common::write_or_print(Some(path), &common::rows_to_csv(&rows))?;
    }

    Ok(())
}
