//! Missing command implementation
//!
//! Lists child rows where a configured field is null or blank.

use anyhow::{Context, Result};
use qc_quality::rows_missing_field;

use crate::cli::{GlobalArgs, MissingArgs, RowsOutput};
use crate::commands::common::{self, load_config};

/// Execute the missing command
pub async fn execute(args: &MissingArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let db = common::create_database_connection(&config, global.database.as_deref())?;
    let family = common::resolve_family(&config, &args.family)?;

    let rows = rows_missing_field(db.as_ref(), &family, &args.field, args.limit)
        .await
        .with_context(|| {
            format!(
                "Missing-field listing failed for '{}' in family '{}'",
                args.field, family.name
            )
        })?;

    match args.output {
        RowsOutput::Table => {
            if rows.is_empty() {
                println!(
                    "No {} rows with missing '{}' found.",
                    family.name, args.field
                );
                return Ok(());
            }
            common::print_rows_table(&rows);
            println!(
                "\n{} {} row(s) missing '{}' (limit {})",
                rows.len(),
                family.name,
                args.field,
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
