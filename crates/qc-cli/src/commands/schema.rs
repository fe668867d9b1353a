//! Schema command implementation
//!
//! Introspects the warehouse catalog and renders the result as a
//! human-readable listing or a JSON document.

use anyhow::{Context, Result};
use qc_schema::{describe_schema, SchemaMetadata, TableMetadata};

use crate::cli::{GlobalArgs, SchemaArgs, SchemaOutput};
use crate::commands::common::{self, load_config};

/// Execute the schema command
pub async fn execute(args: &SchemaArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let db = common::create_database_connection(&config, global.database.as_deref())?;

    let schema_name = args.schema.as_deref().unwrap_or(&config.database.schema);
    if global.verbose {
        eprintln!("[verbose] Introspecting schema '{schema_name}'");
    }

    let metadata = describe_schema(db.as_ref(), schema_name)
        .await
        .context("Schema introspection failed")?;

    match args.output {
        SchemaOutput::Pretty => print_pretty(&metadata),
        SchemaOutput::Json => {
            let json = serde_json::to_string_pretty(&metadata)
                .context("Failed to serialize schema metadata")?;
            common::write_or_print(args.write.as_deref(), &format!("{json}\n"))?;
            return Ok(());
        }
    }

    // --write always emits the JSON document, whatever the display format
    if let Some(path) = &args.write {
        let json = serde_json::to_string_pretty(&metadata)
            .context("Failed to serialize schema metadata")?;
        common::write_or_print(Some(path), &format!("{json}\n"))?;
    }

    Ok(())
}

fn print_pretty(metadata: &SchemaMetadata) {
    if metadata.tables.is_empty() {
        println!("Schema '{}' has no tables.", metadata.schema_name);
        return;
    }

    println!(
        "Schema '{}': {} table(s)\n",
        metadata.schema_name,
        metadata.tables.len()
    );

    for (name, table) in &metadata.tables {
        print_table_block(name, table);
    }
}

fn print_table_block(name: &str, table: &TableMetadata) {
    match &table.description {
        Some(desc) => println!("{} ({} columns) - {}", name, table.column_count, desc),
        None => println!("{} ({} columns)", name, table.column_count),
    }

    let headers = ["COLUMN", "TYPE", "NULLABLE", "KEY", "DESCRIPTION"];
    let rows: Vec<Vec<String>> = table
        .columns
        .iter()
        .map(|col| {
            let key = if table.primary_keys.contains(&col.name) {
                "PK"
            } else if table
                .foreign_keys
                .iter()
                .any(|fk| fk.local_column == col.name)
            {
                "FK"
            } else {
                ""
            };
            vec![
                col.name.clone(),
                col.data_type.clone(),
                if col.nullable { "yes" } else { "no" }.to_string(),
                key.to_string(),
                col.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    common::print_table(&headers, &rows);

    for fk in &table.foreign_keys {
        println!(
            "  foreign key: {} -> {}.{}",
            fk.local_column, fk.foreign_table, fk.foreign_column
        );
    }
    println!();
}
