//! Schema discovery against the DuckDB catalog.
//!
//! One catalog query lists the schema's base tables, then three
//! sub-queries run per table (columns, primary keys, foreign keys). All
//! catalog parameters are bound, never interpolated.

use log::warn;
use qc_db::{Database, Rows, Value};
use std::collections::BTreeMap;

use crate::error::{SchemaError, SchemaResult};
use crate::types::{ColumnMetadata, ForeignKeyRef, SchemaMetadata, TableMetadata};

const TABLES_SQL: &str = "\
SELECT table_name, column_count, comment \
FROM duckdb_tables() \
WHERE schema_name = ? AND NOT internal \
ORDER BY table_name";

const COLUMNS_SQL: &str = "\
SELECT column_name, data_type, character_maximum_length, column_default, is_nullable, comment \
FROM duckdb_columns() \
WHERE schema_name = ? AND table_name = ? AND NOT internal \
ORDER BY column_index";

const PRIMARY_KEYS_SQL: &str = "\
SELECT UNNEST(constraint_column_names) AS column_name \
FROM duckdb_constraints() \
WHERE schema_name = ? AND table_name = ? AND constraint_type = 'PRIMARY KEY'";

const FOREIGN_KEYS_SQL: &str = "\
SELECT UNNEST(constraint_column_names) AS column_name, \
       referenced_table, \
       UNNEST(referenced_column_names) AS referenced_column \
FROM duckdb_constraints() \
WHERE schema_name = ? AND table_name = ? AND constraint_type = 'FOREIGN KEY'";

/// Enumerate a schema's tables, columns, primary keys, and foreign keys.
///
/// A schema with zero tables (including one that does not exist) returns
/// an empty `tables` map — catalog absence is an empty result, not an
/// error. A catalog row with an empty table name is skipped with a
/// warning; any sub-query failure aborts the whole call, so the returned
/// document is always complete.
pub async fn describe_schema(
    db: &dyn Database,
    schema_name: &str,
) -> SchemaResult<SchemaMetadata> {
    let table_rows = db
        .query(TABLES_SQL, &[Value::Text(schema_name.to_string())])
        .await?;

    let mut tables = BTreeMap::new();
    for i in 0..table_rows.len() {
        let table_name = table_rows
            .get(i, "table_name")
            .and_then(Value::as_str)
            .unwrap_or("");
        if table_name.is_empty() {
            warn!("skipping catalog row {i} in schema '{schema_name}': no table name");
            continue;
        }

        // Malformed counts coerce to 0 rather than failing the call;
        // negative values cannot pass the as_u64 view.
        let column_count = table_rows
            .get(i, "column_count")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let description = opt_text(table_rows.get(i, "comment"));

        let params = [
            Value::Text(schema_name.to_string()),
            Value::Text(table_name.to_string()),
        ];
        let columns = fetch_columns(db, &params).await?;
        let primary_keys = fetch_primary_keys(db, &params).await?;
        let foreign_keys = fetch_foreign_keys(db, &params).await?;

        tables.insert(
            table_name.to_string(),
            TableMetadata {
                description,
                column_count,
                columns,
                primary_keys,
                foreign_keys,
            },
        );
    }

    Ok(SchemaMetadata {
        schema_name: schema_name.to_string(),
        tables,
    })
}

async fn fetch_columns(db: &dyn Database, params: &[Value]) -> SchemaResult<Vec<ColumnMetadata>> {
    let rows = db.query(COLUMNS_SQL, params).await?;
    let mut columns = Vec::with_capacity(rows.len());
    for i in 0..rows.len() {
        let name = require_text(&rows, i, "column_name")?;
        let data_type = require_text(&rows, i, "data_type")?;
        columns.push(ColumnMetadata {
            name,
            data_type,
            max_length: rows
                .get(i, "character_maximum_length")
                .and_then(Value::as_u64),
            default_expression: opt_text(rows.get(i, "column_default")),
            nullable: rows
                .get(i, "is_nullable")
                .map(value_as_bool)
                .unwrap_or(true),
            description: opt_text(rows.get(i, "comment")),
        });
    }
    Ok(columns)
}

async fn fetch_primary_keys(db: &dyn Database, params: &[Value]) -> SchemaResult<Vec<String>> {
    let rows = db.query(PRIMARY_KEYS_SQL, params).await?;
    let mut keys = Vec::with_capacity(rows.len());
    for i in 0..rows.len() {
        keys.push(require_text(&rows, i, "column_name")?);
    }
    Ok(keys)
}

async fn fetch_foreign_keys(
    db: &dyn Database,
    params: &[Value],
) -> SchemaResult<Vec<ForeignKeyRef>> {
    let rows = db.query(FOREIGN_KEYS_SQL, params).await?;
    let mut edges = Vec::with_capacity(rows.len());
    for i in 0..rows.len() {
        edges.push(ForeignKeyRef {
            local_column: require_text(&rows, i, "column_name")?,
            foreign_table: require_text(&rows, i, "referenced_table")?,
            foreign_column: require_text(&rows, i, "referenced_column")?,
        });
    }
    Ok(edges)
}

fn require_text(rows: &Rows, row: usize, column: &str) -> SchemaResult<String> {
    rows.get(row, column)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SchemaError::MissingCatalogColumn {
            column: column.to_string(),
        })
}

fn opt_text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// The catalog reports nullability as a boolean, but be lenient about the
/// shape the driver hands back.
fn value_as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Text(s) => s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes"),
        _ => false,
    }
}

#[cfg(test)]
#[path = "introspect_test.rs"]
mod introspect_test;
