//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use qc_core::config::Config;
use qc_core::family::RecordFamily;
use qc_db::{Database, DuckDbBackend, Rows};
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Load the project config from the directory specified in global CLI
/// arguments, honoring an explicit `--config` override.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)).context("Failed to load config")?,
        None => Config::load_from_dir(Path::new(&global.project_dir))
            .context("Failed to load config")?,
    };
    if global.verbose {
        eprintln!("[verbose] Loaded project '{}'", config.name);
    }
    Ok(config)
}

/// Create a database connection from the config, honoring an explicit
/// `--database` path override.
pub(crate) fn create_database_connection(
    config: &Config,
    database: Option<&str>,
) -> Result<Arc<dyn Database>> {
    let path = database.unwrap_or(&config.database.path);
    let db: Arc<dyn Database> =
        Arc::new(DuckDbBackend::new(path).context("Failed to connect to database")?);
    Ok(db)
}

/// Resolve the families to operate on from a comma-separated selector.
///
/// `None` means all configured families. Unknown names are an error that
/// lists the available family names.
pub(crate) fn resolve_families(
    config: &Config,
    selector: Option<&str>,
) -> Result<Vec<RecordFamily>> {
    let available = config.effective_families();
    let Some(selector) = selector else {
        return Ok(available);
    };

    let mut selected = Vec::new();
    for name in selector.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match available.iter().find(|f| f.name == name) {
            Some(family) => selected.push(family.clone()),
            None => {
                let names: Vec<&str> = available.iter().map(|f| f.name.as_str()).collect();
                bail!(
                    "Unknown family '{}'. Available families: {}",
                    name,
                    names.join(", ")
                );
            }
        }
    }
    Ok(selected)
}

/// Look up a single family by name, with the same error shape as
/// [`resolve_families`].
pub(crate) fn resolve_family(config: &Config, name: &str) -> Result<RecordFamily> {
    let mut families = resolve_families(config, Some(name))?;
    // resolve_families errors on unknown names, so this pop cannot miss
    families
        .pop()
        .ok_or_else(|| anyhow::anyhow!("Unknown family '{}'", name))
}

/// Print `content` to stdout, or write it to `path` when given.
pub(crate) fn write_or_print(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create output directory")?;
                }
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Results written to: {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Table-printing utilities
// ---------------------------------------------------------------------------

/// Calculate column widths for a table given headers and row data.
///
/// For each column, returns the maximum width across the header and all
/// row values so that data aligns when printed with left-padding.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// Calculates column widths from `headers` and `rows`, then prints
/// a left-aligned header row, a separator line of dashes, and each
/// data row.  Columns are separated by two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}

/// Print a query result set as a table.
pub(crate) fn print_rows_table(rows: &Rows) {
    let headers: Vec<&str> = rows.columns.iter().map(String::as_str).collect();
    let data: Vec<Vec<String>> = rows
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    print_table(&headers, &data);
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Quote a CSV cell when it contains a delimiter, quote, or newline.
pub(crate) fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Join cells into one CSV line with a trailing newline.
pub(crate) fn csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| csv_escape(c.as_ref())).collect();
    format!("{}\n", escaped.join(","))
}

/// Render a query result set as CSV, header row first.
pub(crate) fn rows_to_csv(rows: &Rows) -> String {
    let mut out = csv_line(&rows.columns);
    for row in &rows.rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&csv_line(&cells));
    }
    out
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
