//! Query construction for the analyzer.
//!
//! One generic builder per operation, driven by the `RecordFamily`
//! configuration. Table and column names are trusted configuration, quoted
//! before being spliced into SQL text; nothing here interpolates
//! request-time user input.

use qc_core::family::{FieldGroup, FieldSpec, RecordFamily};
use qc_core::sql_utils::{quote_ident, quote_qualified};

/// Missing-value predicate for a field, optionally qualified with a table
/// alias. Text fields count trimmed-empty strings as missing, non-text
/// fields only NULL.
pub(crate) fn missing_predicate(field: &FieldSpec, alias: Option<&str>) -> String {
    let col = match alias {
        Some(a) => format!("{a}.{}", quote_ident(&field.name)),
        None => quote_ident(&field.name),
    };
    if field.text {
        format!("({col} IS NULL OR TRIM({col}) = '')")
    } else {
        format!("{col} IS NULL")
    }
}

/// `SUM(CASE ...)` missing counter for a field, cast to BIGINT (DuckDB
/// sums integers into HUGEINT, which the driver cannot hand back as i64).
fn missing_sum(field: &FieldSpec, alias: Option<&str>) -> String {
    format!(
        "CAST(SUM(CASE WHEN {} THEN 1 ELSE 0 END) AS BIGINT)",
        missing_predicate(field, alias)
    )
}

/// Total child row count.
pub(crate) fn total_count(family: &RecordFamily) -> String {
    format!(
        "SELECT COUNT(*) AS total FROM {}",
        quote_qualified(&family.child_table)
    )
}

/// One aggregate pass over the child table counting missing values for
/// every field of a group. Result columns are named `<field>_missing`.
pub(crate) fn missing_counts(family: &RecordFamily, group: FieldGroup) -> String {
    let sums: Vec<String> = family
        .fields(group)
        .iter()
        .map(|f| {
            format!(
                "{} AS {}",
                missing_sum(f, None),
                quote_ident(&format!("{}_missing", f.name))
            )
        })
        .collect();
    format!(
        "SELECT {} FROM {}",
        sums.join(", "),
        quote_qualified(&family.child_table)
    )
}

/// Count of distinct parent rows having at least one child.
pub(crate) fn parents_with_children(family: &RecordFamily) -> String {
    format!(
        "SELECT COUNT(DISTINCT p.{key}) AS n FROM {parent} p \
         INNER JOIN {child} i ON p.{key} = i.{join}",
        key = quote_ident(&family.parent_key),
        parent = quote_qualified(&family.parent_table),
        child = quote_qualified(&family.child_table),
        join = quote_ident(&family.join_column),
    )
}

/// Count of parent rows with no matching children.
pub(crate) fn parents_without_children(family: &RecordFamily) -> String {
    format!(
        "SELECT COUNT(*) AS n FROM {parent} p \
         LEFT JOIN {child} i ON p.{key} = i.{join} \
         WHERE i.{join} IS NULL",
        key = quote_ident(&family.parent_key),
        parent = quote_qualified(&family.parent_table),
        child = quote_qualified(&family.child_table),
        join = quote_ident(&family.join_column),
    )
}

/// Count of child rows whose join key matches an existing parent.
pub(crate) fn valid_children(family: &RecordFamily) -> String {
    format!(
        "SELECT COUNT(*) AS n FROM {child} i \
         INNER JOIN {parent} p ON i.{join} = p.{key}",
        key = quote_ident(&family.parent_key),
        parent = quote_qualified(&family.parent_table),
        child = quote_qualified(&family.child_table),
        join = quote_ident(&family.join_column),
    )
}

/// Count of child rows whose join key matches no parent.
pub(crate) fn orphaned_children(family: &RecordFamily) -> String {
    format!(
        "SELECT COUNT(*) AS n FROM {child} i \
         LEFT JOIN {parent} p ON i.{join} = p.{key} \
         WHERE p.{key} IS NULL",
        key = quote_ident(&family.parent_key),
        parent = quote_qualified(&family.parent_table),
        child = quote_qualified(&family.child_table),
        join = quote_ident(&family.join_column),
    )
}

/// Grouped per-organization aggregate: per-field missing counts/rates and
/// a combined completeness percent over the group's fields, ordered by
/// completeness descending with record count breaking ties.
pub(crate) fn by_organization(
    family: &RecordFamily,
    org_column: &str,
    group: FieldGroup,
) -> String {
    let fields = family.fields(group);
    let mut select = vec![
        format!("p.{} AS organization", quote_ident(org_column)),
        "COUNT(*) AS record_count".to_string(),
    ];
    for field in fields {
        let sum = missing_sum(field, Some("i"));
        select.push(format!(
            "{sum} AS {}",
            quote_ident(&format!("{}_missing", field.name))
        ));
        select.push(format!(
            "ROUND(100.0 * {sum} / COUNT(*), 2) AS {}",
            quote_ident(&format!("{}_missing_rate", field.name))
        ));
    }
    let missing_total: Vec<String> = fields.iter().map(|f| missing_sum(f, Some("i"))).collect();
    select.push(format!(
        "ROUND(100.0 - (100.0 * ({}) / (COUNT(*) * {})), 2) AS completeness",
        missing_total.join(" + "),
        fields.len(),
    ));

    format!(
        "SELECT {select} FROM {child} i \
         INNER JOIN {parent} p ON i.{join} = p.{key} \
         GROUP BY p.{org} \
         ORDER BY completeness DESC, record_count DESC",
        select = select.join(", "),
        child = quote_qualified(&family.child_table),
        parent = quote_qualified(&family.parent_table),
        join = quote_ident(&family.join_column),
        key = quote_ident(&family.parent_key),
        org = quote_ident(org_column),
    )
}

/// Full orphaned child rows, capped.
pub(crate) fn orphaned_rows(family: &RecordFamily, limit: u32) -> String {
    format!(
        "SELECT i.* FROM {child} i \
         LEFT JOIN {parent} p ON i.{join} = p.{key} \
         WHERE p.{key} IS NULL LIMIT {limit}",
        key = quote_ident(&family.parent_key),
        parent = quote_qualified(&family.parent_table),
        child = quote_qualified(&family.child_table),
        join = quote_ident(&family.join_column),
    )
}

/// Child rows where one configured field is missing, capped.
pub(crate) fn rows_missing_field(family: &RecordFamily, field: &FieldSpec, limit: u32) -> String {
    format!(
        "SELECT * FROM {child} WHERE {predicate} LIMIT {limit}",
        child = quote_qualified(&family.child_table),
        predicate = missing_predicate(field, None),
    )
}
