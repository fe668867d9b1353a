//! SQL identifier quoting utilities
//!
//! Record family configuration names tables and columns that are spliced
//! into dynamic SQL. Quoting them prevents injection and keeps unusual
//! identifiers (mixed case, reserved words) working.

/// Quote a SQL identifier.
///
/// Wraps the identifier in double quotes and escapes any embedded double
/// quotes by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use qc_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("drug_name"), r#""drug_name""#);
/// assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a potentially schema-qualified name (e.g. `emr_back.emr_order`).
///
/// Splits on `.` and individually quotes each component.
///
/// # Examples
/// ```
/// use qc_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("emr_order"), r#""emr_order""#);
/// assert_eq!(
///     quote_qualified("emr_back.emr_order"),
///     r#""emr_back"."emr_order""#
/// );
/// ```
pub fn quote_qualified(name: &str) -> String {
    name.split('.')
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a potentially schema-qualified table name into (schema, table).
///
/// Uses the last `.` as the separator. If no `.` is present, returns
/// `("main", name)` — DuckDB's default schema.
///
/// # Examples
/// ```
/// use qc_core::sql_utils::split_qualified_name;
/// assert_eq!(split_qualified_name("emr_order"), ("main", "emr_order"));
/// assert_eq!(
///     split_qualified_name("emr_back.emr_order"),
///     ("emr_back", "emr_order")
/// );
/// ```
pub fn split_qualified_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("main", name),
    }
}
