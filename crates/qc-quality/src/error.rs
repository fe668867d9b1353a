//! Error types for qc-quality

use qc_core::family::FieldGroup;
use qc_db::DbError;
use thiserror::Error;

/// Completeness analyzer errors
#[derive(Error, Debug)]
pub enum QualityError {
    /// A001: the child table has no rows. Rates over zero records are
    /// undefined; callers report "no data" instead of dividing by zero.
    #[error("[A001] No data: {table} has no rows")]
    NoData { table: String },

    /// A002: a field group is empty; the mean of zero rates is undefined
    /// and never silently defaults to 0 or 100.
    #[error("[A002] Cannot average an empty {group} field list")]
    EmptyFieldSet { group: FieldGroup },

    /// A003: a field name was requested that the family does not configure.
    #[error("[A003] Field '{field}' is not configured for family '{family}'")]
    UnknownField { field: String, family: String },

    /// A004: an aggregate result was missing an expected column — the
    /// result would be ambiguous, so the operation fails instead.
    #[error("[A004] Query result missing expected column '{column}'")]
    MissingColumn { column: String },

    /// A005: underlying database failure, message preserved.
    #[error("[A005] Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for [`QualityError`]
pub type QualityResult<T> = Result<T, QualityError>;
