//! Error types for qc-schema

use qc_db::DbError;
use thiserror::Error;

/// Schema introspection errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// S001: underlying database failure, message preserved.
    #[error("[S001] Database error: {0}")]
    Db(#[from] DbError),

    /// S002: a catalog query came back without an expected column. The
    /// document would be ambiguous, so the whole call fails.
    #[error("[S002] Catalog result missing expected column '{column}'")]
    MissingCatalogColumn { column: String },
}

/// Result type alias for [`SchemaError`]
pub type SchemaResult<T> = Result<T, SchemaError>;
