//! Error types for qc-db
//!
//! Three kinds, matching the reporting system's error taxonomy: bad
//! configuration surfaces before any query runs, engine failures keep the
//! original engine message, and everything else lands in the catch-all.
//! None of them are retried.

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Configuration error (D001): connection parameters or identifiers
    /// missing or malformed. Raised before any query is attempted.
    #[error("[D001] Invalid database configuration: {0}")]
    Config(String),

    /// Query execution error (D002): the engine rejected or failed a query.
    /// The engine message is preserved for diagnostics.
    #[error("[D002] Query failed: {0}")]
    Query(String),

    /// Catch-all (D003) for unexpected failures during a database-touching
    /// operation.
    #[error("[D003] Unexpected database error: {0}")]
    Database(String),
}

/// Result type alias for [`DbError`]
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::Query(err.to_string())
    }
}
