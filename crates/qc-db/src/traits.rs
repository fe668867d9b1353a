//! Database trait definition

use crate::error::DbResult;
use crate::value::{Rows, Value};
use async_trait::async_trait;

/// Database abstraction trait for emrqc
///
/// Implementations must be Send + Sync for async operation. All emrqc
/// operations are read-only against the warehouse; the write methods exist
/// for fixtures and tooling.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a SELECT, returning ordered columns and rows.
    ///
    /// `params` are bound out-of-band; identifiers must be quoted into
    /// `sql` by the caller.
    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Rows>;

    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
