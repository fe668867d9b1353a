//! qc-db - Database abstraction layer for emrqc
//!
//! This crate provides the `Database` trait, tabular result types, and the
//! DuckDB implementation used to query the EMR warehouse.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod value;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use value::{Rows, Value};
