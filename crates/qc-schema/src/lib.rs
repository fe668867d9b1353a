//! qc-schema - Schema introspector for emrqc
//!
//! Discovers schema structure generically for any schema in the warehouse:
//! tables, ordered columns, primary keys, and foreign-key edges, assembled
//! into a single nested metadata document suitable for export.

pub mod error;
pub mod introspect;
pub mod types;

pub use error::{SchemaError, SchemaResult};
pub use introspect::describe_schema;
pub use types::{ColumnMetadata, ForeignKeyRef, SchemaMetadata, TableMetadata};
