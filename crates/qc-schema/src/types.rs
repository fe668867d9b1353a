//! Schema metadata document types.

use serde::Serialize;
use std::collections::BTreeMap;

/// Root document for one schema. Table names are unique within a schema
/// (guaranteed by the catalog); the map keeps them sorted for determinism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaMetadata {
    pub schema_name: String,
    pub tables: BTreeMap<String, TableMetadata>,
}

/// One table's structure.
///
/// `columns` is ordered by physical ordinal position and must stay that
/// way; `primary_keys` has set semantics, consumers must not rely on its
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    pub description: Option<String>,
    pub column_count: u64,
    pub columns: Vec<ColumnMetadata>,
    pub primary_keys: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyRef>,
}

/// One column's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: String,
    pub max_length: Option<u64>,
    pub default_expression: Option<String>,
    pub nullable: bool,
    pub description: Option<String>,
}

/// One foreign-key edge. The source catalog exposes no cardinality or
/// cascade metadata here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyRef {
    pub local_column: String,
    pub foreign_table: String,
    pub foreign_column: String,
}
