//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use crate::value::{Rows, Value};
use async_trait::async_trait;
use duckdb::Connection;
use qc_core::sql_utils::split_qualified_name;
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::Config(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::Config(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::Database(format!("connection mutex poisoned: {e}")))
    }

    /// Execute a query synchronously, collecting all rows.
    ///
    /// DuckDB 1.x panics on `Statement::column_count()` before execution,
    /// so rows are collected via `query_map` first and column names read
    /// afterwards.
    fn query_sync(&self, sql: &str, params: &[Value]) -> DbResult<Rows> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::Query(format!("{e}: {sql}")))?;

        let bound: Vec<duckdb::types::Value> = params.iter().map(to_duckdb_value).collect();
        let rows: Vec<Vec<Value>> = stmt
            .query_map(duckdb::params_from_iter(bound), |row| {
                let col_count = row.as_ref().column_count();
                Ok((0..col_count).map(|i| read_value(row, i)).collect())
            })
            .map_err(|e| DbError::Query(format!("{e}: {sql}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Query(format!("row error: {e}")))?;

        let columns: Vec<String> = (0..stmt.column_count())
            .map(|i| {
                stmt.column_name(i)
                    .map_or_else(|_| format!("col{i}"), |v| v.to_string())
            })
            .collect();

        Ok(Rows { columns, rows })
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::Query(format!("{e}: {sql}")))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::Query(e.to_string()))
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Rows> {
        self.query_sync(sql, params)
    }

    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = split_qualified_name(name);
        let rows = self.query_sync(
            "SELECT COUNT(*) AS n FROM information_schema.tables \
             WHERE table_schema = ? AND table_name = ?",
            &[
                Value::Text(schema.to_string()),
                Value::Text(table.to_string()),
            ],
        )?;
        Ok(rows.get(0, "n").and_then(Value::as_i64).unwrap_or(0) > 0)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

/// Convert a bound parameter into the driver's value type.
fn to_duckdb_value(value: &Value) -> duckdb::types::Value {
    match value {
        Value::Null => duckdb::types::Value::Null,
        Value::Bool(b) => duckdb::types::Value::Boolean(*b),
        Value::Int(n) => duckdb::types::Value::BigInt(*n),
        Value::Float(x) => duckdb::types::Value::Double(*x),
        Value::Text(s) => duckdb::types::Value::Text(s.clone()),
    }
}

/// Read a cell by inspecting its actual storage type.
///
/// Typed `row.get` attempts are unusable here: the driver casts across
/// numeric types, so a DOUBLE cell read as `i64` silently truncates its
/// fraction. Integer widths collapse into `Int` (a HUGEINT beyond i64
/// range does not fit the value model and reads as Null), FLOAT/DOUBLE
/// into `Float`, DECIMAL into its text form. Types outside the model
/// (temporal, nested) read as Null.
fn read_value(row: &duckdb::Row<'_>, idx: usize) -> Value {
    use duckdb::types::ValueRef;

    match row.get_ref(idx) {
        Ok(ValueRef::Null) => Value::Null,
        Ok(ValueRef::Boolean(b)) => Value::Bool(b),
        Ok(ValueRef::TinyInt(n)) => Value::Int(n.into()),
        Ok(ValueRef::SmallInt(n)) => Value::Int(n.into()),
        Ok(ValueRef::Int(n)) => Value::Int(n.into()),
        Ok(ValueRef::BigInt(n)) => Value::Int(n),
        Ok(ValueRef::HugeInt(n)) => i64::try_from(n).map_or(Value::Null, Value::Int),
        Ok(ValueRef::UTinyInt(n)) => Value::Int(n.into()),
        Ok(ValueRef::USmallInt(n)) => Value::Int(n.into()),
        Ok(ValueRef::UInt(n)) => Value::Int(n.into()),
        Ok(ValueRef::UBigInt(n)) => i64::try_from(n).map_or(Value::Null, Value::Int),
        Ok(ValueRef::Float(x)) => Value::Float(x.into()),
        Ok(ValueRef::Double(x)) => Value::Float(x),
        Ok(ValueRef::Decimal(d)) => Value::Text(d.to_string()),
        Ok(ValueRef::Text(s)) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        _ => Value::Null,
    }
}
