use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::SQLError;
use crate::traits::{Row, SQLStore, Value};

/// SqliteStore is a SQLStore implementation backed by rusqlite (bundled SQLite).
///
/// The connection is serialized behind a mutex, so every statement is a
/// single atomic step from the caller's point of view.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let conn = Connection::open(path)
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        // Enable WAL mode for better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SQLError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<Box<dyn rusqlite::types::ToSql + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn rusqlite::types::ToSql + '_> {
            match v {
                Value::Null => Box::new(rusqlite::types::Null),
                Value::Integer(i) => Box::new(*i),
                Value::Real(f) => Box::new(*f),
                Value::Text(s) => Box::new(s.as_str()),
                Value::Blob(b) => Box::new(b.as_slice()),
            }
        })
        .collect()
}

/// Decode a column by its declared storage class, not by probing casts,
/// so a REAL column holding 0.0 never comes back as an integer.
fn decode(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

impl SQLStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                let mut columns = Vec::with_capacity(column_names.len());
                for (i, name) in column_names.iter().enumerate() {
                    let val = row
                        .get_ref(i)
                        .map(decode)
                        .unwrap_or(Value::Null);
                    columns.push((name.clone(), val));
                }
                Ok(Row { columns })
            })
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| SQLError::Query(e.to_string()))?);
        }
        Ok(result)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let affected = conn
            .execute(sql, param_refs.as_slice())
            .map_err(|e| SQLError::Execution(e.to_string()))?;

        Ok(affected as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_and_query_typed_values() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .exec(
                "CREATE TABLE t (id TEXT PRIMARY KEY, n INTEGER, score REAL)",
                &[],
            )
            .unwrap();
        let affected = store
            .exec(
                "INSERT INTO t (id, n, score) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text("a".into()),
                    Value::Integer(7),
                    Value::Real(0.0),
                ],
            )
            .unwrap();
        assert_eq!(affected, 1);

        let rows = store.query("SELECT id, n, score FROM t", &[]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str("id"), Some("a"));
        assert_eq!(rows[0].get_i64("n"), Some(7));
        // REAL column holding 0.0 must stay a real, not decode as 0_i64.
        assert_eq!(rows[0].get("score"), Some(&Value::Real(0.0)));
        assert_eq!(rows[0].get_f64("score"), Some(0.0));
    }

    #[test]
    fn update_reports_affected_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.exec("CREATE TABLE t (id TEXT, v INTEGER)", &[]).unwrap();
        for i in 0..3 {
            store
                .exec(
                    "INSERT INTO t (id, v) VALUES (?1, ?2)",
                    &[Value::Text(format!("k{i}")), Value::Integer(i)],
                )
                .unwrap();
        }
        let affected = store
            .exec("UPDATE t SET v = v + 1 WHERE v > 0", &[])
            .unwrap();
        assert_eq!(affected, 2);

        // Matching nothing is zero affected rows, not an error.
        let affected = store
            .exec("UPDATE t SET v = 99 WHERE id = ?1", &[Value::Text("nope".into())])
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[test]
    fn file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.sqlite");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.exec("CREATE TABLE t (id TEXT)", &[]).unwrap();
            store
                .exec("INSERT INTO t (id) VALUES (?1)", &[Value::Text("x".into())])
                .unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        let rows = store.query("SELECT id FROM t", &[]).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
