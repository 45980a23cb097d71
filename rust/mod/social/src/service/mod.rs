pub mod character;
pub mod comment;
pub mod follow;
pub mod notification;
pub mod post;
pub mod schema;
pub mod trend;
pub mod user;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use plaza_sql::{SQLStore, Value};

/// Social service error type.
#[derive(Debug, Error)]
pub enum SocialError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<SocialError> for plaza_core::ServiceError {
    fn from(e: SocialError) -> Self {
        match e {
            SocialError::NotFound(m) => plaza_core::ServiceError::NotFound(m),
            SocialError::Conflict(m) => plaza_core::ServiceError::Conflict(m),
            SocialError::Validation(m) => plaza_core::ServiceError::Validation(m),
            SocialError::InvalidOperation(m) => plaza_core::ServiceError::InvalidOperation(m),
            SocialError::Storage(m) => plaza_core::ServiceError::Storage(m),
            SocialError::Internal(m) => plaza_core::ServiceError::Internal(m),
        }
    }
}

/// The social service. Holds the storage backend.
///
/// All entities live in the database; no request-scoped state is cached
/// here. Every operation reloads what it needs.
pub struct SocialService {
    pub(crate) sql: Arc<dyn SQLStore>,
}

impl SocialService {
    /// Create a new SocialService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, SocialError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }

    // ── Generic document helpers ──
    //
    // Records are stored as a JSON `data` column plus indexed columns
    // used for filtering and ordering. Single-row statements are atomic;
    // nothing here spans rows.

    /// Insert a record as JSON into a table with indexed columns.
    pub(crate) fn insert_record<T: Serialize>(
        &self,
        table: &str,
        id: &str,
        record: &T,
        indexes: &[(&str, Value)],
    ) -> Result<(), SocialError> {
        let json = serde_json::to_string(record)
            .map_err(|e| SocialError::Internal(e.to_string()))?;

        let mut cols = vec!["id", "data"];
        let mut placeholders = vec!["?1".to_string(), "?2".to_string()];
        let mut params = vec![Value::Text(id.to_string()), Value::Text(json)];

        for (i, (col, val)) in indexes.iter().enumerate() {
            let idx = i + 3;
            cols.push(col);
            placeholders.push(format!("?{}", idx));
            params.push(val.clone());
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            cols.join(", "),
            placeholders.join(", "),
        );

        self.sql.exec(&sql, &params).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint") {
                SocialError::Conflict(msg)
            } else {
                SocialError::Storage(msg)
            }
        })?;

        Ok(())
    }

    /// Get a record by id, deserializing the JSON `data` column.
    pub(crate) fn get_record<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<T, SocialError> {
        let sql = format!("SELECT data FROM {} WHERE id = ?1", table);
        let rows = self
            .sql
            .query(&sql, &[Value::Text(id.to_string())])
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        let row = rows
            .first()
            .ok_or_else(|| SocialError::NotFound(format!("{}/{}", table, id)))?;
        let data = row
            .get_str("data")
            .ok_or_else(|| SocialError::Internal("missing data column".into()))?;
        serde_json::from_str(data).map_err(|e| SocialError::Internal(e.to_string()))
    }

    /// Update a record's JSON data and indexed columns.
    pub(crate) fn update_record<T: Serialize>(
        &self,
        table: &str,
        id: &str,
        record: &T,
        indexes: &[(&str, Value)],
    ) -> Result<(), SocialError> {
        let json = serde_json::to_string(record)
            .map_err(|e| SocialError::Internal(e.to_string()))?;

        let mut sets = vec!["data = ?1".to_string()];
        let mut params: Vec<Value> = vec![Value::Text(json)];

        for (i, (col, val)) in indexes.iter().enumerate() {
            let idx = i + 2;
            sets.push(format!("{} = ?{}", col, idx));
            params.push(val.clone());
        }

        let id_idx = params.len() + 1;
        params.push(Value::Text(id.to_string()));

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table,
            sets.join(", "),
            id_idx,
        );

        let affected = self
            .sql
            .exec(&sql, &params)
            .map_err(|e| SocialError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(SocialError::NotFound(format!("{}/{}", table, id)));
        }

        Ok(())
    }

    /// List records with optional equality filters, an explicit ORDER BY
    /// clause, and pagination. Returns the page plus the unpaged total.
    pub(crate) fn list_records<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, Value)],
        order_by: &str,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<T>, usize), SocialError> {
        let mut where_clauses = Vec::new();
        let mut params = Vec::new();

        for (i, (col, val)) in filters.iter().enumerate() {
            let idx = i + 1;
            where_clauses.push(format!("{} = ?{}", col, idx));
            params.push(val.clone());
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) as cnt FROM {}{}", table, where_sql);
        let count_rows = self
            .sql
            .query(&count_sql, &params)
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        let total = count_rows
            .first()
            .and_then(|r| r.get_i64("cnt"))
            .unwrap_or(0) as usize;

        let limit_idx = params.len() + 1;
        let offset_idx = params.len() + 2;
        params.push(Value::Integer(limit as i64));
        params.push(Value::Integer(offset as i64));

        let sql = format!(
            "SELECT data FROM {}{} ORDER BY {} LIMIT ?{} OFFSET ?{}",
            table, where_sql, order_by, limit_idx, offset_idx,
        );

        let rows = self
            .sql
            .query(&sql, &params)
            .map_err(|e| SocialError::Storage(e.to_string()))?;

        let mut items = Vec::new();
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| SocialError::Internal("missing data column".into()))?;
            let item: T =
                serde_json::from_str(data).map_err(|e| SocialError::Internal(e.to_string()))?;
            items.push(item);
        }

        Ok((items, total))
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Arc;

    use plaza_sql::SqliteStore;

    use super::SocialService;
    use crate::model::CreateUser;

    pub fn test_service() -> Arc<SocialService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        SocialService::new(sql).unwrap()
    }

    pub fn seed_user(svc: &SocialService, uid: &str, name: &str) {
        svc.create_user(CreateUser {
            uid: uid.to_string(),
            display_name: name.to_string(),
            photo: format!("https://img.example/{uid}.png"),
            bio: String::new(),
        })
        .unwrap();
    }
}
