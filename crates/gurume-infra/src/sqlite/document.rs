//! SQLite document store implementation.
//!
//! Implements `DocumentStore` from `gurume-core` using sqlx with split
//! read/write pools. Documents are scoped to one persistence project and
//! stored as JSON text.

use chrono::Utc;
use sqlx::Row;

use gurume_core::storage::document_store::DocumentStore;
use gurume_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `DocumentStore`.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: DatabasePool,
    project: String,
}

impl SqliteDocumentStore {
    /// Create a store whose documents all belong to `project`.
    pub fn new(pool: DatabasePool, project: impl Into<String>) -> Self {
        Self {
            pool,
            project: project.into(),
        }
    }
}

/// Pool exhaustion and I/O failures mean the database is unreachable; anything
/// else is a failed statement.
fn db_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

impl DocumentStore for SqliteDocumentStore {
    async fn get(
        &self,
        kind: &str,
        name: &str,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        let row = sqlx::query(
            "SELECT value FROM documents WHERE project = ? AND kind = ? AND name = ?",
        )
        .bind(&self.project)
        .bind(kind)
        .bind(name)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(db_error)?;

        match row {
            Some(row) => {
                let value_str: String = row
                    .try_get("value")
                    .map_err(db_error)?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| RepositoryError::Serialization(format!("invalid JSON value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        kind: &str,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| RepositoryError::Serialization(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO documents (project, kind, name, value, updated_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT (project, kind, name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(&self.project)
        .bind(kind)
        .bind(name)
        .bind(&value_str)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn delete(&self, kind: &str, name: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM documents WHERE project = ? AND kind = ? AND name = ?")
            .bind(&self.project)
            .bind(kind)
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
