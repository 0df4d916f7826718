use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::Path, str::FromStr};

use super::{COLLECTION, DocumentStore};
use crate::error::StoreError;

/// SQLite-backed document store. One row per `(collection, key)`.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        let url = format!("sqlite:{}", db_path.display());
        let opts = SqliteConnectOptions::from_str(&url)
            .context("Invalid DB path")?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(opts)
            .await
            .context("Failed to open SQLite database")?;

        init_schema(&pool).await?;

        Ok(Self { pool })
    }
}

async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            key        TEXT NOT NULL,
            body       TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (collection, key)
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create documents table")?;

    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn backend_tag(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND key = ?")
            .bind(COLLECTION)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let body: String = row.get("body");
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    async fn set(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO documents (collection, key, body, updated_at)
             VALUES (?, ?, ?, datetime('now'))
             ON CONFLICT (collection, key)
             DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        )
        .bind(COLLECTION)
        .bind(key)
        .bind(document.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_document_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("folio.db")).await.unwrap();

        assert_eq!(store.get("journey").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("folio.db")).await.unwrap();

        store
            .set("arsenal", &json!({ "data": [1, 2, 3], "extra": true }))
            .await
            .unwrap();
        store.set("arsenal", &json!({ "data": [4] })).await.unwrap();

        assert_eq!(
            store.get("arsenal").await.unwrap(),
            Some(json!({ "data": [4] }))
        );
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.db");

        {
            let store = SqliteStore::open(&path).await.unwrap();
            store
                .set("resume_link", &json!({ "link": "https://example.com/cv.pdf" }))
                .await
                .unwrap();
        }

        let reopened = SqliteStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("resume_link").await.unwrap(),
            Some(json!({ "link": "https://example.com/cv.pdf" }))
        );
    }
}
