//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `sleepyhead-core` using sqlx with split read/write
//! pools. Values are stored as plain text.

use chrono::Utc;
use sqlx::Row;

use sleepyhead_core::storage::kv_store::KvStore;
use sleepyhead_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO local_storage (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::database_url;

    use std::time::Duration;

    use sleepyhead_core::journal::store::{JOURNAL_KEY, JournalStore};

    async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url(dir.path())).await.unwrap();
        (dir, pool)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (_dir, pool) = test_pool().await;
        let store = SqliteKvStore::new(pool);

        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (_dir, pool) = test_pool().await;
        let store = SqliteKvStore::new(pool);

        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let (_dir, pool) = test_pool().await;
        let store = SqliteKvStore::new(pool);

        store.set("note", "first").await.unwrap();
        store.set("note", "second").await.unwrap();

        assert_eq!(store.get("note").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_remove() {
        let (_dir, pool) = test_pool().await;
        let store = SqliteKvStore::new(pool);

        store.set("temp", "value").await.unwrap();
        store.remove("temp").await.unwrap();
        assert!(store.get("temp").await.unwrap().is_none());

        // Removing again is a no-op
        store.remove("temp").await.unwrap();
    }

    #[tokio::test]
    async fn test_value_is_stored_verbatim() {
        let (_dir, pool) = test_pool().await;
        let store = SqliteKvStore::new(pool);

        let text = "  multi\nline 💭 with \"quotes\"  ";
        store.set("raw", text).await.unwrap();
        assert_eq!(store.get("raw").await.unwrap().as_deref(), Some(text));
    }

    #[tokio::test]
    async fn test_journal_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());

        {
            let pool = DatabasePool::new(&url).await.unwrap();
            let mut journal = JournalStore::load(SqliteKvStore::new(pool), Duration::from_secs(3))
                .await
                .unwrap();
            journal.set_text("hello");
            journal.save().await.unwrap();
        }

        let pool = DatabasePool::new(&url).await.unwrap();
        let store = SqliteKvStore::new(pool);
        assert_eq!(store.get(JOURNAL_KEY).await.unwrap().as_deref(), Some("hello"));

        let journal = JournalStore::load(store, Duration::from_secs(3)).await.unwrap();
        assert_eq!(journal.text(), "hello");
    }
}
