use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite, sqlite::SqlitePoolOptions};
use tracing::debug;

use domain::{DataError, Tag, TagStore};

/// Durable on-device tag store backed by SQLite.
///
/// The full collection lives in a single `tags` table keyed by id.
/// Bulk saves use ignore-on-conflict semantics: pre-existing ids are
/// never overwritten by a save.
#[derive(Clone)]
pub struct SqliteTagStore {
    pool: Pool<Sqlite>,
}

impl SqliteTagStore {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1) // SQLite is single-writer
            .connect(connection_string)
            .await?;

        // Initialize table
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY,
                label TEXT NOT NULL,
                color TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TagStore for SqliteTagStore {
    async fn get_tags(&self) -> Result<Vec<Tag>, DataError> {
        let rows = sqlx::query("SELECT id, label, color FROM tags")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DataError::Store(e.to_string()))?;

        let tags = rows
            .into_iter()
            .map(|row| Tag::new(row.get::<i64, _>(0), row.get::<String, _>(1), row.get::<String, _>(2)))
            .collect::<Vec<Tag>>();

        debug!(count = tags.len(), "loaded tags from local store");
        Ok(tags)
    }

    async fn save_tags(&self, tags: &[Tag]) -> Result<(), DataError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DataError::Store(e.to_string()))?;

        for tag in tags {
            sqlx::query("INSERT OR IGNORE INTO tags (id, label, color) VALUES (?, ?, ?)")
                .bind(tag.id)
                .bind(&tag.label)
                .bind(&tag.color)
                .execute(&mut *tx)
                .await
                .map_err(|e| DataError::Store(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DataError::Store(e.to_string()))?;

        debug!(count = tags.len(), "saved tags to local store");
        Ok(())
    }

    async fn shutdown(&self) {
        debug!("shutting down the local tag store");
        self.pool.close().await;
    }
}
