//! SQLite shared context repository.
//!
//! Implements `ContextRepository` from `sprite-core` over the
//! `shared_context` table. Reads go to the reader pool; inserts and
//! evictions go to the single-connection writer pool.

use sprite_core::context::repository::ContextRepository;
use sprite_types::error::StoreError;
use sprite_types::turn::Turn;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ContextRepository`.
pub struct SqliteContextRepository {
    pool: DatabasePool,
}

impl SqliteContextRepository {
    /// Create a repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Classify a sqlx error: pool/IO trouble is a connection error, the rest
/// are query errors.
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Connection(e.to_string())
        }
        _ => StoreError::Query(e.to_string()),
    }
}

impl ContextRepository for SqliteContextRepository {
    async fn insert_turn(&self, speaker_id: &str, content: &str) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO shared_context (user_id, content) VALUES (?, ?)")
            .bind(speaker_id)
            .bind(content)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn recent_turns(&self, limit: u32) -> Result<Vec<Turn>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, user_id, content FROM shared_context ORDER BY id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                Ok(Turn {
                    id: row.try_get("id").map_err(map_sqlx_error)?,
                    speaker_id: row.try_get("user_id").map_err(map_sqlx_error)?,
                    content: row.try_get("content").map_err(map_sqlx_error)?,
                })
            })
            .collect()
    }

    async fn retain_latest(&self, keep: u32) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"DELETE FROM shared_context
               WHERE id NOT IN (SELECT id FROM shared_context ORDER BY id DESC LIMIT ?)"#,
        )
        .bind(i64::from(keep))
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn count_turns(&self) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM shared_context")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        let n: i64 = row.try_get("n").map_err(map_sqlx_error)?;
        Ok(n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::{DatabasePool, database_url};
    use sprite_core::context::store::ContextStore;
    use sprite_types::turn::ContextLimits;
    use tempfile::TempDir;

    async fn test_repo() -> (SqliteContextRepository, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url(dir.path())).await.unwrap();
        (SqliteContextRepository::new(pool), dir)
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let (repo, _dir) = test_repo().await;
        let a = repo.insert_turn("1001", "one").await.unwrap();
        let b = repo.insert_turn("1002", "two").await.unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_recent_turns_newest_first_with_limit() {
        let (repo, _dir) = test_repo().await;
        for i in 0..5 {
            repo.insert_turn("1001", &format!("m{i}")).await.unwrap();
        }

        let turns = repo.recent_turns(3).await.unwrap();
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["m4", "m3", "m2"]);
        assert!(turns.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[tokio::test]
    async fn test_recent_turns_empty() {
        let (repo, _dir) = test_repo().await;
        assert!(repo.recent_turns(50).await.unwrap().is_empty());
        assert_eq!(repo.count_turns().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_retain_latest_keeps_largest_ids() {
        let (repo, _dir) = test_repo().await;
        for i in 0..60 {
            repo.insert_turn("1001", &format!("m{i}")).await.unwrap();
        }

        assert_eq!(repo.retain_latest(50).await.unwrap(), 10);
        assert_eq!(repo.count_turns().await.unwrap(), 50);

        let turns = repo.recent_turns(100).await.unwrap();
        assert_eq!(turns.last().unwrap().content, "m10");
        assert_eq!(repo.retain_latest(50).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_keep_increasing_after_eviction() {
        let (repo, _dir) = test_repo().await;
        let mut last = 0;
        for i in 0..5 {
            last = repo.insert_turn("1001", &format!("m{i}")).await.unwrap();
        }
        repo.retain_latest(0).await.unwrap();

        // AUTOINCREMENT never reuses ids, even after the table is emptied.
        let next = repo.insert_turn("1001", "fresh").await.unwrap();
        assert!(next > last);
    }

    #[tokio::test]
    async fn test_store_concatenation_and_capacity() {
        let (repo, _dir) = test_repo().await;
        let store = ContextStore::new(repo, ContextLimits::default());

        store.append_turn("1001", &format!("{}{}", "hi", "hello!")).await.unwrap();
        assert_eq!(store.read_context().await.unwrap(), "### 1001: hihello!");

        for i in 0..55 {
            store.append_turn("1002", &format!("m{i}")).await.unwrap();
        }
        store.flush().await;

        assert_eq!(store.turn_count().await.unwrap(), 50);
        let context = store.read_context().await.unwrap();
        assert_eq!(context.lines().count(), 50);
        assert!(!context.contains("hihello!"));
    }

    #[tokio::test]
    async fn test_unicode_content_roundtrip() {
        let (repo, _dir) = test_repo().await;
        repo.insert_turn("1001", "héllo ✨ wörld").await.unwrap();
        let turns = repo.recent_turns(1).await.unwrap();
        assert_eq!(turns[0].content, "héllo ✨ wörld");
        assert_eq!(turns[0].speaker_id, "1001");
    }
}
