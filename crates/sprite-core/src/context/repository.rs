//! Context repository trait definition.
//!
//! Defines the storage interface for the shared turn log. The infrastructure
//! layer (sprite-infra) implements this trait with SQLite persistence.

use sprite_types::error::StoreError;
use sprite_types::turn::Turn;

/// Repository trait for the shared turn log.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ContextRepository: Send + Sync {
    /// Insert a turn and return the id the store assigned to it.
    ///
    /// Ids are strictly increasing across calls.
    fn insert_turn(
        &self,
        speaker_id: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<i64, StoreError>> + Send;

    /// Get at most `limit` turns, ordered by id DESC (newest first).
    fn recent_turns(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, StoreError>> + Send;

    /// Delete every turn whose id is not among the `keep` largest ids.
    /// Returns the number of deleted turns.
    fn retain_latest(
        &self,
        keep: u32,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;

    /// Total number of stored turns.
    fn count_turns(&self) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;
}
