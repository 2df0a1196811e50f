//! ContextStore -- retention policy and read contract for the shared log.
//!
//! Every append schedules an eviction pass on a tracked background task so
//! the caller never waits on it; the store converges back to `max_turns`
//! rows once the pass finishes. Reads render the newest `max_turns` turns and
//! trim the result to `max_chars`.

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use sprite_types::error::StoreError;
use sprite_types::turn::{ContextLimits, Turn};

use super::repository::ContextRepository;
use super::window::render_window;

/// Fixed-capacity, append-only log of conversation turns shared across all
/// users.
pub struct ContextStore<R: ContextRepository> {
    repo: Arc<R>,
    limits: ContextLimits,
    evictions: TaskTracker,
}

impl<R: ContextRepository + 'static> ContextStore<R> {
    /// Create a store over `repo` enforcing `limits`.
    pub fn new(repo: R, limits: ContextLimits) -> Self {
        Self {
            repo: Arc::new(repo),
            limits,
            evictions: TaskTracker::new(),
        }
    }

    pub fn limits(&self) -> ContextLimits {
        self.limits
    }

    /// Append a turn, then schedule an eviction pass.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn append_turn(&self, speaker_id: &str, content: &str) -> Result<(), StoreError> {
        let id = self.repo.insert_turn(speaker_id, content).await?;
        debug!(turn_id = id, speaker_id, chars = content.chars().count(), "turn appended");

        self.schedule_eviction();
        Ok(())
    }

    /// Render the current context window.
    ///
    /// Lines are newest first; the block is trimmed from the front to the
    /// character budget. Returns an empty string when no turns exist.
    pub async fn read_context(&self) -> Result<String, StoreError> {
        let turns = self.recent_turns().await?;
        Ok(render_window(&turns, self.limits.max_chars))
    }

    /// The newest `max_turns` turns, newest first.
    pub async fn recent_turns(&self) -> Result<Vec<Turn>, StoreError> {
        self.repo.recent_turns(self.limits.max_turns).await
    }

    /// Number of turns currently stored (may briefly exceed `max_turns`
    /// while evictions are pending).
    pub async fn turn_count(&self) -> Result<u64, StoreError> {
        self.repo.count_turns().await
    }

    /// Run the eviction policy inline. Returns the number of evicted turns.
    pub async fn evict(&self) -> Result<u64, StoreError> {
        self.repo.retain_latest(self.limits.max_turns).await
    }

    /// Wait for every scheduled eviction pass to finish.
    pub async fn flush(&self) {
        self.evictions.close();
        self.evictions.wait().await;
        self.evictions.reopen();
    }

    fn schedule_eviction(&self) {
        let repo = Arc::clone(&self.repo);
        let keep = self.limits.max_turns;

        self.evictions.spawn(async move {
            match repo.retain_latest(keep).await {
                Ok(0) => {}
                Ok(evicted) => debug!(evicted, keep, "evicted old context turns"),
                Err(e) => warn!(error = %e, "failed to evict old context turns"),
            }
        });
    }
}
