//! In-process context repository.
//!
//! Used by unit tests and by embedders that don't need persistence.
//! Nothing survives the process.

use std::sync::Mutex;

use sprite_types::error::StoreError;
use sprite_types::turn::Turn;

use super::repository::ContextRepository;

/// `ContextRepository` over a `Vec<Turn>` kept in ascending id order.
#[derive(Debug, Default)]
pub struct MemoryContextRepository {
    inner: Mutex<MemoryLog>,
}

#[derive(Debug, Default)]
struct MemoryLog {
    next_id: i64,
    turns: Vec<Turn>,
}

impl MemoryContextRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryLog>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Connection("memory log poisoned".to_string()))
    }
}

impl ContextRepository for MemoryContextRepository {
    async fn insert_turn(&self, speaker_id: &str, content: &str) -> Result<i64, StoreError> {
        let mut log = self.lock()?;
        log.next_id += 1;
        let id = log.next_id;
        log.turns.push(Turn {
            id,
            speaker_id: speaker_id.to_string(),
            content: content.to_string(),
        });
        Ok(id)
    }

    async fn recent_turns(&self, limit: u32) -> Result<Vec<Turn>, StoreError> {
        let log = self.lock()?;
        Ok(log
            .turns
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn retain_latest(&self, keep: u32) -> Result<u64, StoreError> {
        let mut log = self.lock()?;
        let excess = log.turns.len().saturating_sub(keep as usize);
        log.turns.drain(..excess);
        Ok(excess as u64)
    }

    async fn count_turns(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.turns.len() as u64)
    }
}
