//! Persistence adapter - checkpoint and high score over a key-value blob store
//!
//! Stored layout:
//! - `checkpoint` → `{"state":"LEVEL_3_PLANE","score":350,"lives":2}`
//! - `highScore` → `"500"`
//!
//! Reads never fail the caller. A missing key, a store error or malformed data all
//! read back as "no checkpoint" / a zero high score (malformed data is logged).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Stage, CHECKPOINT_KEY, HIGH_SCORE_KEY, MAX_LIVES};

/// Errors reported by a blob store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// External key-value blob store
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory blob store.
///
/// Clones share the same map, so a test can keep a handle while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Snapshot written when a level becomes current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub stage: Stage,
    pub score: u32,
    pub lives: u8,
}

#[derive(Serialize, Deserialize)]
struct CheckpointRecord<'a> {
    state: &'a str,
    score: u32,
    lives: u8,
}

impl Checkpoint {
    pub fn new(stage: Stage, score: u32, lives: u8) -> Self {
        Self {
            stage,
            score,
            lives,
        }
    }

    pub fn to_json(&self) -> String {
        let record = CheckpointRecord {
            state: self.stage.as_str(),
            score: self.score,
            lives: self.lives,
        };
        // A flat record of a str and two integers always serializes.
        serde_json::to_string(&record).unwrap_or_default()
    }

    /// Parse a stored checkpoint; anything that is not a resumable level snapshot is `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        let record: CheckpointRecord<'_> = serde_json::from_str(raw).ok()?;
        let stage = Stage::from_str(record.state).filter(Stage::is_level)?;
        if record.lives == 0 || record.lives > MAX_LIVES {
            return None;
        }
        Some(Self::new(stage, record.score, record.lives))
    }
}

/// Checkpoint and high score adapter over a [`BlobStore`]
pub struct Persistence {
    store: Box<dyn BlobStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(store: impl BlobStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Adapter over a fresh [`MemoryStore`] (nothing survives the process).
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn read_checkpoint(&self) -> Option<Checkpoint> {
        let raw = match self.store.get(CHECKPOINT_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(%err, "checkpoint read failed; treating as absent");
                return None;
            }
        };
        let checkpoint = Checkpoint::from_json(&raw);
        if checkpoint.is_none() {
            tracing::warn!(raw = %raw, "malformed checkpoint ignored");
        }
        checkpoint
    }

    pub fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<(), StoreError> {
        self.store.set(CHECKPOINT_KEY, &checkpoint.to_json())
    }

    pub fn clear_checkpoint(&mut self) -> Result<(), StoreError> {
        self.store.remove(CHECKPOINT_KEY)
    }

    pub fn read_high_score(&self) -> u32 {
        let raw = match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0,
            Err(err) => {
                tracing::warn!(%err, "high score read failed; using 0");
                return 0;
            }
        };
        match raw.trim().parse::<u32>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(raw = %raw, "malformed high score ignored");
                0
            }
        }
    }

    pub fn write_high_score(&mut self, value: u32) -> Result<(), StoreError> {
        self.store.set(HIGH_SCORE_KEY, &value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl BlobStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
    }

    #[test]
    fn test_checkpoint_json_layout() {
        let json = Checkpoint::new(Stage::Level3, 350, 2).to_json();
        assert_eq!(json, r#"{"state":"LEVEL_3_PLANE","score":350,"lives":2}"#);
    }

    #[test]
    fn test_checkpoint_write_then_read() {
        let store = MemoryStore::new();
        let mut persistence = Persistence::new(store.clone());
        assert_eq!(persistence.read_checkpoint(), None);

        let checkpoint = Checkpoint::new(Stage::Level2, 100, 3);
        persistence.write_checkpoint(&checkpoint).unwrap();
        assert_eq!(persistence.read_checkpoint(), Some(checkpoint));
        assert!(store.get(CHECKPOINT_KEY).unwrap().is_some());

        persistence.clear_checkpoint().unwrap();
        assert_eq!(persistence.read_checkpoint(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_checkpoints_read_as_absent() {
        let cases = [
            "not json",
            "{}",
            r#"{"state":"LEVEL_9","score":1,"lives":1}"#,
            r#"{"state":"VICTORY","score":1,"lives":1}"#,
            r#"{"state":"LEVEL_1_AUCTION","score":-5,"lives":1}"#,
            r#"{"state":"LEVEL_1_AUCTION","score":10,"lives":0}"#,
            r#"{"state":"LEVEL_1_AUCTION","score":10,"lives":7}"#,
            r#"{"state":"LEVEL_1_AUCTION","score":"ten","lives":2}"#,
        ];
        for raw in cases {
            let mut store = MemoryStore::new();
            store.set(CHECKPOINT_KEY, raw).unwrap();
            let persistence = Persistence::new(store);
            assert_eq!(persistence.read_checkpoint(), None, "accepted {raw}");
        }
    }

    #[test]
    fn test_high_score_defaults_and_parsing() {
        let mut store = MemoryStore::new();
        let mut persistence = Persistence::new(store.clone());
        assert_eq!(persistence.read_high_score(), 0);

        persistence.write_high_score(500).unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("500"));
        assert_eq!(persistence.read_high_score(), 500);

        store.set(HIGH_SCORE_KEY, " 42 ").unwrap();
        assert_eq!(persistence.read_high_score(), 42);

        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        assert_eq!(persistence.read_high_score(), 0);
    }

    #[test]
    fn test_store_failures_degrade_to_defaults() {
        let mut persistence = Persistence::new(BrokenStore);
        assert_eq!(persistence.read_checkpoint(), None);
        assert_eq!(persistence.read_high_score(), 0);
        assert!(persistence.write_high_score(1).is_err());
        assert!(persistence
            .write_checkpoint(&Checkpoint::new(Stage::Level1, 0, 3))
            .is_err());
    }
}
