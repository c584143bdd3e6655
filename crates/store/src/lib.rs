//! File-backed blob store
//!
//! One file per key under a data directory: `checkpoint` lands in
//! `<dir>/checkpoint.json`, `highScore` in `<dir>/highScore.json`. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lexicon_core::{BlobStore, StoreError};

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "file store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value)?;
        if let Err(err) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        tracing::debug!(key, "stored");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicon_core::types::Stage;
    use lexicon_core::{Checkpoint, GameSession, Persistence};
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("save")).unwrap();
        (store, dir)
    }

    #[test]
    fn get_missing_returns_none() {
        let (store, _dir) = test_store();
        assert_eq!(store.get("checkpoint").unwrap(), None);
    }

    #[test]
    fn set_get_overwrite_remove() {
        let (mut store, _dir) = test_store();
        store.set("highScore", "300").unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("300"));
        store.set("highScore", "500").unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("500"));
        assert!(store.dir().join("highScore.json").exists());
        assert!(!store.dir().join(".highScore.tmp").exists());

        store.remove("highScore").unwrap();
        assert_eq!(store.get("highScore").unwrap(), None);
        // Removing an absent key is fine.
        store.remove("highScore").unwrap();
    }

    #[test]
    fn rejects_path_like_keys() {
        let (mut store, _dir) = test_store();
        for key in ["", "../escape", "a/b", "dot.key", "sp ace"] {
            assert!(matches!(store.get(key), Err(StoreError::InvalidKey(_))), "{key:?}");
            assert!(store.set(key, "x").is_err());
        }
    }

    #[test]
    fn session_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            let mut session = GameSession::new(Persistence::new(store));
            session.start_new_game();
            session.add_score(100);
            session.request_transition(Stage::Level2);
            session.complete_transition();
        }

        let store = FileStore::open(dir.path()).unwrap();
        let persistence = Persistence::new(store);
        assert_eq!(
            persistence.read_checkpoint(),
            Some(Checkpoint::new(Stage::Level2, 100, 3))
        );

        let mut session = GameSession::new(persistence);
        assert!(session.has_save());
        assert!(session.resume_game());
        assert_eq!(session.stage(), Stage::Level2);
    }

    #[test]
    fn corrupt_file_reads_as_absent_checkpoint() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("checkpoint.json"), "{not json").unwrap();
        let persistence = Persistence::new(FileStore::open(dir.path()).unwrap());
        assert_eq!(persistence.read_checkpoint(), None);
    }
}
