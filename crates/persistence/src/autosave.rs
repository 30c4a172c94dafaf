use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::snapshot::Snapshot;
use crate::util::{current_timestamp, write_atomic};

/// Document stored in the rolling auto-save slot.
/// 自動儲存槽中的文件內容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSaveDocument {
    pub snapshot: Snapshot,
    pub timestamp: i64,
}

/// Single rolling slot, overwritten on every flush.
/// 單一的自動儲存槽，每次寫入皆覆蓋。
#[derive(Debug)]
pub struct AutoSaveStore {
    path: PathBuf,
}

impl AutoSaveStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the slot with `{snapshot, now}` using an atomic write.
    /// 以原子寫入覆蓋自動儲存槽。
    pub fn flush(&self, snapshot: &Snapshot) -> Result<AutoSaveDocument, PersistenceError> {
        let document = AutoSaveDocument {
            snapshot: snapshot.clone(),
            timestamp: current_timestamp(),
        };
        let payload = serde_json::to_vec_pretty(&document).map_err(|source| {
            PersistenceError::Encode {
                path: self.path.clone(),
                source,
            }
        })?;
        write_atomic(&self.path, &payload)
            .map_err(|err| PersistenceError::storage(&self.path, err))?;
        Ok(document)
    }

    /// Reads the slot, returning `Ok(None)` when nothing has been flushed yet.
    /// 讀取自動儲存槽；若不存在則回傳 `Ok(None)`。
    pub fn load(&self) -> Result<Option<AutoSaveDocument>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(|err| PersistenceError::malformed(&self.path, err)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistenceError::storage(&self.path, err)),
        }
    }

    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PersistenceError::storage(&self.path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind as PersistenceErrorKind;
    use tempfile::tempdir;

    #[test]
    fn flush_overwrites_and_load_reads_back() {
        let dir = tempdir().unwrap();
        let store = AutoSaveStore::new(dir.path().join("autosave.json"));
        assert!(store.load().unwrap().is_none());

        store.flush(&Snapshot::default()).unwrap();
        let written = store.flush(&Snapshot::empty()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, written);
        assert_eq!(loaded.snapshot, Snapshot::empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = AutoSaveStore::new(dir.path().join("autosave.json"));
        store.flush(&Snapshot::empty()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn garbage_is_reported_as_validation_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("autosave.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AutoSaveStore::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), PersistenceErrorKind::Validation);
    }

    #[test]
    fn unwritable_location_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").unwrap();
        let store = AutoSaveStore::new(blocker.join("autosave.json"));
        let err = store.flush(&Snapshot::empty()).unwrap_err();
        assert_eq!(err.kind(), PersistenceErrorKind::Storage);
    }
}
