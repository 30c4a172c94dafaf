use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::PersistenceError;
use crate::snapshot::Snapshot;
use crate::util::{current_timestamp, write_atomic};

/// 已儲存清單的摘要。 / Listing entry for a saved tier list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedListEntry {
    pub name: String,
    pub timestamp: i64,
}

/// Full saved tier list as written to disk.
/// 寫入磁碟的完整清單文件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedList {
    pub name: String,
    pub snapshot: Snapshot,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    name: String,
    timestamp: i64,
    file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct IndexFile {
    #[serde(default)]
    entries: Vec<IndexEntry>,
}

/// Name-keyed directory of saved tier lists.
///
/// An index file keeps entries in first-insertion order; each list lives in its
/// own document named after the SHA-256 of its name, so the file name length is
/// fixed whatever the list is called. Saving under an
/// existing name replaces the document and refreshes the timestamp in place.
#[derive(Debug)]
pub struct SavedListStore {
    root: PathBuf,
    index_path: PathBuf,
}

impl SavedListStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let index_path = root.join("index.json");
        Self { root, index_path }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 列出所有已儲存清單（依首次儲存順序）。 / Lists saved lists in first-insertion order.
    pub fn list(&self) -> Result<Vec<SavedListEntry>, PersistenceError> {
        Ok(self
            .load_index()?
            .entries
            .into_iter()
            .map(|entry| SavedListEntry {
                name: entry.name,
                timestamp: entry.timestamp,
            })
            .collect())
    }

    pub fn len(&self) -> Result<usize, PersistenceError> {
        Ok(self.load_index()?.entries.len())
    }

    /// 儲存（或覆蓋）指定名稱的清單。 / Saves or overwrites the list called `name`.
    pub fn save(&self, name: &str, snapshot: &Snapshot) -> Result<SavedListEntry, PersistenceError> {
        let name = validate_name(name)?;
        let file = file_name_for(name);
        let path = self.root.join(&file);
        let document = SavedList {
            name: name.to_string(),
            snapshot: snapshot.clone(),
            timestamp: current_timestamp(),
        };
        let payload = serde_json::to_vec_pretty(&document).map_err(|source| {
            PersistenceError::Encode {
                path: path.clone(),
                source,
            }
        })?;

        let mut index = self.load_index()?;
        write_atomic(&path, &payload).map_err(|err| PersistenceError::storage(&path, err))?;
        match index.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.timestamp = document.timestamp;
                entry.file = file;
            }
            None => index.entries.push(IndexEntry {
                name: name.to_string(),
                timestamp: document.timestamp,
                file,
            }),
        }
        self.save_index(&index)?;
        Ok(SavedListEntry {
            name: document.name,
            timestamp: document.timestamp,
        })
    }

    /// 依名稱載入清單。 / Loads the list called `name`.
    pub fn load(&self, name: &str) -> Result<SavedList, PersistenceError> {
        let name = name.trim();
        let index = self.load_index()?;
        let entry = index
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| PersistenceError::NotFound(name.to_string()))?;
        let path = self.root.join(&entry.file);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| PersistenceError::malformed(&path, err)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(PersistenceError::NotFound(name.to_string()))
            }
            Err(err) => Err(PersistenceError::storage(&path, err)),
        }
    }

    /// 刪除指定名稱的清單。 / Deletes the list called `name`.
    pub fn delete(&self, name: &str) -> Result<(), PersistenceError> {
        let name = name.trim();
        let mut index = self.load_index()?;
        let position = index
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| PersistenceError::NotFound(name.to_string()))?;
        let entry = index.entries.remove(position);
        self.save_index(&index)?;
        let path = self.root.join(&entry.file);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PersistenceError::storage(&path, err)),
        }
    }

    fn load_index(&self) -> Result<IndexFile, PersistenceError> {
        match fs::read_to_string(&self.index_path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| PersistenceError::malformed(&self.index_path, err)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(IndexFile::default()),
            Err(err) => Err(PersistenceError::storage(&self.index_path, err)),
        }
    }

    fn save_index(&self, index: &IndexFile) -> Result<(), PersistenceError> {
        let payload = serde_json::to_vec_pretty(index).map_err(|source| {
            PersistenceError::Encode {
                path: self.index_path.clone(),
                source,
            }
        })?;
        write_atomic(&self.index_path, &payload)
            .map_err(|err| PersistenceError::storage(&self.index_path, err))
    }
}

fn validate_name(name: &str) -> Result<&str, PersistenceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(PersistenceError::MissingName)
    } else {
        Ok(trimmed)
    }
}

fn file_name_for(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    let mut out = String::with_capacity(5 + 64 + 5);
    out.push_str("list_");
    for byte in digest {
        let _ = write!(&mut out, "{byte:02x}");
    }
    out.push_str(".json");
    out
}
