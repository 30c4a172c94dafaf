use std::path::{Path, PathBuf};

use crate::autosave::AutoSaveStore;
use crate::error::PersistenceError;
use crate::library::{SavedListEntry, SavedListStore};
use crate::snapshot::Snapshot;

pub const DEFAULT_AUTOSAVE_FILE: &str = "autosave.json";
pub const DEFAULT_LIBRARY_DIR: &str = "saved";

/// 儲存位置設定。 / Where the durable stores live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub autosave_path: PathBuf,
    pub library_dir: PathBuf,
}

impl StorageLayout {
    /// `<root>/autosave.json` and `<root>/saved/`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            autosave_path: root.join(DEFAULT_AUTOSAVE_FILE),
            library_dir: root.join(DEFAULT_LIBRARY_DIR),
        }
    }
}

/// Durable storage for the auto-save slot and the named-slot library.
///
/// Every call hits the file system; nothing is cached between calls, so a
/// fresh `Persistence` over the same layout sees everything written before.
#[derive(Debug)]
pub struct Persistence {
    autosave: AutoSaveStore,
    library: SavedListStore,
}

impl Persistence {
    pub fn new(layout: StorageLayout) -> Self {
        Self {
            autosave: AutoSaveStore::new(layout.autosave_path),
            library: SavedListStore::new(layout.library_dir),
        }
    }

    pub fn autosave(&self) -> &AutoSaveStore {
        &self.autosave
    }

    pub fn library(&self) -> &SavedListStore {
        &self.library
    }

    pub fn flush_autosave(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        self.autosave.flush(snapshot)?;
        Ok(())
    }

    pub fn load_autosave(&self) -> Result<Option<Snapshot>, PersistenceError> {
        Ok(self.autosave.load()?.map(|document| document.snapshot))
    }

    pub fn clear_autosave(&self) -> Result<(), PersistenceError> {
        self.autosave.clear()
    }

    pub fn save_named(&self, name: &str, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let entry = self.library.save(name, snapshot)?;
        log::info!("saved tier list {:?}", entry.name);
        Ok(())
    }

    pub fn list_named(&self) -> Result<Vec<SavedListEntry>, PersistenceError> {
        self.library.list()
    }

    pub fn count_named(&self) -> Result<usize, PersistenceError> {
        self.library.len()
    }

    pub fn load_named(&self, name: &str) -> Result<Snapshot, PersistenceError> {
        Ok(self.library.load(name)?.snapshot)
    }

    pub fn delete_named(&self, name: &str) -> Result<(), PersistenceError> {
        self.library.delete(name)?;
        log::info!("deleted tier list {:?}", name.trim());
        Ok(())
    }
}
