//! Snapshot codec and durable storage for tier lists.
//! 排名清單的快照編解碼與持久化儲存。

mod px;
mod util;

pub mod autosave;
pub mod codec;
pub mod error;
pub mod library;
pub mod service;
pub mod snapshot;

pub use autosave::{AutoSaveDocument, AutoSaveStore};
pub use codec::{export, import, rehydrate, DecodeError};
pub use error::{ErrorKind, PersistenceError};
pub use library::{SavedList, SavedListEntry, SavedListStore};
pub use px::PixelLength;
pub use service::{Persistence, StorageLayout, DEFAULT_AUTOSAVE_FILE, DEFAULT_LIBRARY_DIR};
pub use snapshot::{ItemRecord, Snapshot, TierKey};
pub use util::write_atomic;
