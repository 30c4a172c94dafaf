use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tierlist_core::{
    pasted_image_name, BucketId, ChangeTracker, HoverFocus, ImageRef, ItemId, ItemSize, Key,
    KeyOutcome, Pointer, ResizeGesture, Workspace, WorkspaceError,
};
use tierlist_persistence::{
    codec, Persistence, PersistenceError, SavedListEntry, Snapshot,
};

use crate::config::EngineConfig;
use crate::event::Event;

/// 引擎操作錯誤。 / Errors surfaced to the caller of an engine operation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// 自動儲存的結果。 / Result of an auto-save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveOutcome {
    /// Nothing to do: clean, not due, or auto-save disabled.
    Idle,
    Saved,
    /// The store failed; the workspace stays dirty and the next tick retries.
    Deferred,
}

/// A live tier list session: the workspace, its durable storage and the
/// transient gesture state, driven one event at a time.
///
/// Construct with [`Engine::init`] and finish with [`Engine::dispose`]; there is
/// no global instance.
#[derive(Debug)]
pub struct Engine {
    workspace: Workspace,
    persistence: Persistence,
    focus: HoverFocus,
    resize: ResizeGesture,
    autosave_enabled: bool,
}

impl Engine {
    /// Opens storage and restores the auto-save slot when one exists.
    ///
    /// A missing, unreadable or malformed slot is logged and the session starts
    /// empty.
    pub fn init(config: EngineConfig, now: Instant) -> Self {
        let persistence = Persistence::new(config.layout);
        let mut workspace = Workspace::with_tracker(ChangeTracker::new(config.autosave_interval));

        match persistence.load_autosave() {
            Ok(Some(snapshot)) => {
                codec::import(&mut workspace, &snapshot);
                log::info!("restored {} items from auto-save", workspace.len());
            }
            Ok(None) => {}
            Err(err) => log::warn!("could not read auto-save: {err}"),
        }
        match persistence.count_named() {
            Ok(count) => log::info!("{count} saved tier lists found"),
            Err(err) => log::warn!("could not read saved tier lists: {err}"),
        }

        let tracker = workspace.tracker_mut();
        tracker.mark_clean();
        tracker.start(now);

        Self {
            workspace,
            persistence,
            focus: HoverFocus::new(),
            resize: ResizeGesture::new(),
            autosave_enabled: config.autosave_enabled,
        }
    }

    /// 以資料根目錄啟動，讀取其中的偏好設定。 /
    /// Starts a session under `root`, honouring `<root>/preferences.json`.
    pub fn open(root: impl AsRef<Path>, now: Instant) -> Self {
        Self::init(EngineConfig::load(root), now)
    }

    /// Termination hook: flushes a dirty workspace, then drops the session.
    pub fn dispose(mut self) -> AutoSaveOutcome {
        self.resize.cancel();
        self.flush_autosave()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    pub fn hovered(&self) -> Option<ItemId> {
        self.focus.current()
    }

    pub fn snapshot(&self) -> Snapshot {
        codec::export(&self.workspace)
    }

    /// Handles one external event; events are applied strictly in order.
    pub fn dispatch(&mut self, event: Event, now: Instant) -> Result<(), EngineError> {
        match event {
            Event::Upload {
                file_name,
                mime,
                bytes,
            } => {
                self.upload(&file_name, &mime, &bytes);
            }
            Event::Paste {
                mime,
                bytes,
                timestamp_ms,
            } => {
                self.paste(&mime, &bytes, timestamp_ms);
            }
            Event::Drop { item, target } => {
                self.move_item(item, target)?;
            }
            Event::HoverEnter(item) => self.focus.enter(item),
            Event::HoverLeave(item) => self.focus.leave(item),
            Event::Key(key) => {
                self.key(key)?;
            }
            Event::ResizeStart { item, pointer } => self.begin_resize(item, pointer)?,
            Event::PointerMove(pointer) => {
                self.pointer_moved(pointer);
            }
            Event::PointerUp => {
                self.pointer_released();
            }
            Event::PointerLeftWindow => {
                self.pointer_left_window();
            }
            Event::Tick => {
                self.tick(now);
            }
        }
        Ok(())
    }

    /// 上傳檔案；非圖片類型會被略過。 / Adds an uploaded file; non-image payloads are skipped.
    pub fn upload(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Option<ItemId> {
        match ImageRef::from_payload(mime, bytes) {
            Some(image) => Some(self.workspace.create_item(image, file_name)),
            None => {
                log::debug!("skipping upload {file_name:?} with type {mime:?}");
                None
            }
        }
    }

    /// 貼上剪貼簿圖片。 / Adds a pasted clipboard image named after `timestamp_ms`.
    pub fn paste(&mut self, mime: &str, bytes: &[u8], timestamp_ms: u128) -> Option<ItemId> {
        let image = ImageRef::from_payload(mime, bytes)?;
        Some(
            self.workspace
                .create_item(image, pasted_image_name(timestamp_ms)),
        )
    }

    pub fn add_image(&mut self, image: ImageRef, display_name: &str) -> ItemId {
        self.workspace.create_item(image, display_name)
    }

    pub fn move_item(&mut self, item: ItemId, target: BucketId) -> Result<bool, EngineError> {
        Ok(self.workspace.move_item(item, target)?)
    }

    pub fn hover_enter(&mut self, item: ItemId) {
        self.focus.enter(item);
    }

    pub fn hover_leave(&mut self, item: ItemId) {
        self.focus.leave(item);
    }

    pub fn key(&mut self, key: Key) -> Result<KeyOutcome, EngineError> {
        let outcome = self.focus.handle_key(&mut self.workspace, key)?;
        if let KeyOutcome::Deleted(item) = outcome {
            if self.resize.current_item() == Some(item) {
                self.resize.cancel();
            }
        }
        Ok(outcome)
    }

    pub fn begin_resize(&mut self, item: ItemId, pointer: Pointer) -> Result<(), EngineError> {
        Ok(self.resize.begin(&self.workspace, item, pointer)?)
    }

    pub fn pointer_moved(&mut self, pointer: Pointer) -> Option<ItemSize> {
        self.resize.update(&mut self.workspace, pointer)
    }

    pub fn pointer_released(&mut self) -> Option<ItemId> {
        self.resize.end()
    }

    pub fn pointer_left_window(&mut self) -> Option<ItemId> {
        self.resize.cancel()
    }

    /// Timer tick: flushes the auto-save slot when the interval elapsed and the
    /// workspace is dirty.
    pub fn tick(&mut self, now: Instant) -> AutoSaveOutcome {
        if !self.autosave_enabled || !self.workspace.tracker_mut().poll(now) {
            return AutoSaveOutcome::Idle;
        }
        self.flush_autosave()
    }

    /// 立即寫入自動儲存（若有變更）。 / Flushes right away if there are unsaved changes.
    pub fn flush_autosave(&mut self) -> AutoSaveOutcome {
        if !self.autosave_enabled || !self.workspace.tracker().is_dirty() {
            return AutoSaveOutcome::Idle;
        }
        let snapshot = codec::export(&self.workspace);
        match self.persistence.flush_autosave(&snapshot) {
            Ok(()) => {
                log::debug!(
                    "auto-saved {} items after {} changes",
                    snapshot.item_count(),
                    self.workspace.tracker().pending_changes()
                );
                self.workspace.tracker_mut().mark_clean();
                AutoSaveOutcome::Saved
            }
            Err(err) => {
                log::warn!("auto-save failed, retrying on the next tick: {err}");
                AutoSaveOutcome::Deferred
            }
        }
    }

    pub fn save_named(&self, name: &str) -> Result<(), PersistenceError> {
        self.persistence.save_named(name, &self.snapshot())
    }

    pub fn list_named(&self) -> Result<Vec<SavedListEntry>, PersistenceError> {
        self.persistence.list_named()
    }

    /// Replaces the workspace with a saved list and auto-saves the result.
    ///
    /// On any failure the current workspace is left as it was.
    pub fn load_named(&mut self, name: &str) -> Result<(), PersistenceError> {
        let snapshot = self.persistence.load_named(name)?;
        codec::import(&mut self.workspace, &snapshot);
        self.focus.reset();
        self.resize.cancel();
        log::info!("loaded tier list {:?}", name.trim());
        self.flush_autosave();
        Ok(())
    }

    pub fn delete_named(&self, name: &str) -> Result<(), PersistenceError> {
        self.persistence.delete_named(name)
    }

    /// Empties the workspace and the auto-save slot.
    pub fn clear_all(&mut self) {
        self.workspace.clear();
        self.focus.reset();
        self.resize.cancel();
        match self.persistence.clear_autosave() {
            Ok(()) => self.workspace.tracker_mut().mark_clean(),
            Err(err) => log::warn!("could not clear auto-save: {err}"),
        }
    }
}
