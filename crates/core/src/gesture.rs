use crate::item::{ItemId, ItemSize};
use crate::workspace::{Workspace, WorkspaceError};

/// 指標座標（像素）。 / Pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pointer {
    pub x: i64,
    pub y: i64,
}

impl Pointer {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveResize {
    item: ItemId,
    origin: Pointer,
    start: ItemSize,
}

/// Transient resize state owned by the gesture handler.
///
/// Never persisted. `end` and `cancel` always leave the gesture idle, so a
/// missed item-level release cannot strand it; bind both to window-level events.
#[derive(Debug, Clone, Default)]
pub struct ResizeGesture {
    active: Option<ActiveResize>,
}

impl ResizeGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resizing(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_item(&self) -> Option<ItemId> {
        self.active.map(|active| active.item)
    }

    /// 開始調整；已存在的手勢會被取代。 / Starts resizing, replacing any stale gesture.
    pub fn begin(
        &mut self,
        workspace: &Workspace,
        item: ItemId,
        origin: Pointer,
    ) -> Result<(), WorkspaceError> {
        let start = workspace
            .item(item)
            .ok_or(WorkspaceError::UnknownItem(item))?
            .size();
        self.active = Some(ActiveResize {
            item,
            origin,
            start,
        });
        Ok(())
    }

    /// Applies the pointer delta to the starting size. Returns the new size, or
    /// `None` when idle or when the item disappeared mid-gesture.
    pub fn update(&mut self, workspace: &mut Workspace, pointer: Pointer) -> Option<ItemSize> {
        let active = self.active?;
        let dx = pointer.x.saturating_sub(active.origin.x);
        let dy = pointer.y.saturating_sub(active.origin.y);
        let width = i64::from(active.start.width).saturating_add(dx);
        let height = i64::from(active.start.height).saturating_add(dy);
        match workspace.resize_item(active.item, width, height) {
            Ok(size) => Some(size),
            Err(_) => {
                self.active = None;
                None
            }
        }
    }

    /// Button release. Returns the item that was being resized.
    pub fn end(&mut self) -> Option<ItemId> {
        self.active.take().map(|active| active.item)
    }

    /// Forced end, e.g. the pointer left the window.
    pub fn cancel(&mut self) -> Option<ItemId> {
        self.end()
    }
}
