use crate::item::ItemId;
use crate::tier::Refinement;
use crate::workspace::{Workspace, WorkspaceError};

/// 與項目操作相關的按鍵。 / Keys that act on the focused item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Plus,
    Minus,
    Backspace,
    Delete,
    Other,
}

impl Key {
    /// 由按鍵名稱轉換（如瀏覽器的 `key` 值）。 / Maps a key name such as `"+"` or `"Delete"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "+" => Key::Plus,
            "-" => Key::Minus,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            _ => Key::Other,
        }
    }
}

/// 按鍵處理後的結果。 / What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Refined(ItemId),
    Deleted(ItemId),
}

/// Tracks the item under the pointer, which stands in for keyboard focus.
#[derive(Debug, Clone, Default)]
pub struct HoverFocus {
    hovered: Option<ItemId>,
}

impl HoverFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ItemId> {
        self.hovered
    }

    pub fn enter(&mut self, item: ItemId) {
        self.hovered = Some(item);
    }

    /// Only clears focus when leaving the item that holds it.
    pub fn leave(&mut self, item: ItemId) {
        if self.hovered == Some(item) {
            self.hovered = None;
        }
    }

    pub fn reset(&mut self) {
        self.hovered = None;
    }

    /// `+`/`-` refine, Backspace clears the refinement, Delete removes the item.
    pub fn handle_key(
        &mut self,
        workspace: &mut Workspace,
        key: Key,
    ) -> Result<KeyOutcome, WorkspaceError> {
        let Some(item) = self.hovered else {
            return Ok(KeyOutcome::Ignored);
        };
        if !workspace.contains(item) {
            self.hovered = None;
            return Ok(KeyOutcome::Ignored);
        }
        let refinement = match key {
            Key::Plus => Some(Refinement::Plus),
            Key::Minus => Some(Refinement::Minus),
            Key::Backspace => None,
            Key::Delete => {
                workspace.delete_item(item)?;
                self.hovered = None;
                return Ok(KeyOutcome::Deleted(item));
            }
            Key::Other => return Ok(KeyOutcome::Ignored),
        };
        if workspace.set_sub_option(item, refinement)? {
            Ok(KeyOutcome::Refined(item))
        } else {
            Ok(KeyOutcome::Ignored)
        }
    }
}
