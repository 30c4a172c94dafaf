use std::collections::HashMap;

use crate::item::{ImageRef, Item, ItemId};

/// 持有所有項目及其內容，不涉及層級。 / Owns every item and its content; knows nothing about tiers.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: HashMap<ItemId, Item>,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh id. Ids are never reused, even after `clear`.
    pub fn insert(&mut self, image: ImageRef, display_name: impl Into<String>) -> ItemId {
        self.next_id += 1;
        let id = ItemId::from_raw(self.next_id);
        self.items.insert(id, Item::new(id, image, display_name.into()));
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
