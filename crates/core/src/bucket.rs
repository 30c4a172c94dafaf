use std::collections::HashSet;

use crate::item::ItemId;
use crate::tier::BucketId;

/// 有序成員容器，成員查詢為 O(1)。 / Ordered membership list with O(1) membership tests.
#[derive(Debug, Clone)]
pub struct Bucket {
    id: BucketId,
    order: Vec<ItemId>,
    members: HashSet<ItemId>,
}

impl Bucket {
    pub fn new(id: BucketId) -> Self {
        Self {
            id,
            order: Vec::new(),
            members: HashSet::new(),
        }
    }

    pub fn id(&self) -> BucketId {
        self.id
    }

    /// 加到尾端；若已存在則回傳 `false`。 / Appends at the end, returning false if already present.
    pub fn append(&mut self, item: ItemId) -> bool {
        if !self.members.insert(item) {
            return false;
        }
        self.order.push(item);
        true
    }

    /// 移除成員並保留其餘順序。 / Removes a member, keeping the relative order of the rest.
    pub fn remove(&mut self, item: ItemId) -> bool {
        if !self.members.remove(&item) {
            return false;
        }
        self.order.retain(|existing| *existing != item);
        true
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.members.contains(&item)
    }

    pub fn items_in_order(&self) -> &[ItemId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

/// 固定的十個容器，依顯示順序。 / The ten fixed buckets in display order.
#[derive(Debug, Clone)]
pub struct BucketSet {
    buckets: Vec<Bucket>,
}

impl Default for BucketSet {
    fn default() -> Self {
        Self {
            buckets: BucketId::all().map(Bucket::new).collect(),
        }
    }
}

impl BucketSet {
    pub fn get(&self, id: BucketId) -> &Bucket {
        &self.buckets[id.index()]
    }

    pub fn get_mut(&mut self, id: BucketId) -> &mut Bucket {
        &mut self.buckets[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }
}
