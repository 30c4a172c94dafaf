use thiserror::Error;

use crate::bucket::{Bucket, BucketSet};
use crate::item::{ImageRef, Item, ItemId, ItemSize};
use crate::store::ItemStore;
use crate::tier::{BucketId, Refinement, SubOption};
use crate::tracker::{Change, ChangeTracker};

/// 工作區操作錯誤。 / Errors raised by workspace operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("no item with id {0}")]
    UnknownItem(ItemId),
}

/// 不變條件檢查失敗時的描述。 / Describes a broken workspace invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{item} is stored but belongs to {count} buckets")]
    Membership { item: ItemId, count: usize },
    #[error("bucket {bucket} references missing {item}")]
    Dangling { bucket: BucketId, item: ItemId },
    #[error("{item} sits in {bucket} but is labelled {tier}")]
    TierMismatch {
        item: ItemId,
        bucket: BucketId,
        tier: BucketId,
    },
    #[error("{item} carries sub-option {label} outside its tier")]
    SubOption { item: ItemId, label: String },
}

/// Items plus the ten buckets, kept consistent.
///
/// Every item is in exactly one bucket, `item.tier()` names that bucket, and an
/// unranked item never carries a sub-option. Each effective mutation is reported
/// to the owned [`ChangeTracker`].
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    store: ItemStore,
    buckets: BucketSet,
    tracker: ChangeTracker,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracker(tracker: ChangeTracker) -> Self {
        Self {
            store: ItemStore::new(),
            buckets: BucketSet::default(),
            tracker,
        }
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.tracker
    }

    /// 新增項目至未排名區。 / Appends a new unranked item with the default size.
    pub fn create_item(&mut self, image: ImageRef, display_name: impl Into<String>) -> ItemId {
        let id = self.store.insert(image, display_name);
        self.buckets.get_mut(BucketId::Unranked).append(id);
        self.tracker.record(Change::Created);
        id
    }

    /// Inserts an item straight into `bucket` with a recorded size and sub-option.
    ///
    /// Used when rebuilding a workspace from stored data. The size goes through the
    /// clamp-then-square policy and a sub-option that does not belong to `bucket`
    /// is dropped.
    pub fn restore_item(
        &mut self,
        bucket: BucketId,
        image: ImageRef,
        display_name: impl Into<String>,
        size: ItemSize,
        sub_option: Option<SubOption>,
    ) -> ItemId {
        let id = self.store.insert(image, display_name);
        self.buckets.get_mut(bucket).append(id);
        if let Some(item) = self.store.get_mut(id) {
            item.size = ItemSize::clamped_square(size.width.into(), size.height.into());
            item.tier = bucket;
            item.sub_option = sub_option.filter(|sub| {
                bucket.tier() == Some(sub.tier) && sub.refinement != Refinement::Bare
            });
        }
        self.tracker.record(Change::Created);
        id
    }

    /// Moves an item to the end of `target`.
    ///
    /// Returns `Ok(false)` without touching anything when the item already sits
    /// in `target`. Entering the unranked bucket clears the sub-option; entering a
    /// ranked bucket resets it so the label shows the bare tier.
    pub fn move_item(&mut self, id: ItemId, target: BucketId) -> Result<bool, WorkspaceError> {
        let current = self.require(id)?.tier;
        if current == target {
            return Ok(false);
        }
        self.buckets.get_mut(current).remove(id);
        self.buckets.get_mut(target).append(id);
        if let Some(item) = self.store.get_mut(id) {
            item.tier = target;
            item.sub_option = None;
        }
        self.tracker.record(Change::Moved);
        Ok(true)
    }

    /// 設定細分（`None` 或 `Bare` 為清除）；未排名項目會被忽略。 /
    /// Sets or clears (`None` or `Bare`) the refinement; silently ignored for unranked items.
    pub fn set_sub_option(
        &mut self,
        id: ItemId,
        refinement: Option<Refinement>,
    ) -> Result<bool, WorkspaceError> {
        let item = self.require_mut(id)?;
        let Some(tier) = item.tier.tier() else {
            return Ok(false);
        };
        // A bare refinement shows the same label as no refinement at all.
        let next = refinement
            .filter(|refinement| *refinement != Refinement::Bare)
            .map(|refinement| SubOption::new(tier, refinement));
        if item.sub_option == next {
            return Ok(false);
        }
        item.sub_option = next;
        self.tracker.record(Change::Refined);
        Ok(true)
    }

    /// 調整尺寸：先各自夾限再取較小邊為正方形。 / Clamp each edge, then square to the smaller one.
    pub fn resize_item(
        &mut self,
        id: ItemId,
        width: i64,
        height: i64,
    ) -> Result<ItemSize, WorkspaceError> {
        let size = ItemSize::clamped_square(width, height);
        let item = self.require_mut(id)?;
        if item.size != size {
            item.size = size;
            self.tracker.record(Change::Resized);
        }
        Ok(size)
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<Item, WorkspaceError> {
        let bucket = self.require(id)?.tier;
        self.buckets.get_mut(bucket).remove(id);
        let item = self.store.remove(id).ok_or(WorkspaceError::UnknownItem(id))?;
        self.tracker.record(Change::Deleted);
        Ok(item)
    }

    /// 清空所有容器與項目，無法復原。 / Empties every bucket and the item store.
    pub fn clear(&mut self) {
        self.store.clear();
        self.buckets.clear();
        self.tracker.record(Change::Cleared);
    }

    /// Swaps in the items and buckets of `other`, keeping this workspace's tracker.
    pub fn replace_contents(&mut self, other: Workspace) {
        self.store = other.store;
        self.buckets = other.buckets;
        self.tracker.record(Change::Replaced);
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.store.contains(id)
    }

    pub fn bucket(&self, id: BucketId) -> &Bucket {
        self.buckets.get(id)
    }

    /// Buckets in display order: unranked first, then GOTY through F.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn items_in(&self, bucket: BucketId) -> impl Iterator<Item = &Item> {
        self.buckets
            .get(bucket)
            .items_in_order()
            .iter()
            .filter_map(|id| self.store.get(*id))
    }

    pub fn label(&self, id: ItemId) -> Option<String> {
        self.store.get(id).map(Item::label)
    }

    /// 項目目前可選的細分（未排名時為 `None`）。 / Refinements currently offered to an item.
    pub fn tier_options(&self, id: ItemId) -> Option<[SubOption; 2]> {
        self.store.get(id)?.tier.tier().map(|tier| tier.options())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for bucket in self.buckets.iter() {
            for id in bucket.items_in_order() {
                let item = self.store.get(*id).ok_or(InvariantViolation::Dangling {
                    bucket: bucket.id(),
                    item: *id,
                })?;
                if item.tier != bucket.id() {
                    return Err(InvariantViolation::TierMismatch {
                        item: *id,
                        bucket: bucket.id(),
                        tier: item.tier,
                    });
                }
            }
        }
        for item in self.store.iter() {
            let count = self
                .buckets
                .iter()
                .filter(|bucket| bucket.contains(item.id()))
                .count();
            if count != 1 {
                return Err(InvariantViolation::Membership {
                    item: item.id(),
                    count,
                });
            }
            if let Some(sub) = item.sub_option {
                if item.tier.tier() != Some(sub.tier) {
                    return Err(InvariantViolation::SubOption {
                        item: item.id(),
                        label: sub.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn require(&self, id: ItemId) -> Result<&Item, WorkspaceError> {
        self.store.get(id).ok_or(WorkspaceError::UnknownItem(id))
    }

    fn require_mut(&mut self, id: ItemId) -> Result<&mut Item, WorkspaceError> {
        self.store.get_mut(id).ok_or(WorkspaceError::UnknownItem(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;

    fn workspace_with(names: &[&str]) -> (Workspace, Vec<ItemId>) {
        let mut workspace = Workspace::new();
        let ids = names
            .iter()
            .map(|name| workspace.create_item(ImageRef::from_uri(format!("{name}.png")), *name))
            .collect();
        (workspace, ids)
    }

    #[test]
    fn create_appends_unranked_with_default_size() {
        let (workspace, ids) = workspace_with(&["halo", "doom"]);
        let item = workspace.item(ids[1]).unwrap();
        assert_eq!(item.tier(), BucketId::Unranked);
        assert_eq!(item.size(), ItemSize::default());
        assert_eq!(item.sub_option(), None);
        assert_eq!(workspace.bucket(BucketId::Unranked).items_in_order(), ids.as_slice());
        assert!(workspace.tracker().is_dirty());
        workspace.check_invariants().unwrap();
    }

    #[test]
    fn move_appends_to_target_and_updates_tier() {
        let (mut workspace, ids) = workspace_with(&["a", "b", "c"]);
        let b = BucketId::Ranked(Tier::B);
        assert!(workspace.move_item(ids[2], b).unwrap());
        assert!(workspace.move_item(ids[0], b).unwrap());
        assert_eq!(workspace.bucket(b).items_in_order(), &[ids[2], ids[0]]);
        assert_eq!(workspace.bucket(BucketId::Unranked).items_in_order(), &[ids[1]]);
        assert_eq!(workspace.item(ids[0]).unwrap().tier(), b);
        assert_eq!(workspace.label(ids[0]).unwrap(), "B");
        workspace.check_invariants().unwrap();
    }

    #[test]
    fn move_to_current_bucket_is_a_no_op() {
        let (mut workspace, ids) = workspace_with(&["a", "b"]);
        workspace.move_item(ids[0], BucketId::Ranked(Tier::A)).unwrap();
        workspace.tracker_mut().mark_clean();

        assert!(!workspace.move_item(ids[0], BucketId::Ranked(Tier::A)).unwrap());
        assert!(!workspace.move_item(ids[1], BucketId::Unranked).unwrap());
        assert!(!workspace.tracker().is_dirty());
        assert_eq!(workspace.bucket(BucketId::Unranked).items_in_order(), &[ids[1]]);
    }

    #[test]
    fn sub_option_resets_when_unranked() {
        let (mut workspace, ids) = workspace_with(&["a"]);
        let id = ids[0];
        workspace.move_item(id, BucketId::Ranked(Tier::A)).unwrap();
        workspace.set_sub_option(id, Some(Refinement::Plus)).unwrap();
        assert_eq!(workspace.label(id).unwrap(), "A+");

        workspace.move_item(id, BucketId::Unranked).unwrap();
        assert_eq!(workspace.label(id).unwrap(), "");
        assert_eq!(workspace.item(id).unwrap().sub_option(), None);
        assert!(workspace.tier_options(id).is_none());
        workspace.check_invariants().unwrap();
    }

    #[test]
    fn moving_between_tiers_drops_the_old_refinement() {
        let (mut workspace, ids) = workspace_with(&["a"]);
        let id = ids[0];
        workspace.move_item(id, BucketId::Ranked(Tier::A)).unwrap();
        workspace.set_sub_option(id, Some(Refinement::Minus)).unwrap();
        workspace.move_item(id, BucketId::Ranked(Tier::Aaa)).unwrap();
        assert_eq!(workspace.label(id).unwrap(), "AAA");
        let options = workspace.tier_options(id).unwrap();
        assert_eq!(options[0].to_string(), "AAA+");
        assert_eq!(options[1].to_string(), "AAA-");
    }

    #[test]
    fn sub_option_is_ignored_while_unranked() {
        let (mut workspace, ids) = workspace_with(&["a"]);
        workspace.tracker_mut().mark_clean();
        assert!(!workspace.set_sub_option(ids[0], Some(Refinement::Plus)).unwrap());
        assert_eq!(workspace.item(ids[0]).unwrap().sub_option(), None);
        assert!(!workspace.tracker().is_dirty());
    }

    #[test]
    fn clearing_the_sub_option_falls_back_to_bare_tier() {
        let (mut workspace, ids) = workspace_with(&["a"]);
        let id = ids[0];
        workspace.move_item(id, BucketId::Ranked(Tier::C)).unwrap();
        workspace.set_sub_option(id, Some(Refinement::Minus)).unwrap();
        assert_eq!(workspace.label(id).unwrap(), "C-");
        workspace.set_sub_option(id, None).unwrap();
        assert_eq!(workspace.label(id).unwrap(), "C");
    }

    #[test]
    fn resize_clamps_then_squares() {
        let (mut workspace, ids) = workspace_with(&["a"]);
        let id = ids[0];
        let expect = |edge| ItemSize {
            width: edge,
            height: edge,
        };
        assert_eq!(workspace.resize_item(id, 200, 90).unwrap(), expect(90));
        assert_eq!(workspace.resize_item(id, 10, 10).unwrap(), expect(40));
        assert_eq!(workspace.resize_item(id, 60, 120).unwrap(), expect(60));
        assert_eq!(workspace.item(id).unwrap().size(), expect(60));
    }

    #[test]
    fn delete_and_clear_remove_items() {
        let (mut workspace, ids) = workspace_with(&["a", "b", "c"]);
        workspace.move_item(ids[1], BucketId::Ranked(Tier::F)).unwrap();
        let removed = workspace.delete_item(ids[1]).unwrap();
        assert_eq!(removed.display_name(), "b");
        assert!(workspace.bucket(BucketId::Ranked(Tier::F)).is_empty());
        assert_eq!(
            workspace.delete_item(ids[1]).unwrap_err(),
            WorkspaceError::UnknownItem(ids[1])
        );

        workspace.clear();
        assert!(workspace.is_empty());
        assert!(workspace.buckets().all(Bucket::is_empty));
        workspace.check_invariants().unwrap();
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (mut workspace, ids) = workspace_with(&["a"]);
        workspace.delete_item(ids[0]).unwrap();
        assert!(workspace.move_item(ids[0], BucketId::Unranked).is_err());
        assert!(workspace.resize_item(ids[0], 90, 90).is_err());
        assert!(workspace.set_sub_option(ids[0], None).is_err());
    }

    #[test]
    fn restore_item_keeps_invariants() {
        let mut workspace = Workspace::new();
        let stray = SubOption::new(Tier::B, Refinement::Plus);
        let unranked = workspace.restore_item(
            BucketId::Unranked,
            ImageRef::from_uri("x.png"),
            "x",
            ItemSize {
                width: 120,
                height: 300,
            },
            Some(stray),
        );
        let ranked = workspace.restore_item(
            BucketId::Ranked(Tier::A),
            ImageRef::from_uri("y.png"),
            "y",
            ItemSize::default(),
            Some(stray),
        );
        assert_eq!(workspace.item(unranked).unwrap().sub_option(), None);
        assert_eq!(workspace.item(unranked).unwrap().size().width, 120);
        assert_eq!(workspace.item(ranked).unwrap().sub_option(), None);
        workspace.check_invariants().unwrap();
    }

    #[test]
    fn bare_refinement_is_stored_as_none() {
        let (mut workspace, ids) = workspace_with(&["a"]);
        let id = ids[0];
        let c = BucketId::Ranked(Tier::C);
        workspace.move_item(id, c).unwrap();
        workspace.tracker_mut().mark_clean();

        assert!(!workspace.set_sub_option(id, Some(Refinement::Bare)).unwrap());
        assert_eq!(workspace.item(id).unwrap().sub_option(), None);
        assert!(!workspace.tracker().is_dirty());

        let restored = workspace.restore_item(
            c,
            ImageRef::from_uri("b.png"),
            "b",
            ItemSize::default(),
            Some(SubOption::new(Tier::C, Refinement::Bare)),
        );
        assert_eq!(workspace.item(restored).unwrap().sub_option(), None);
        assert_eq!(workspace.label(restored).unwrap(), "C");
    }
}
