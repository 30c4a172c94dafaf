//! In-memory model of a tier list: items, buckets and the rules tying them together.
//! 排名清單的記憶體模型：項目、容器與其規則。

pub mod bucket;
pub mod focus;
pub mod gesture;
pub mod item;
pub mod store;
pub mod tier;
pub mod tracker;
pub mod workspace;

pub use bucket::{Bucket, BucketSet};
pub use focus::{HoverFocus, Key, KeyOutcome};
pub use gesture::{Pointer, ResizeGesture};
pub use item::{
    is_image_mime, pasted_image_name, ImageRef, Item, ItemId, ItemSize, DEFAULT_ITEM_EDGE,
    MAX_ITEM_EDGE, MIN_ITEM_EDGE,
};
pub use store::ItemStore;
pub use tier::{BucketId, Refinement, SubOption, Tier, UnknownTier};
pub use tracker::{Change, ChangeTracker, TrackerState, DEFAULT_FLUSH_INTERVAL};
pub use workspace::{InvariantViolation, Workspace, WorkspaceError};
