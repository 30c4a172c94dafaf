use thiserror::Error;
use tierlist_core::{
    BucketId, ImageRef, Item, ItemSize, Refinement, SubOption, Tier, Workspace,
    DEFAULT_ITEM_EDGE,
};

use crate::px::PixelLength;
use crate::snapshot::{ItemRecord, Snapshot, TierKey};

/// 快照文件無法解析。 / The snapshot document could not be parsed.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed snapshot document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Captures the workspace in bucket iteration order.
pub fn export(workspace: &Workspace) -> Snapshot {
    let mut snapshot = Snapshot::empty();
    snapshot.unranked = workspace
        .items_in(BucketId::Unranked)
        .map(record_for)
        .collect();
    for tier in Tier::ALL {
        let records = workspace
            .items_in(BucketId::Ranked(tier))
            .map(record_for)
            .collect();
        snapshot.tiers.insert(TierKey(tier), records);
    }
    snapshot
}

/// Builds a fresh workspace from `snapshot`.
///
/// A parsed snapshot always rehydrates: selections that do not belong to the
/// record's bucket fall back to the bare tier (or nothing, when unranked).
pub fn rehydrate(snapshot: &Snapshot) -> Workspace {
    let mut staged = Workspace::new();
    for record in &snapshot.unranked {
        if !record.tier_selection.is_empty() {
            log::debug!(
                "dropping selection {:?} on unranked record {:?}",
                record.tier_selection,
                record.file_name
            );
        }
        staged.restore_item(
            BucketId::Unranked,
            ImageRef::from_uri(record.src.clone()),
            record.file_name.clone(),
            recorded_size(record),
            None,
        );
    }
    for (key, records) in &snapshot.tiers {
        let tier = key.0;
        for record in records {
            staged.restore_item(
                BucketId::Ranked(tier),
                ImageRef::from_uri(record.src.clone()),
                record.file_name.clone(),
                recorded_size(record),
                selection_for(tier, record),
            );
        }
    }
    staged
}

/// 以快照內容取代工作區。 / Replaces the workspace contents with `snapshot`.
pub fn import(workspace: &mut Workspace, snapshot: &Snapshot) {
    let staged = rehydrate(snapshot);
    workspace.replace_contents(staged);
}

fn record_for(item: &Item) -> ItemRecord {
    let size = item.size();
    ItemRecord {
        src: item.image().as_str().to_string(),
        file_name: item.display_name().to_string(),
        tier_selection: item.label(),
        width: Some(PixelLength(size.width)),
        height: Some(PixelLength(size.height)),
    }
}

fn recorded_size(record: &ItemRecord) -> ItemSize {
    let edge = |length: Option<PixelLength>| length.map_or(DEFAULT_ITEM_EDGE, |px| px.get());
    ItemSize {
        width: edge(record.width),
        height: edge(record.height),
    }
}

// A bare label carries no refinement, so it maps to `None` like a fresh item.
fn selection_for(tier: Tier, record: &ItemRecord) -> Option<SubOption> {
    if record.tier_selection.is_empty() {
        return None;
    }
    match SubOption::parse_for(tier, &record.tier_selection) {
        Some(sub) if sub.refinement == Refinement::Bare => None,
        Some(sub) => Some(sub),
        None => {
            log::debug!(
                "record {:?} in tier {} carries stale selection {:?}; using the bare tier",
                record.file_name,
                tier,
                record.tier_selection
            );
            None
        }
    }
}
