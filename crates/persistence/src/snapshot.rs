use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tierlist_core::{Tier, UnknownTier};

use crate::codec::DecodeError;
use crate::px::PixelLength;

/// Serialisable view of a whole workspace.
/// 工作區的可序列化快照。
///
/// The document shape is stable across versions:
/// `{"unranked": [ItemRecord], "tiers": {"GOTY": [ItemRecord], ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub unranked: Vec<ItemRecord>,
    #[serde(default)]
    pub tiers: BTreeMap<TierKey, Vec<ItemRecord>>,
}

impl Snapshot {
    /// Snapshot with every tier key present and no items, as `export` emits for an
    /// empty workspace.
    pub fn empty() -> Self {
        Self {
            unranked: Vec::new(),
            tiers: Tier::ALL
                .into_iter()
                .map(|tier| (TierKey(tier), Vec::new()))
                .collect(),
        }
    }

    pub fn records(&self, tier: Tier) -> &[ItemRecord] {
        self.tiers
            .get(&TierKey(tier))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn item_count(&self) -> usize {
        self.unranked.len() + self.tiers.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// 解析 JSON 文件。 / Parses a stored document.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(DecodeError::Json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One stored item.
/// 單一項目的儲存紀錄。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub src: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub tier_selection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<PixelLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<PixelLength>,
}

/// Map key for the `tiers` object; only the nine tier identifiers are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TierKey(pub Tier);

impl TryFrom<String> for TierKey {
    type Error = UnknownTier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(TierKey)
    }
}

impl From<TierKey> for String {
    fn from(key: TierKey) -> Self {
        key.0.as_str().to_string()
    }
}
