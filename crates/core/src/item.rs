use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::tier::{BucketId, SubOption};

pub const MIN_ITEM_EDGE: u32 = 40;
pub const MAX_ITEM_EDGE: u32 = 150;
pub const DEFAULT_ITEM_EDGE: u32 = 80;

const PASTED_NAME_PREFIX: &str = "Pasted_Image_";

/// 項目的穩定識別碼，移動時不變。 / Stable item identifier; survives moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// 圖片內容參考（URI 或 data URL）。 / Content reference for an item's image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    /// 直接使用既有的 URI。 / Wraps an existing URI verbatim.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// 將二進位圖片編碼為 data URL；非圖片 MIME 回傳 `None`。 /
    /// Encodes an image payload as a data URL; non-image MIME types yield `None`.
    pub fn from_payload(mime: &str, bytes: &[u8]) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if !is_image_mime(&mime) {
            return None;
        }
        Some(Self(format!("data:{mime};base64,{}", BASE64.encode(bytes))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// 貼上的圖片沒有檔名，改以時間戳命名。 / Display name given to clipboard images.
pub fn pasted_image_name(timestamp_ms: u128) -> String {
    format!("{PASTED_NAME_PREFIX}{timestamp_ms}")
}

/// 正方形尺寸，單位為像素。 / Item edge lengths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ItemSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_ITEM_EDGE,
            height: DEFAULT_ITEM_EDGE,
        }
    }
}

impl ItemSize {
    /// Clamps each dimension into `[40, 150]` on its own, then squares the result
    /// down to the smaller edge.
    pub fn clamped_square(width: i64, height: i64) -> Self {
        let clamp = |value: i64| value.clamp(MIN_ITEM_EDGE as i64, MAX_ITEM_EDGE as i64) as u32;
        let edge = clamp(width).min(clamp(height));
        Self {
            width: edge,
            height: edge,
        }
    }
}

/// 排名清單中的單一項目。 / A single rankable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    image: ImageRef,
    display_name: String,
    pub(crate) size: ItemSize,
    pub(crate) tier: BucketId,
    pub(crate) sub_option: Option<SubOption>,
}

impl Item {
    pub(crate) fn new(id: ItemId, image: ImageRef, display_name: String) -> Self {
        Self {
            id,
            image,
            display_name,
            size: ItemSize::default(),
            tier: BucketId::Unranked,
            sub_option: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn size(&self) -> ItemSize {
        self.size
    }

    pub fn tier(&self) -> BucketId {
        self.tier
    }

    pub fn sub_option(&self) -> Option<SubOption> {
        self.sub_option
    }

    /// 顯示用標籤：細分優先，否則為層級名稱；未排名為空字串。 /
    /// Displayed label: the sub-option when set, else the bare tier, empty when unranked.
    pub fn label(&self) -> String {
        match (self.sub_option, self.tier) {
            (Some(sub), _) => sub.to_string(),
            (None, BucketId::Ranked(tier)) => tier.as_str().to_string(),
            (None, BucketId::Unranked) => String::new(),
        }
    }
}
