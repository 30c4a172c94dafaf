use tierlist_core::{BucketId, ItemId, Key, Pointer};

/// 來自介面的外部事件，依序處理。 / External UI events, handled strictly in arrival order.
///
/// Image decoding and storage reads complete by delivering another event, so
/// every mutation still happens inside a single `dispatch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Upload {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    Paste {
        mime: String,
        bytes: Vec<u8>,
        timestamp_ms: u128,
    },
    Drop {
        item: ItemId,
        target: BucketId,
    },
    HoverEnter(ItemId),
    HoverLeave(ItemId),
    Key(Key),
    ResizeStart {
        item: ItemId,
        pointer: Pointer,
    },
    PointerMove(Pointer),
    /// Window-level button release.
    PointerUp,
    PointerLeftWindow,
    Tick,
}
