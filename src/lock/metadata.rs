//! Lock metadata item: attribute names, key derivation, and timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::{AttrValue, Attrs, ItemKey};

/// `bool` — true while a writer holds exclusive access.
pub const WRITE_LOCKED: &str = "wlock";
/// `number` — unix millis after which a held write lock may be overridden.
pub const WRITE_EXPIRY: &str = "wtime";
/// `number ≥ 0` — readers currently believed active.
pub const READER_COUNT: &str = "readers";
/// `number` — unix millis after which active readers may be disregarded.
pub const READER_EXPIRY: &str = "rtime";

/// Timestamp in milliseconds since the unix epoch, by each participant's
/// local clock. Lease durations are seconds-scale, so bounded clock skew is
/// acceptable.
pub type UnixMillis = i64;

/// Current local time as unix millis.
pub fn now_millis() -> UnixMillis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Key of the resource's lock metadata item. The sort key is the partition
/// key with a `#` prefix, sorting ahead of payload items in the partition.
pub fn meta_key(pk: &str) -> ItemKey {
    ItemKey::new(pk, format!("#{}", pk))
}

/// Decoded view of the lock metadata attributes.
///
/// Missing attributes decode to their zero values — a partition that has
/// never held the lock reads as unlocked with no readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockMetadata {
    pub write_locked: bool,
    pub write_expiry: UnixMillis,
    pub readers: i64,
    pub reader_expiry: UnixMillis,
}

impl LockMetadata {
    pub fn from_attrs(attrs: &Attrs) -> Self {
        LockMetadata {
            write_locked: attrs
                .get(WRITE_LOCKED)
                .and_then(AttrValue::as_bool)
                .unwrap_or(false),
            write_expiry: attrs
                .get(WRITE_EXPIRY)
                .and_then(AttrValue::as_i64)
                .unwrap_or(0),
            readers: attrs
                .get(READER_COUNT)
                .and_then(AttrValue::as_i64)
                .unwrap_or(0),
            reader_expiry: attrs
                .get(READER_EXPIRY)
                .and_then(AttrValue::as_i64)
                .unwrap_or(0),
        }
    }

    pub fn to_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new();
        attrs.insert(WRITE_LOCKED.into(), AttrValue::Bool(self.write_locked));
        attrs.insert(WRITE_EXPIRY.into(), AttrValue::N(self.write_expiry));
        attrs.insert(READER_COUNT.into(), AttrValue::N(self.readers));
        attrs.insert(READER_EXPIRY.into(), AttrValue::N(self.reader_expiry));
        attrs
    }
}
