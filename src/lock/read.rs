use std::sync::Arc;

use crate::store::{AttrValue, Condition, Store, Update};

use super::metadata::{meta_key, READER_COUNT};

/// A held read slot. Dropping the lease releases it on every exit path of the
/// enclosing operation.
///
/// Release is a conditional decrement guarded by `readers ≠ 0`, so a release
/// can never drive the count negative no matter how often it is attempted. A
/// failed release is logged and swallowed: a leaked slot is reclaimed once
/// the reader lease expires, so leaking degrades liveness, not correctness.
pub struct ReadLease<S: Store> {
    store: Arc<S>,
    pk: String,
    released: bool,
}

impl<S: Store> std::fmt::Debug for ReadLease<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadLease")
            .field("pk", &self.pk)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl<S: Store> ReadLease<S> {
    pub(crate) fn new(store: Arc<S>, pk: &str) -> Self {
        ReadLease {
            store,
            pk: pk.to_string(),
            released: false,
        }
    }

    /// Partition key of the resource this lease covers.
    pub fn resource(&self) -> &str {
        &self.pk
    }

    /// Release the slot explicitly. Equivalent to dropping the lease.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let key = meta_key(&self.pk);
        let condition = Condition::ne(READER_COUNT, AttrValue::N(0));
        let updates = [Update::add(READER_COUNT, -1)];
        match self.store.update_item(&key, &condition, &updates) {
            Ok(_) => tracing::debug!(resource = %self.pk, "read lease released"),
            Err(e) => {
                // Best-effort: a stuck reader count self-heals via rtime.
                tracing::warn!(resource = %self.pk, error = %e, "read lease release failed");
            }
        }
    }
}

impl<S: Store> Drop for ReadLease<S> {
    fn drop(&mut self) {
        self.release_once();
    }
}
