use std::sync::Arc;

use crate::retry::RetryPolicy;
use crate::store::{AttrValue, Condition, Store, Update};

use super::metadata::{
    meta_key, UnixMillis, READER_COUNT, READER_EXPIRY, WRITE_EXPIRY, WRITE_LOCKED,
};
use super::LockError;

/// The held exclusive write lock. Dropping the lease releases it on every
/// exit path, whether the payload mutation ran, failed, or was never reached.
///
/// The writer must [`drain`](Self::drain) leftover readers before mutating
/// payload items. Release sets `wlock = false` guarded by `wlock = true`; a
/// failed release is logged and swallowed — a stuck write lock self-heals
/// once `wtime` passes.
pub struct WriteLease<S: Store> {
    store: Arc<S>,
    pk: String,
    prior_readers: i64,
    /// "now" snapshotted at request start; reused for the drain predicate so
    /// retried attempts cannot move the expiry goalposts.
    acquired_at: UnixMillis,
    write_lease_millis: i64,
    retry: RetryPolicy,
    drained: bool,
    released: bool,
}

impl<S: Store> std::fmt::Debug for WriteLease<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteLease")
            .field("pk", &self.pk)
            .field("prior_readers", &self.prior_readers)
            .field("acquired_at", &self.acquired_at)
            .field("write_lease_millis", &self.write_lease_millis)
            .field("drained", &self.drained)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl<S: Store> WriteLease<S> {
    pub(crate) fn new(
        store: Arc<S>,
        pk: &str,
        prior_readers: i64,
        acquired_at: UnixMillis,
        write_lease_millis: i64,
        retry: RetryPolicy,
    ) -> Self {
        WriteLease {
            store,
            pk: pk.to_string(),
            prior_readers,
            acquired_at,
            write_lease_millis,
            retry,
            drained: false,
            released: false,
        }
    }

    /// Partition key of the resource this lease covers.
    pub fn resource(&self) -> &str {
        &self.pk
    }

    /// Reader count observed at the moment the write lock was taken.
    pub fn prior_readers(&self) -> i64 {
        self.prior_readers
    }

    /// Wait out (or forcibly expire) readers left over from before this
    /// writer acquired.
    ///
    /// No-op when the acquire observed zero readers. Otherwise issues a
    /// conditional update `readers = 0 OR rtime < now ⇒ readers := 0`,
    /// refreshing the write lease alongside. While readers hold a live lease
    /// the condition fails and the retry policy's fixed delay makes this
    /// writer wait for them to finish or expire; exhausting the budget
    /// surfaces as [`LockError::Blocked`] and the writer must not touch
    /// payload items.
    pub fn drain(&mut self) -> Result<(), LockError> {
        if self.drained || self.prior_readers == 0 {
            return Ok(());
        }

        let key = meta_key(&self.pk);
        let condition = Condition::eq(READER_COUNT, AttrValue::N(0)).or(Condition::lt(
            READER_EXPIRY,
            AttrValue::N(self.acquired_at),
        ));
        let updates = [
            Update::set(READER_COUNT, AttrValue::N(0)),
            Update::set(
                WRITE_EXPIRY,
                AttrValue::N(self.acquired_at + self.write_lease_millis),
            ),
        ];

        self.retry
            .run(|| self.store.update_item(&key, &condition, &updates))
            .map_err(LockError::from_contention)?;

        tracing::debug!(resource = %self.pk, evicted = self.prior_readers, "readers drained");
        self.drained = true;
        Ok(())
    }

    /// Release the write lock explicitly. Equivalent to dropping the lease.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let key = meta_key(&self.pk);
        let condition = Condition::eq(WRITE_LOCKED, AttrValue::Bool(true));
        let updates = [Update::set(WRITE_LOCKED, AttrValue::Bool(false))];
        match self.store.update_item(&key, &condition, &updates) {
            Ok(_) => tracing::debug!(resource = %self.pk, "write lease released"),
            Err(e) => {
                // Best-effort: a stuck write lock self-heals via wtime.
                tracing::warn!(resource = %self.pk, error = %e, "write lease release failed");
            }
        }
    }
}

impl<S: Store> Drop for WriteLease<S> {
    fn drop(&mut self) {
        self.release_once();
    }
}
