use std::sync::Arc;
use std::time::Duration;

use crate::config::LockConfig;
use crate::retry::RetryPolicy;
use crate::store::{AttrValue, Condition, Store, Update};

use super::metadata::{
    meta_key, now_millis, LockMetadata, UnixMillis, READER_COUNT, READER_EXPIRY, WRITE_EXPIRY,
    WRITE_LOCKED,
};
use super::{LockError, ReadLease, WriteLease};

/// The lock protocol's acquire primitives.
///
/// One `LeaseLock` serves any number of resources; the resource is named per
/// call by its partition key. All coordination state lives in the store's
/// metadata item — the `LeaseLock` itself is stateless and cheap to clone.
pub struct LeaseLock<S> {
    store: Arc<S>,
    config: LockConfig,
    retry: RetryPolicy,
}

impl<S> Clone for LeaseLock<S> {
    fn clone(&self) -> Self {
        LeaseLock {
            store: self.store.clone(),
            config: self.config,
            retry: self.retry,
        }
    }
}

impl<S: Store> LeaseLock<S> {
    pub fn new(store: Arc<S>, config: LockConfig) -> Self {
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay);
        LeaseLock {
            store,
            config,
            retry,
        }
    }

    /// Acquire a shared read slot on the resource.
    ///
    /// Succeeds when no writer holds a live lease: the predicate admits a
    /// never-locked partition, an unlocked one, or one whose write lease
    /// expired before this request started. On success the reader count is
    /// incremented and the reader lease refreshed atomically.
    ///
    /// Contention is retried through the shared policy; a terminal condition
    /// failure surfaces as [`LockError::Blocked`] and the caller must not
    /// proceed to read data.
    pub fn acquire_read(&self, pk: &str) -> Result<ReadLease<S>, LockError> {
        let now = now_millis();
        let key = meta_key(pk);
        let condition = write_lease_free(now);
        let updates = [
            Update::add(READER_COUNT, 1),
            Update::set(
                READER_EXPIRY,
                AttrValue::N(now + millis(self.config.read_lease)),
            ),
        ];

        self.retry
            .run(|| self.store.update_item(&key, &condition, &updates))
            .map_err(LockError::from_contention)?;

        tracing::debug!(resource = pk, "read lease acquired");
        Ok(ReadLease::new(self.store.clone(), pk))
    }

    /// Acquire the exclusive write lock on the resource.
    ///
    /// Same admission predicate as the read path. On success `wlock` is set
    /// and the write lease refreshed; the returned [`WriteLease`] carries the
    /// reader count observed at the moment of the transition, so the caller
    /// can [drain](WriteLease::drain) leftover readers before mutating
    /// payload items.
    pub fn acquire_write(&self, pk: &str) -> Result<WriteLease<S>, LockError> {
        let now = now_millis();
        let key = meta_key(pk);
        let condition = write_lease_free(now);
        let updates = [
            Update::set(WRITE_LOCKED, AttrValue::Bool(true)),
            Update::set(
                WRITE_EXPIRY,
                AttrValue::N(now + millis(self.config.write_lease)),
            ),
        ];

        let prior = self
            .retry
            .run(|| self.store.update_item(&key, &condition, &updates))
            .map_err(LockError::from_contention)?;

        let prior_readers = LockMetadata::from_attrs(&prior).readers;
        tracing::debug!(resource = pk, prior_readers, "write lease acquired");
        Ok(WriteLease::new(
            self.store.clone(),
            pk,
            prior_readers,
            now,
            millis(self.config.write_lease),
            self.retry,
        ))
    }
}

/// Admission predicate shared by both acquire paths: no writer, or the
/// writer's lease expired before `now`.
///
/// `now` is snapshotted once per logical request and baked into the condition
/// value. Internal retries reuse it unchanged, so a request that takes the
/// expiry override and refreshes the lease can never re-override its own
/// fresh lease on a retried attempt.
fn write_lease_free(now: UnixMillis) -> Condition {
    Condition::not_exists(WRITE_LOCKED)
        .or(Condition::eq(WRITE_LOCKED, AttrValue::Bool(false)))
        .or(Condition::lt(WRITE_EXPIRY, AttrValue::N(now)))
}

fn millis(d: Duration) -> i64 {
    d.as_millis() as i64
}
