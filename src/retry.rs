//! Retry policy for contended conditional updates.
//!
//! A failed condition means another participant currently holds the lock
//! state incompatibly — worth waiting out, briefly and boundedly. Any other
//! store failure is not contention and is surfaced immediately; transient
//! transport errors are the store adapter's own problem to retry.

use std::thread;
use std::time::Duration;

use crate::store::StoreError;

/// Retries `ConditionFailed` outcomes with a fixed inter-attempt delay, up to
/// a bounded count. Shared by the reader and writer paths so the two cannot
/// drift apart.
///
/// Retries are invisible to the caller except as latency: after the budget is
/// exhausted the final `ConditionFailed` is returned as-is, and the caller
/// classifies it as a terminal contention failure.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        RetryPolicy { max_retries, delay }
    }

    /// Run `op`, retrying only `ConditionFailed` results. `max_retries` is
    /// the number of re-attempts after the first, so `op` runs at most
    /// `max_retries + 1` times.
    ///
    /// Any timestamps embedded in the operation's condition values are
    /// deliberately not recomputed between attempts — the caller snapshots
    /// "now" once per logical request, which keeps a retried attempt from
    /// re-overriding a lease it refreshed itself.
    pub fn run<T>(
        &self,
        mut op: impl FnMut() -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut attempt = 0;
        loop {
            match op() {
                Err(StoreError::ConditionFailed) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::debug!(attempt, "condition failed, retrying");
                    thread::sleep(self.delay);
                }
                other => return other,
            }
        }
    }
}
