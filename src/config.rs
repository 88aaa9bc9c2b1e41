use std::time::Duration;

/// Tunable policy surface of the lock protocol.
///
/// The four values trade liveness against latency: leases bound how long a
/// crashed holder can block others, while the retry budget and delay bound
/// how long a contended request waits before giving up as blocked. The write
/// lease should exceed the read lease — a writer's drain wait consumes part
/// of its own lease window.
///
/// Constructed explicitly and injected; there is no process-global
/// configuration.
#[derive(Debug, Clone, Copy)]
pub struct LockConfig {
    /// How long a read slot stays valid before the reader is considered
    /// abandoned.
    pub read_lease: Duration,
    /// How long the exclusive write lock stays valid before the writer is
    /// considered abandoned.
    pub write_lease: Duration,
    /// Contention retries after the first attempt of a conditional update.
    pub max_retries: u32,
    /// Fixed delay between contention retries.
    pub retry_delay: Duration,
}

impl Default for LockConfig {
    fn default() -> Self {
        LockConfig {
            read_lease: Duration::from_secs(1),
            write_lease: Duration::from_secs(5),
            max_retries: 5,
            retry_delay: Duration::from_millis(100),
        }
    }
}
