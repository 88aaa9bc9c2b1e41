//! The lease-based reader/writer lock protocol.
//!
//! All lock state lives in one metadata item per resource, and every
//! transition is a single conditional update — the metadata is never
//! read-modify-written outside one. Leases bound the damage a crashed holder
//! can do: a reader slot or the write lock left behind by a dead process is
//! overridden once its expiry timestamp passes.
//!
//! Acquisition hands back a scope guard ([`ReadLease`] / [`WriteLease`])
//! whose `Drop` releases the lease on every exit path of the enclosing
//! operation. Releases are best-effort: failures are logged, never
//! propagated, because correctness rests on lease expiry rather than on
//! guaranteed release.
//!
//! ## Metadata state machine
//!
//! ```text
//! UNLOCKED ──acquire_write──▶ WRITE_HELD ──drain (readers > 0)──▶ WRITE_HELD, readers = 0
//!     ▲                                                                   │
//!     └────────────────────────── release ◀── payload mutation ◀──────────┘
//! ```
//!
//! Reader acquire/release transitions run orthogonally, admitted whenever no
//! unexpired write lease is held.

mod error;
mod lease_lock;
mod metadata;
mod read;
mod write;

pub use error::LockError;
pub use lease_lock::LeaseLock;
pub use metadata::{
    meta_key, now_millis, LockMetadata, UnixMillis, READER_COUNT, READER_EXPIRY, WRITE_EXPIRY,
    WRITE_LOCKED,
};
pub use read::ReadLease;
pub use write::WriteLease;
