//! Chore service — the two entry handlers composing the lock protocol with
//! domain reads and writes.
//!
//! A resource is a named chore list identified by its partition key. The read
//! handler takes a shared lease, fetches every item in the partition, and
//! releases; the write handler takes the exclusive lease, drains leftover
//! readers, batch-writes the chore items, and releases. Releases ride on the
//! lease guards, so they run on every exit path.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use lease_lock::{ChoreService, InMemoryStore, LockConfig, WriteRequest, ReadRequest, Chore};
//!
//! let store = Arc::new(InMemoryStore::new());
//! let service = ChoreService::new(store, LockConfig::default());
//!
//! service.write(&WriteRequest {
//!     pk: "team-a".into(),
//!     chores: vec![Chore { name: "dishes".into(), desc: "tonight".into() }],
//! })?;
//!
//! let records = service.read(&ReadRequest { pk: "team-a".into() })?;
//! ```

mod error;
#[cfg(feature = "http")]
mod http;
mod read;
mod write;

use std::sync::Arc;

use crate::config::LockConfig;
use crate::lock::LeaseLock;
use crate::store::Store;

pub use error::ServiceError;
#[cfg(feature = "http")]
pub use http::{router, serve};
pub use read::{ChoreRecord, ReadRequest};
pub use write::{Chore, WriteRequest};

/// Attribute holding a chore's descriptive content. Part of the external
/// contract — it is also the JSON field name in responses.
pub(crate) const DESC: &str = "desc";

/// The two entry handlers, sharing one store and one lock.
///
/// Stateless between requests: all coordination lives in the store, so any
/// number of `ChoreService` instances (across processes) may serve the same
/// resources concurrently.
pub struct ChoreService<S> {
    lock: LeaseLock<S>,
    store: Arc<S>,
}

impl<S: Store> ChoreService<S> {
    pub fn new(store: Arc<S>, config: LockConfig) -> Self {
        ChoreService {
            lock: LeaseLock::new(store.clone(), config),
            store,
        }
    }

    /// The lock protocol instance backing this service.
    pub fn lock(&self) -> &LeaseLock<S> {
        &self.lock
    }
}
