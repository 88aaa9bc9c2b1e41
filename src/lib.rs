mod config;
mod lock;
mod retry;
pub mod service;
pub mod store;

pub use config::LockConfig;
pub use lock::{
    meta_key, now_millis, LeaseLock, LockError, LockMetadata, ReadLease, UnixMillis, WriteLease,
    READER_COUNT, READER_EXPIRY, WRITE_EXPIRY, WRITE_LOCKED,
};
pub use retry::RetryPolicy;
pub use service::{Chore, ChoreRecord, ChoreService, ReadRequest, ServiceError, WriteRequest};
pub use store::{
    AttrValue, Attrs, Condition, InMemoryStore, Item, ItemKey, Store, StoreError, Update,
};
