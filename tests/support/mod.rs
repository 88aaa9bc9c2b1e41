use std::sync::Arc;
use std::time::Duration;

use lease_lock::{
    meta_key, ChoreService, InMemoryStore, Item, LockConfig, LockMetadata, Store,
};

/// Config with a tiny retry delay so contention tests stay fast.
pub fn fast_config(max_retries: u32) -> LockConfig {
    LockConfig {
        max_retries,
        retry_delay: Duration::from_millis(2),
        ..LockConfig::default()
    }
}

pub fn service(store: Arc<InMemoryStore>, max_retries: u32) -> ChoreService<InMemoryStore> {
    ChoreService::new(store, fast_config(max_retries))
}

/// Seed a resource's lock metadata item directly, bypassing the protocol.
pub fn seed_metadata(store: &InMemoryStore, pk: &str, md: LockMetadata) {
    store
        .batch_put(vec![Item {
            key: meta_key(pk),
            attrs: md.to_attrs(),
        }])
        .unwrap();
}

/// Decode a resource's current lock metadata (zeros if never created).
pub fn read_metadata(store: &InMemoryStore, pk: &str) -> LockMetadata {
    let attrs = store.get(&meta_key(pk)).unwrap().unwrap_or_default();
    LockMetadata::from_attrs(&attrs)
}
