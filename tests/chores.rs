mod support;

use std::sync::Arc;

use lease_lock::{
    now_millis, Chore, InMemoryStore, LockMetadata, ReadRequest, ServiceError, Store, WriteRequest,
};
use support::{read_metadata, seed_metadata, service};

#[test]
fn write_then_read_round_trip() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(store.clone(), 5);

    svc.write(&WriteRequest {
        pk: "r1".into(),
        chores: vec![
            Chore {
                name: "dishes".into(),
                desc: "tonight".into(),
            },
            Chore {
                name: "laundry".into(),
                desc: "before friday".into(),
            },
        ],
    })
    .unwrap();

    let records = svc.read(&ReadRequest { pk: "r1".into() }).unwrap();

    // The metadata item rides along with the two chores, desc empty.
    assert_eq!(records.len(), 3);
    assert!(records.iter().any(|r| r.sk == "#r1" && r.desc.is_empty()));
    assert!(records
        .iter()
        .any(|r| r.sk == "CHORE#dishes" && r.desc == "tonight"));
    assert!(records
        .iter()
        .any(|r| r.sk == "CHORE#laundry" && r.desc == "before friday"));

    // Both leases fully released.
    let md = read_metadata(&store, "r1");
    assert_eq!(md.readers, 0);
    assert!(!md.write_locked);
}

#[test]
fn read_leaves_reader_count_at_prior_value() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(store.clone(), 5);

    svc.write(&WriteRequest {
        pk: "r1".into(),
        chores: vec![Chore {
            name: "dishes".into(),
            desc: "tonight".into(),
        }],
    })
    .unwrap();

    let before = read_metadata(&store, "r1").readers;
    svc.read(&ReadRequest { pk: "r1".into() }).unwrap();
    assert_eq!(read_metadata(&store, "r1").readers, before);
}

#[test]
fn later_write_overwrites_chores() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(store.clone(), 5);

    svc.write(&WriteRequest {
        pk: "r1".into(),
        chores: vec![Chore {
            name: "dishes".into(),
            desc: "tonight".into(),
        }],
    })
    .unwrap();
    svc.write(&WriteRequest {
        pk: "r1".into(),
        chores: vec![Chore {
            name: "dishes".into(),
            desc: "tomorrow".into(),
        }],
    })
    .unwrap();

    let records = svc.read(&ReadRequest { pk: "r1".into() }).unwrap();
    let dishes = records.iter().find(|r| r.sk == "CHORE#dishes").unwrap();
    assert_eq!(dishes.desc, "tomorrow");
}

#[test]
fn empty_chore_list_is_a_noop_success() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(store.clone(), 5);

    svc.write(&WriteRequest {
        pk: "r1".into(),
        chores: vec![],
    })
    .unwrap();

    // No store calls at all: not even the metadata item was created.
    assert!(store.query("r1").unwrap().is_empty());
}

#[test]
fn empty_pk_is_invalid_before_any_store_call() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(store.clone(), 5);

    assert_eq!(
        svc.read(&ReadRequest { pk: String::new() }).unwrap_err(),
        ServiceError::Invalid
    );
    assert_eq!(
        svc.write(&WriteRequest {
            pk: String::new(),
            chores: vec![Chore {
                name: "dishes".into(),
                desc: "tonight".into(),
            }],
        })
        .unwrap_err(),
        ServiceError::Invalid
    );
}

#[test]
fn write_blocked_while_a_reader_holds_a_slot_then_succeeds() {
    let store = Arc::new(InMemoryStore::new());
    let svc = lease_lock::ChoreService::new(
        store.clone(),
        lease_lock::LockConfig {
            read_lease: std::time::Duration::from_secs(60),
            ..support::fast_config(0)
        },
    );

    // A reader elsewhere in the process holds a slot through the same lock.
    let reader = svc.lock().acquire_read("r1").unwrap();

    let request = WriteRequest {
        pk: "r1".into(),
        chores: vec![Chore {
            name: "dishes".into(),
            desc: "tonight".into(),
        }],
    };
    assert_eq!(svc.write(&request).unwrap_err(), ServiceError::Blocked);
    assert!(store.query("r1").unwrap().iter().all(|i| i.key.sk == "#r1"));

    reader.release();
    svc.write(&request).unwrap();
    assert!(store
        .query("r1")
        .unwrap()
        .iter()
        .any(|i| i.key.sk == "CHORE#dishes"));
}

/// Store whose queries always fail; conditional updates pass through.
struct QueryFailingStore {
    inner: InMemoryStore,
}

impl Store for QueryFailingStore {
    fn update_item(
        &self,
        key: &lease_lock::ItemKey,
        condition: &lease_lock::Condition,
        updates: &[lease_lock::Update],
    ) -> Result<lease_lock::Attrs, lease_lock::StoreError> {
        self.inner.update_item(key, condition, updates)
    }

    fn query(&self, _pk: &str) -> Result<Vec<lease_lock::Item>, lease_lock::StoreError> {
        Err(lease_lock::StoreError::Unavailable("query down".into()))
    }

    fn batch_put(&self, items: Vec<lease_lock::Item>) -> Result<(), lease_lock::StoreError> {
        self.inner.batch_put(items)
    }
}

#[test]
fn query_failure_is_unknown_and_still_releases_the_lease() {
    let store = Arc::new(QueryFailingStore {
        inner: InMemoryStore::new(),
    });
    let svc = lease_lock::ChoreService::new(store.clone(), support::fast_config(0));

    let err = svc.read(&ReadRequest { pk: "r1".into() }).unwrap_err();
    assert!(matches!(err, ServiceError::Unknown(_)));

    // The lease guard ran on the error path: the slot taken by acquire was
    // handed back.
    let md = LockMetadata::from_attrs(
        &store
            .inner
            .get(&lease_lock::meta_key("r1"))
            .unwrap()
            .unwrap_or_default(),
    );
    assert_eq!(md.readers, 0);
}

#[test]
fn read_blocked_while_writer_lease_is_live() {
    let store = Arc::new(InMemoryStore::new());
    seed_metadata(
        &store,
        "r1",
        LockMetadata {
            write_locked: true,
            write_expiry: now_millis() + 60_000,
            ..LockMetadata::default()
        },
    );
    let svc = service(store.clone(), 1);

    assert_eq!(
        svc.read(&ReadRequest { pk: "r1".into() }).unwrap_err(),
        ServiceError::Blocked
    );
    // The blocked reader never took a slot.
    assert_eq!(read_metadata(&store, "r1").readers, 0);
}

#[test]
fn read_admitted_once_writer_lease_expired() {
    let store = Arc::new(InMemoryStore::new());
    seed_metadata(
        &store,
        "r1",
        LockMetadata {
            write_locked: true,
            write_expiry: now_millis() - 1_000,
            ..LockMetadata::default()
        },
    );
    let svc = service(store.clone(), 0);

    svc.read(&ReadRequest { pk: "r1".into() }).unwrap();
    assert_eq!(read_metadata(&store, "r1").readers, 0);
}
