//! Store adapter — the key-value store the lock protocol coordinates through.
//!
//! The protocol requires three operations of its store: an atomic conditional
//! update on a single item (check-and-set with a distinguishable "condition
//! failed" outcome), a range query over one partition key, and a batch write.
//! The [`Store`] trait captures exactly that contract; [`InMemoryStore`] is
//! the default implementation used by tests and demos.
//!
//! Predicates and mutations are typed expression trees ([`Condition`],
//! [`Update`]) rather than strings, so the store can evaluate them without
//! parsing and the protocol layer can build them without quoting.

mod error;
mod in_memory;
mod item;
mod store;

pub use error::StoreError;
pub use in_memory::InMemoryStore;
pub use item::{AttrValue, Attrs, Condition, Item, ItemKey, Update};
pub use store::Store;
