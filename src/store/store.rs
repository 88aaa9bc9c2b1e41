use super::{Attrs, Condition, Item, ItemKey, StoreError, Update};

/// Trait for the underlying key-value store.
///
/// The lock protocol needs exactly three operations: an atomic conditional
/// update on a single item, a range query over one partition, and a batch
/// multi-item write. The in-memory implementation backs tests and demos;
/// production implementations might talk to DynamoDB, FoundationDB, etcd, or
/// anything else offering single-item check-and-set.
///
/// The conditional update is the protocol's sole serialization point: for a
/// given item, at most one caller may observe a given "before" state and
/// transition it. Implementations must guarantee single-item linearizability
/// of `update_item`; nothing stronger is required.
pub trait Store: Send + Sync {
    /// Atomically evaluate `condition` against the item's current attributes
    /// (an empty map if the item does not exist) and, if it holds, apply
    /// `updates`, upserting the item. Returns the attributes as they were
    /// immediately before the mutation.
    ///
    /// Fails with [`StoreError::ConditionFailed`] when the predicate does not
    /// hold; any other failure is [`StoreError::Unavailable`].
    fn update_item(
        &self,
        key: &ItemKey,
        condition: &Condition,
        updates: &[Update],
    ) -> Result<Attrs, StoreError>;

    /// Return all items sharing the given partition key.
    fn query(&self, pk: &str) -> Result<Vec<Item>, StoreError>;

    /// Write a batch of items, overwriting any existing items with the same
    /// keys. No atomicity is guaranteed across the batch beyond what the
    /// backing store provides.
    fn batch_put(&self, items: Vec<Item>) -> Result<(), StoreError>;
}
