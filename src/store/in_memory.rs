use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{Attrs, Condition, Item, ItemKey, Store, StoreError, Update};

/// In-memory store backed by `RwLock<BTreeMap>`.
///
/// The write guard makes every conditional update linearizable, which is the
/// only ordering guarantee the lock protocol relies on. Keys sort by
/// `(pk, sk)`, so a partition query is a contiguous range walk.
pub struct InMemoryStore {
    items: RwLock<BTreeMap<ItemKey, Attrs>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Fetch a single item's attributes, if present. Test/debug helper.
    pub fn get(&self, key: &ItemKey) -> Result<Option<Attrs>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;
        Ok(items.get(key).cloned())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for InMemoryStore {
    fn update_item(
        &self,
        key: &ItemKey,
        condition: &Condition,
        updates: &[Update],
    ) -> Result<Attrs, StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        // Missing item evaluates as an empty attribute map (upsert semantics).
        let prior = items.get(key).cloned().unwrap_or_default();
        if !condition.eval(&prior) {
            return Err(StoreError::ConditionFailed);
        }

        let entry = items.entry(key.clone()).or_default();
        for update in updates {
            update.apply(entry);
        }
        Ok(prior)
    }

    fn query(&self, pk: &str) -> Result<Vec<Item>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        let start = ItemKey::new(pk, "");
        Ok(items
            .range(start..)
            .take_while(|(key, _)| key.pk == pk)
            .map(|(key, attrs)| Item {
                key: key.clone(),
                attrs: attrs.clone(),
            })
            .collect())
    }

    fn batch_put(&self, batch: Vec<Item>) -> Result<(), StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;

        for item in batch {
            items.insert(item.key, item.attrs);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AttrValue;

    fn always() -> Condition {
        Condition::not_exists("__nope")
    }

    #[test]
    fn update_upserts_missing_item() {
        let store = InMemoryStore::new();
        let key = ItemKey::new("r1", "#r1");

        let prior = store
            .update_item(&key, &always(), &[Update::add("readers", 1)])
            .unwrap();
        assert!(prior.is_empty()); // item did not exist before

        let attrs = store.get(&key).unwrap().unwrap();
        assert_eq!(attrs.get("readers"), Some(&AttrValue::N(1)));
    }

    #[test]
    fn update_returns_prior_attributes() {
        let store = InMemoryStore::new();
        let key = ItemKey::new("r1", "#r1");
        store
            .update_item(&key, &always(), &[Update::set("readers", AttrValue::N(2))])
            .unwrap();

        let prior = store
            .update_item(&key, &Condition::ne("readers", AttrValue::N(0)), &[
                Update::set("readers", AttrValue::N(0)),
            ])
            .unwrap();
        assert_eq!(prior.get("readers"), Some(&AttrValue::N(2)));
        let attrs = store.get(&key).unwrap().unwrap();
        assert_eq!(attrs.get("readers"), Some(&AttrValue::N(0)));
    }

    #[test]
    fn failed_condition_leaves_item_untouched() {
        let store = InMemoryStore::new();
        let key = ItemKey::new("r1", "#r1");

        let err = store
            .update_item(&key, &Condition::ne("readers", AttrValue::N(0)), &[
                Update::add("readers", -1),
            ])
            .unwrap_err();
        assert_eq!(err, StoreError::ConditionFailed);
        assert!(store.get(&key).unwrap().is_none());
    }

    #[test]
    fn query_is_bounded_to_one_partition() {
        let store = InMemoryStore::new();
        store
            .batch_put(vec![
                Item::new("r1", "CHORE#a").with("desc", AttrValue::S("one".into())),
                Item::new("r1", "CHORE#b").with("desc", AttrValue::S("two".into())),
                Item::new("r2", "CHORE#c").with("desc", AttrValue::S("other".into())),
            ])
            .unwrap();

        let items = store.query("r1").unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.key.pk == "r1"));
    }

    #[test]
    fn batch_put_overwrites_existing_keys() {
        let store = InMemoryStore::new();
        store
            .batch_put(vec![Item::new("r1", "CHORE#a")
                .with("desc", AttrValue::S("old".into()))])
            .unwrap();
        store
            .batch_put(vec![Item::new("r1", "CHORE#a")
                .with("desc", AttrValue::S("new".into()))])
            .unwrap();

        let items = store.query("r1").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].attr("desc").and_then(AttrValue::as_str),
            Some("new")
        );
    }
}
