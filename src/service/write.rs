use serde::{Deserialize, Serialize};

use crate::store::{AttrValue, Item, Store};

use super::{ChoreService, ServiceError, DESC};

/// Write request: `{"PK": "...", "chores": [{"name": "...", "desc": "..."}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    #[serde(rename = "PK")]
    pub pk: String,
    #[serde(default)]
    pub chores: Vec<Chore>,
}

/// A chore to create or overwrite under the resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    pub name: String,
    #[serde(rename = "desc")]
    pub desc: String,
}

/// Sort key of a chore payload item. The prefix keeps payload items apart
/// from the `#`-prefixed metadata item in the same partition.
pub(crate) fn chore_sort_key(name: &str) -> String {
    format!("CHORE#{}", name)
}

impl<S: Store> ChoreService<S> {
    /// Replace the resource's chores under the exclusive write lease.
    ///
    /// Sequence: acquire write lock → drain leftover readers → batch-put the
    /// chore items. An empty chore list is a no-op success with zero store
    /// calls. Contention at acquire or drain surfaces as
    /// [`ServiceError::Blocked`] with no payload mutation; a batch failure
    /// after drain is [`ServiceError::Unknown`]. The lock is released on
    /// every exit path once acquired.
    pub fn write(&self, req: &WriteRequest) -> Result<(), ServiceError> {
        if req.pk.is_empty() {
            return Err(ServiceError::Invalid);
        }
        if req.chores.is_empty() {
            return Ok(());
        }

        let mut lease = self.lock.acquire_write(&req.pk)?;
        lease.drain()?;

        let items: Vec<Item> = req
            .chores
            .iter()
            .map(|chore| {
                Item::new(&req.pk, chore_sort_key(&chore.name))
                    .with(DESC, AttrValue::S(chore.desc.clone()))
            })
            .collect();

        self.store.batch_put(items).map_err(|e| {
            tracing::error!(resource = %req.pk, error = %e, "batch write failed");
            ServiceError::Unknown(e.to_string())
        })?;

        Ok(())
    }
}
