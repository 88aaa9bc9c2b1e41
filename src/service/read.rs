use serde::{Deserialize, Serialize};

use crate::store::{AttrValue, Item, Store};

use super::{ChoreService, ServiceError, DESC};

/// Read request: `{"PK": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadRequest {
    #[serde(rename = "PK")]
    pub pk: String,
}

/// One item of a read response: `{"PK": "...", "SK": "...", "desc": "..."}`.
///
/// The read returns every item in the partition, the lock metadata item
/// included; items without a `desc` attribute render it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoreRecord {
    #[serde(rename = "PK")]
    pub pk: String,
    #[serde(rename = "SK")]
    pub sk: String,
    #[serde(rename = "desc", default)]
    pub desc: String,
}

impl From<Item> for ChoreRecord {
    fn from(item: Item) -> Self {
        let desc = item
            .attr(DESC)
            .and_then(AttrValue::as_str)
            .unwrap_or_default()
            .to_string();
        ChoreRecord {
            pk: item.key.pk,
            sk: item.key.sk,
            desc,
        }
    }
}

impl<S: Store> ChoreService<S> {
    /// Read all items under a resource, holding a shared read lease for the
    /// duration of the query.
    ///
    /// Rejected as [`ServiceError::Blocked`] while a writer holds a live
    /// lease. A query failure after acquisition surfaces as
    /// [`ServiceError::Unknown`]; the lease is released either way.
    pub fn read(&self, req: &ReadRequest) -> Result<Vec<ChoreRecord>, ServiceError> {
        if req.pk.is_empty() {
            return Err(ServiceError::Invalid);
        }

        let _lease = self.lock.acquire_read(&req.pk)?;

        let items = self.store.query(&req.pk).map_err(|e| {
            tracing::error!(resource = %req.pk, error = %e, "query failed");
            ServiceError::Unknown(e.to_string())
        })?;

        Ok(items.into_iter().map(ChoreRecord::from).collect())
    }
}
