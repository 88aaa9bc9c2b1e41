use std::fmt;

use crate::store::StoreError;

/// Error type for lock acquisition and drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// Contention: the retry budget was exhausted against a live incompatible
    /// lease. Callers should back off and retry the whole operation later.
    Blocked,
    /// The store failed for a reason unrelated to lock contention.
    Store(StoreError),
}

impl LockError {
    /// Classify a store failure coming out of a retry-routed conditional
    /// update: a surviving `ConditionFailed` is terminal contention,
    /// everything else passes through.
    pub(crate) fn from_contention(err: StoreError) -> Self {
        match err {
            StoreError::ConditionFailed => LockError::Blocked,
            other => LockError::Store(other),
        }
    }
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Blocked => write!(f, "blocked: lock held by another participant"),
            LockError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LockError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for LockError {
    fn from(err: StoreError) -> Self {
        LockError::from_contention(err)
    }
}
