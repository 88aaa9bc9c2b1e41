use std::fmt;

/// Error type for store operations.
///
/// `ConditionFailed` is the one outcome the lock protocol cares about: it is
/// the distinguishable "predicate did not hold" result of a conditional
/// update, and the only error kind the retry policy will retry. Everything
/// else is an opaque infrastructure failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The conditional update's predicate did not hold against the item's
    /// current attributes. The mutation was not applied.
    ConditionFailed,
    /// The store could not serve the request (transport failure, internal
    /// corruption, poisoned state).
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConditionFailed => write!(f, "condition failed"),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
