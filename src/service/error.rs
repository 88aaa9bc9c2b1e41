//! Error taxonomy of the entry handlers.

use std::fmt;

use crate::lock::LockError;

/// The three user-visible error kinds. Internal retry attempts and their
/// intermediate failures are never exposed.
///
/// `Display` renders exactly `invalid` / `blocked` / `unknown` — the literal
/// strings are part of the external contract. `Unknown` carries detail for
/// logs and `Debug` output only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed or empty request. Fails fast, before any store call.
    Invalid,
    /// Lock contention exhausted the retry budget. Back off and retry the
    /// whole operation later.
    Blocked,
    /// Store, transport, or decode failure unrelated to lock contention.
    Unknown(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Invalid => write!(f, "invalid"),
            ServiceError::Blocked => write!(f, "blocked"),
            ServiceError::Unknown(_) => write!(f, "unknown"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<LockError> for ServiceError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::Blocked => ServiceError::Blocked,
            LockError::Store(e) => ServiceError::Unknown(e.to_string()),
        }
    }
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Invalid => 400,
            ServiceError::Blocked => 423,
            ServiceError::Unknown(_) => 500,
        }
    }
}
