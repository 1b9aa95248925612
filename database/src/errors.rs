use crate::prelude::DbKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("key {0} not found in store")]
    KeyNotFound(DbKey),

    #[error("key {0} already exists in store")]
    KeyAlreadyExists(String),

    #[error("data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("rocksdb error {0}")]
    DbError(#[from] rocksdb::Error),

    #[error("bincode error {0}")]
    DeserializationError(#[from] Box<bincode::ErrorKind>),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Predicates that classify store errors into common semantic buckets.
pub trait StoreErrorPredicates {
    /// Returns `true` if this error represents a missing entry (e.g. key not found).
    fn is_key_not_found(&self) -> bool;

    /// Returns `true` if this error represents a duplicate write.
    fn is_already_exists(&self) -> bool;
}

impl StoreErrorPredicates for StoreError {
    fn is_key_not_found(&self) -> bool {
        matches!(self, StoreError::KeyNotFound(_))
    }

    fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::KeyAlreadyExists(_))
    }
}

/// Extension methods for store results.
pub trait StoreResultExt<T, E: StoreErrorPredicates> {
    /// Converts a "key not found" error into absence.
    ///
    /// Mapping:
    /// - `Ok(v)` -> `Ok(Some(v))`
    /// - `Err(e)` where `e.is_key_not_found()` -> `Ok(None)`
    /// - any other `Err(e)` -> `Err(e)`
    fn optional(self) -> Result<Option<T>, E>;
}

impl<T, E: StoreErrorPredicates> StoreResultExt<T, E> for Result<T, E> {
    fn optional(self) -> Result<Option<T>, E> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_key_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
