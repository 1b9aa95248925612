use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error;

use crate::IDENT;
use ledger_database::prelude::StoreError;

/// The step of a read or write at which a [`TxDbError`] occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorPhase {
    /// Issuing the query or opening the cursor
    Query,
    /// Decoding a fetched row
    Scan,
    /// Parsing a stored value into its structured form
    Decode,
    /// Cursor failure reported after the last row
    Rows,
    /// Store maintenance writes
    Store,
    Config,
}

impl Display for ErrorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorPhase::Query => "query",
            ErrorPhase::Scan => "scan",
            ErrorPhase::Decode => "decode hash",
            ErrorPhase::Rows => "rows",
            ErrorPhase::Store => "store",
            ErrorPhase::Config => "config",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors originating from the [`TxDb`](crate::TxDb).
#[derive(Error, Debug)]
pub enum TxDbError {
    #[error("[{IDENT}] query: {source}")]
    Query { source: StoreError },

    #[error("[{IDENT}] scan: {source}")]
    Scan { source: StoreError },

    #[error("[{IDENT}] decode hash {value:?}: {source}")]
    DecodeHash { value: String, source: faster_hex::Error },

    #[error("[{IDENT}] rows: {source}")]
    Rows { source: StoreError },

    #[error("[{IDENT}] {0}")]
    Store(#[from] StoreError),

    #[error("[{IDENT}] {0}")]
    Config(#[from] ConfigError),
}

impl TxDbError {
    /// Classifies a failed point read: undecodable values failed the scan, anything else failed the query.
    pub(crate) fn from_read(err: StoreError) -> Self {
        match err {
            StoreError::DeserializationError(_) => TxDbError::Scan { source: err },
            _ => TxDbError::Query { source: err },
        }
    }

    pub fn phase(&self) -> ErrorPhase {
        match self {
            TxDbError::Query { .. } => ErrorPhase::Query,
            TxDbError::Scan { .. } => ErrorPhase::Scan,
            TxDbError::DecodeHash { .. } => ErrorPhase::Decode,
            TxDbError::Rows { .. } => ErrorPhase::Rows,
            TxDbError::Store(_) => ErrorPhase::Store,
            TxDbError::Config(_) => ErrorPhase::Config,
        }
    }

    /// Name of the stored field the error relates to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            TxDbError::DecodeHash { .. } => Some("transaction_hash"),
            _ => None,
        }
    }

    /// The underlying store error, for phases that have one.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            TxDbError::Query { source } | TxDbError::Scan { source } | TxDbError::Rows { source } => Some(source),
            TxDbError::Store(err) => Some(err),
            TxDbError::DecodeHash { .. } | TxDbError::Config(_) => None,
        }
    }
}

/// Results originating from the [`TxDb`](crate::TxDb).
pub type TxDbResult<T> = Result<T, TxDbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_database::prelude::StoreErrorPredicates;
    use ledger_hashes::Hash;
    use std::str::FromStr;

    #[test]
    fn test_read_classification() {
        let garbage: Result<u64, _> = bincode::deserialize(&[1u8]);
        let err = TxDbError::from_read(garbage.unwrap_err().into());
        assert_eq!(err.phase(), ErrorPhase::Scan);
        assert!(err.store_error().is_some());

        let err = TxDbError::from_read(StoreError::DataInconsistency("unreachable".to_string()));
        assert_eq!(err.phase(), ErrorPhase::Query);
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_decode_error_context() {
        let value = "abc123".to_string();
        let source = Hash::from_str(&value).unwrap_err();
        let err = TxDbError::DecodeHash { value, source };
        assert_eq!(err.phase(), ErrorPhase::Decode);
        assert_eq!(err.field(), Some("transaction_hash"));
        assert!(err.store_error().is_none());
        assert!(err.to_string().starts_with("[txdb] decode hash \"abc123\""));
    }

    #[test]
    fn test_phase_labels() {
        let err = TxDbError::Rows { source: StoreError::DataInconsistency("cursor".to_string()) };
        assert_eq!(err.to_string(), "[txdb] rows: data inconsistency: cursor");
        assert_eq!(ErrorPhase::Decode.to_string(), "decode hash");

        let err = TxDbError::from(StoreError::KeyAlreadyExists("k".to_string()));
        assert_eq!(err.phase(), ErrorPhase::Store);
        assert!(err.store_error().unwrap().is_already_exists());
    }
}
