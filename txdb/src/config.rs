use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ConfigError, TxDbResult};

const MB: usize = 1024 * 1024;

/// Settings used to open the rocksdb database backing a [`TxDb`](crate::TxDb).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TxDbConfig {
    pub db_dir: PathBuf,
    pub create_if_missing: bool,
    /// Number of background threads used by rocksdb
    pub parallelism: usize,
    /// Memtable budget in bytes
    pub mem_budget: usize,
    /// Maximum number of open files
    pub files_limit: i32,
}

impl Default for TxDbConfig {
    fn default() -> Self {
        Self { db_dir: PathBuf::from("txdb"), create_if_missing: true, parallelism: 1, mem_budget: 64 * MB, files_limit: 128 }
    }
}

impl TxDbConfig {
    pub fn with_db_dir(self, db_dir: impl Into<PathBuf>) -> Self {
        Self { db_dir: db_dir.into(), ..self }
    }

    pub fn from_toml_str(toml_str: &str) -> TxDbResult<Self> {
        Ok(toml::from_str(toml_str).map_err(ConfigError::from)?)
    }

    pub fn load(path: impl AsRef<Path>) -> TxDbResult<Self> {
        let path = path.as_ref();
        let toml_str =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorPhase;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TxDbConfig::from_toml_str(
            r#"
            db_dir = "/var/lib/ledger/txdb"
            files_limit = 512
            "#,
        )
        .unwrap();
        assert_eq!(config.db_dir, PathBuf::from("/var/lib/ledger/txdb"));
        assert_eq!(config.files_limit, 512);
        assert_eq!(config.mem_budget, TxDbConfig::default().mem_budget);
        assert!(config.create_if_missing);

        assert_eq!(TxDbConfig::from_toml_str("").unwrap(), TxDbConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = TxDbConfig::from_toml_str("parallelism = \"many\"").unwrap_err();
        assert_eq!(err.phase(), ErrorPhase::Config);

        let err = TxDbConfig::from_toml_str("cache_size = 10").unwrap_err();
        assert_eq!(err.phase(), ErrorPhase::Config);

        let dir = tempfile::tempdir().unwrap();
        let err = TxDbConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("txdb.toml");
        std::fs::write(&path, "parallelism = 4\ncreate_if_missing = false\n").unwrap();

        let config = TxDbConfig::load(&path).unwrap();
        assert_eq!(config.parallelism, 4);
        assert!(!config.create_if_missing);
    }
}
