use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use ledger_core::info;
use ledger_database::prelude::{ConnBuilder, DB, StoreError};

use crate::{
    IDENT,
    api::TxDbApi,
    config::TxDbConfig,
    errors::TxDbResult,
    index, lookup,
    model::{AccountUtxo, Outpoint, OwnedOutput, Output, UtxoRecord},
    stores::store_manager::Store,
};

/// Durable unspent output index over a rocksdb database.
///
/// Reads take `&self` and may run concurrently; each call opens and releases its own cursor.
#[derive(Clone)]
pub struct TxDb {
    store: Store,
}

impl TxDb {
    /// Creates a [`TxDb`] over an already opened database.
    pub fn new(db: Arc<DB>) -> Self {
        Self { store: Store::new(db) }
    }

    /// Opens (or creates) the database described by `config`.
    pub fn open(config: &TxDbConfig) -> TxDbResult<Self> {
        info!("[{0}] opening database at {1}", IDENT, config.db_dir.display());
        let db = ConnBuilder::default()
            .with_db_path(config.db_dir.clone())
            .with_create_if_missing(config.create_if_missing)
            .with_parallelism(config.parallelism)
            .with_mem_budget(config.mem_budget)
            .with_files_limit(config.files_limit)
            .build()
            .map_err(StoreError::from)?;
        Ok(Self::new(db))
    }
}

impl TxDbApi for TxDb {
    fn lookup_output(&self, outpoint: &Outpoint) -> TxDbResult<Option<Output>> {
        lookup::lookup_output(self.store.unspent_outputs(), outpoint)
    }

    fn lookup_outputs(&self, outpoints: &[Outpoint]) -> TxDbResult<Vec<Option<Output>>> {
        lookup::lookup_outputs(self.store.unspent_outputs(), outpoints)
    }

    fn lookup_owned_output(&self, outpoint: &Outpoint) -> TxDbResult<Option<OwnedOutput>> {
        lookup::lookup_owned_output(self.store.unspent_outputs(), outpoint)
    }

    fn list_utxos(&self, account_id: &str, asset_id: &str) -> TxDbResult<Vec<AccountUtxo>> {
        index::list_utxos(self.store.account_utxos(), account_id, asset_id)
    }

    fn insert_utxo(&mut self, record: &UtxoRecord) -> TxDbResult<()> {
        Ok(self.store.insert_utxo(record)?)
    }

    fn remove_utxo(&mut self, outpoint: &Outpoint) -> TxDbResult<UtxoRecord> {
        Ok(self.store.remove_utxo(outpoint)?)
    }

    fn set_reservation(&mut self, outpoint: &Outpoint, reserved_until: Option<DateTime<FixedOffset>>) -> TxDbResult<()> {
        Ok(self.store.set_reservation(outpoint, reserved_until)?)
    }
}
