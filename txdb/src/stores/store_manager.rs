use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use ledger_core::trace;
use ledger_database::prelude::{BatchDbWriter, DB, StoreResult};
use rocksdb::WriteBatch;

use crate::{
    IDENT,
    model::{AccountUtxoRow, Outpoint, UtxoRecord},
    stores::{
        account_utxos::{AccountUtxoStore, DbAccountUtxoStore},
        unspent_outputs::{DbUnspentOutputsStore, UnspentOutputsStore, UnspentOutputsStoreReader},
    },
};

/// Owns the two unspent output key spaces and keeps them consistent: every write touches both in one batch.
#[derive(Clone)]
pub struct Store {
    db: Arc<DB>,
    unspent_outputs_store: DbUnspentOutputsStore,
    account_utxos_store: DbAccountUtxoStore,
}

impl Store {
    pub fn new(db: Arc<DB>) -> Self {
        Self {
            unspent_outputs_store: DbUnspentOutputsStore::new(db.clone()),
            account_utxos_store: DbAccountUtxoStore::new(db.clone()),
            db,
        }
    }

    pub fn unspent_outputs(&self) -> &DbUnspentOutputsStore {
        &self.unspent_outputs_store
    }

    pub fn account_utxos(&self) -> &DbAccountUtxoStore {
        &self.account_utxos_store
    }

    pub fn insert_utxo(&mut self, record: &UtxoRecord) -> StoreResult<()> {
        trace!("[{0}] inserting utxo {1} for account {2} asset {3}", IDENT, record.outpoint, record.account_id, record.asset_id);
        let mut batch = WriteBatch::default();
        self.unspent_outputs_store.insert(BatchDbWriter::new(&mut batch), record)?;
        self.account_utxos_store.insert_row(
            BatchDbWriter::new(&mut batch),
            &record.account_id,
            &record.asset_id,
            &record.outpoint,
            &AccountUtxoRow::from(record),
        )?;
        self.db.write(batch)?;
        Ok(())
    }

    /// Removes a spent output from both key spaces and returns its last record.
    pub fn remove_utxo(&mut self, outpoint: &Outpoint) -> StoreResult<UtxoRecord> {
        trace!("[{0}] removing utxo {1}", IDENT, outpoint);
        let record = self.unspent_outputs_store.get(outpoint)?;
        let mut batch = WriteBatch::default();
        self.unspent_outputs_store.delete(BatchDbWriter::new(&mut batch), outpoint)?;
        self.account_utxos_store.delete_row(BatchDbWriter::new(&mut batch), &record.account_id, &record.asset_id, outpoint)?;
        self.db.write(batch)?;
        Ok(record)
    }

    pub fn set_reservation(&mut self, outpoint: &Outpoint, reserved_until: Option<DateTime<FixedOffset>>) -> StoreResult<()> {
        trace!("[{0}] setting reservation of utxo {1} to {2:?}", IDENT, outpoint, reserved_until);
        let mut record = self.unspent_outputs_store.get(outpoint)?;
        record.reserved_until = reserved_until;
        let mut batch = WriteBatch::default();
        self.unspent_outputs_store.update(BatchDbWriter::new(&mut batch), &record)?;
        self.account_utxos_store.insert_row(
            BatchDbWriter::new(&mut batch),
            &record.account_id,
            &record.asset_id,
            outpoint,
            &AccountUtxoRow::from(&record),
        )?;
        self.db.write(batch)?;
        Ok(())
    }
}
