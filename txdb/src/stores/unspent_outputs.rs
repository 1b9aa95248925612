use crate::model::{Outpoint, OutputIndex, UtxoRecord};

use ledger_database::{
    prelude::{DB, DbKey, DbWriter, StoreError, StoreResult},
    registry::DatabaseStorePrefixes,
};
use ledger_hashes::HASH_SIZE;
use std::{mem::size_of, sync::Arc};

// Keys:

/// Size of the [OutpointKey] in bytes.
pub const OUTPOINT_KEY_SIZE: usize = HASH_SIZE + size_of::<OutputIndex>();

/// [Outpoint] key: 32 bytes of transaction hash followed by 4 bytes of big endian [OutputIndex],
/// so that the outputs of a transaction are laid out in index order.
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone)]
pub struct OutpointKey([u8; OUTPOINT_KEY_SIZE]);

impl From<&Outpoint> for OutpointKey {
    fn from(outpoint: &Outpoint) -> Self {
        let mut bytes = [0; OUTPOINT_KEY_SIZE];
        bytes[..HASH_SIZE].copy_from_slice(&outpoint.transaction_hash.as_bytes());
        bytes[HASH_SIZE..].copy_from_slice(&outpoint.index.to_be_bytes());
        Self(bytes)
    }
}

impl AsRef<[u8]> for OutpointKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Traits:

pub trait UnspentOutputsStoreReader {
    /// Fetches the record stored for `outpoint`. A missing outpoint is [`StoreError::KeyNotFound`].
    fn get(&self, outpoint: &Outpoint) -> StoreResult<UtxoRecord>;

    fn has(&self, outpoint: &Outpoint) -> StoreResult<bool>;
}

pub trait UnspentOutputsStore: UnspentOutputsStoreReader {
    /// Writes a record for an outpoint which is not in the store yet.
    fn insert(&mut self, writer: impl DbWriter, record: &UtxoRecord) -> StoreResult<()>;

    /// Overwrites the record of an existing outpoint.
    fn update(&mut self, writer: impl DbWriter, record: &UtxoRecord) -> StoreResult<()>;

    fn delete(&mut self, writer: impl DbWriter, outpoint: &Outpoint) -> StoreResult<()>;
}

// Implementations:

#[derive(Clone)]
pub struct DbUnspentOutputsStore {
    db: Arc<DB>,
    prefix: Vec<u8>,
}

impl DbUnspentOutputsStore {
    pub fn new(db: Arc<DB>) -> Self {
        Self { db, prefix: DatabaseStorePrefixes::UnspentOutputs.into() }
    }

    fn key(&self, outpoint: &Outpoint) -> DbKey {
        DbKey::new(&self.prefix, OutpointKey::from(outpoint))
    }

    fn put(&self, mut writer: impl DbWriter, record: &UtxoRecord) -> StoreResult<()> {
        let bin_data = bincode::serialize(record)?;
        writer.put(self.key(&record.outpoint), bin_data)?;
        Ok(())
    }
}

impl UnspentOutputsStoreReader for DbUnspentOutputsStore {
    fn get(&self, outpoint: &Outpoint) -> StoreResult<UtxoRecord> {
        let db_key = self.key(outpoint);
        match self.db.get_pinned(&db_key)? {
            Some(slice) => Ok(bincode::deserialize(&slice)?),
            None => Err(StoreError::KeyNotFound(db_key)),
        }
    }

    fn has(&self, outpoint: &Outpoint) -> StoreResult<bool> {
        Ok(self.db.get_pinned(self.key(outpoint))?.is_some())
    }
}

impl UnspentOutputsStore for DbUnspentOutputsStore {
    fn insert(&mut self, writer: impl DbWriter, record: &UtxoRecord) -> StoreResult<()> {
        if self.has(&record.outpoint)? {
            return Err(StoreError::KeyAlreadyExists(self.key(&record.outpoint).to_string()));
        }
        self.put(writer, record)
    }

    fn update(&mut self, writer: impl DbWriter, record: &UtxoRecord) -> StoreResult<()> {
        self.put(writer, record)
    }

    fn delete(&mut self, mut writer: impl DbWriter, outpoint: &Outpoint) -> StoreResult<()> {
        writer.delete(self.key(outpoint))?;
        Ok(())
    }
}
