use crate::{
    model::{AccountUtxoRow, Outpoint},
    stores::unspent_outputs::OutpointKey,
};

use ledger_database::{
    prelude::{DB, DbKey, DbWriter, StoreError, StoreResult},
    registry::DatabaseStorePrefixes,
};
use rocksdb::{DBRawIteratorWithThreadMode, ReadOptions};
use std::{mem::size_of, sync::Arc};

// Buckets:

/// [`AccountAssetBucket`].
/// Consists of the 4 byte big endian length of the account id, the account id, then the same for the asset id.
/// The lengths keep a bucket from being a prefix of another one, e.g. `acct1` of `acct10`.
#[derive(Eq, Hash, PartialEq, Debug, Clone)]
pub struct AccountAssetBucket(Vec<u8>);

impl AccountAssetBucket {
    pub fn new(account_id: &str, asset_id: &str) -> Self {
        let mut bytes = Vec::with_capacity(2 * size_of::<u32>() + account_id.len() + asset_id.len());
        for part in [account_id, asset_id] {
            bytes.extend_from_slice(&(part.len() as u32).to_be_bytes());
            bytes.extend_from_slice(part.as_bytes());
        }
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountAssetBucket {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Traits:

/// A forward only row cursor over the rows of one account/asset pair.
pub trait AccountUtxoCursor {
    /// Moves to the next row. Returns `false` once the rows are exhausted or the cursor failed,
    /// in which case [`AccountUtxoCursor::status`] reports the failure.
    fn advance(&mut self) -> bool;

    /// Decodes the row the cursor is positioned on.
    fn scan(&self) -> StoreResult<AccountUtxoRow>;

    fn status(&self) -> StoreResult<()>;
}

pub trait AccountUtxoStoreReader {
    type Cursor<'a>: AccountUtxoCursor
    where
        Self: 'a;

    /// Opens a cursor over every row stored for the `(account_id, asset_id)` pair.
    fn query(&self, account_id: &str, asset_id: &str) -> StoreResult<Self::Cursor<'_>>;
}

pub trait AccountUtxoStore: AccountUtxoStoreReader {
    fn insert_row(
        &mut self,
        writer: impl DbWriter,
        account_id: &str,
        asset_id: &str,
        outpoint: &Outpoint,
        row: &AccountUtxoRow,
    ) -> StoreResult<()>;

    fn delete_row(&mut self, writer: impl DbWriter, account_id: &str, asset_id: &str, outpoint: &Outpoint) -> StoreResult<()>;
}

// Implementations:

#[derive(Clone)]
pub struct DbAccountUtxoStore {
    db: Arc<DB>,
    prefix: Vec<u8>,
}

impl DbAccountUtxoStore {
    pub fn new(db: Arc<DB>) -> Self {
        Self { db, prefix: DatabaseStorePrefixes::AccountUtxos.into() }
    }

    fn bucket_key(&self, account_id: &str, asset_id: &str) -> DbKey {
        let mut db_key = DbKey::prefix_only(&self.prefix);
        db_key.add_bucket(AccountAssetBucket::new(account_id, asset_id));
        db_key
    }

    fn row_key(&self, account_id: &str, asset_id: &str, outpoint: &Outpoint) -> DbKey {
        let mut db_key = self.bucket_key(account_id, asset_id);
        db_key.add_key(OutpointKey::from(outpoint));
        db_key
    }
}

pub struct DbAccountUtxoCursor<'a> {
    iter: DBRawIteratorWithThreadMode<'a, DB>,
    bucket_key: DbKey,
    positioned: bool,
}

impl AccountUtxoCursor for DbAccountUtxoCursor<'_> {
    fn advance(&mut self) -> bool {
        if self.positioned {
            self.iter.next();
        } else {
            self.positioned = true;
        }
        self.iter.key().is_some_and(|key| key.starts_with(self.bucket_key.as_ref()))
    }

    fn scan(&self) -> StoreResult<AccountUtxoRow> {
        match self.iter.value() {
            Some(bin_data) => Ok(bincode::deserialize(bin_data)?),
            None => Err(StoreError::DataInconsistency(format!("cursor over {} is not positioned on a row", self.bucket_key))),
        }
    }

    fn status(&self) -> StoreResult<()> {
        Ok(self.iter.status()?)
    }
}

impl AccountUtxoStoreReader for DbAccountUtxoStore {
    type Cursor<'a> = DbAccountUtxoCursor<'a>;

    fn query(&self, account_id: &str, asset_id: &str) -> StoreResult<Self::Cursor<'_>> {
        let bucket_key = self.bucket_key(account_id, asset_id);
        let mut read_opts = ReadOptions::default();
        read_opts.set_iterate_range(rocksdb::PrefixRange(bucket_key.as_ref()));

        let mut iter = self.db.raw_iterator_opt(read_opts);
        iter.seek(&bucket_key);
        iter.status()?;
        Ok(DbAccountUtxoCursor { iter, bucket_key, positioned: false })
    }
}

impl AccountUtxoStore for DbAccountUtxoStore {
    fn insert_row(
        &mut self,
        mut writer: impl DbWriter,
        account_id: &str,
        asset_id: &str,
        outpoint: &Outpoint,
        row: &AccountUtxoRow,
    ) -> StoreResult<()> {
        let bin_data = bincode::serialize(row)?;
        writer.put(self.row_key(account_id, asset_id, outpoint), bin_data)?;
        Ok(())
    }

    fn delete_row(&mut self, mut writer: impl DbWriter, account_id: &str, asset_id: &str, outpoint: &Outpoint) -> StoreResult<()> {
        writer.delete(self.row_key(account_id, asset_id, outpoint))?;
        Ok(())
    }
}
