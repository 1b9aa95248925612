use chrono::{DateTime, FixedOffset};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::{
    errors::TxDbResult,
    model::{AccountUtxo, Outpoint, OwnedOutput, Output, UtxoRecord},
};

/// Unspent output index API.
pub trait TxDbApi: Send + Sync {
    // Retrieval

    /// Returns the committed output of `outpoint`, or `None` if it is not an unspent output.
    fn lookup_output(&self, outpoint: &Outpoint) -> TxDbResult<Option<Output>>;

    fn lookup_outputs(&self, outpoints: &[Outpoint]) -> TxDbResult<Vec<Option<Output>>>;

    fn lookup_owned_output(&self, outpoint: &Outpoint) -> TxDbResult<Option<OwnedOutput>>;

    /// Returns the unspent outputs owned by `(account_id, asset_id)`, reservation expiries in UTC.
    fn list_utxos(&self, account_id: &str, asset_id: &str) -> TxDbResult<Vec<AccountUtxo>>;

    // Maintenance, used by the confirmation writer and the allocator

    fn insert_utxo(&mut self, record: &UtxoRecord) -> TxDbResult<()>;

    fn remove_utxo(&mut self, outpoint: &Outpoint) -> TxDbResult<UtxoRecord>;

    fn set_reservation(&mut self, outpoint: &Outpoint, reserved_until: Option<DateTime<FixedOffset>>) -> TxDbResult<()>;
}

/// Async proxy for the txdb. Calls run on tokio's blocking pool.
#[derive(Clone)]
pub struct TxDbProxy {
    inner: Arc<RwLock<dyn TxDbApi>>,
}

impl TxDbProxy {
    pub fn new(inner: Arc<RwLock<dyn TxDbApi>>) -> Self {
        Self { inner }
    }

    pub async fn lookup_output(self, outpoint: Outpoint) -> TxDbResult<Option<Output>> {
        spawn_blocking(move || self.inner.read().lookup_output(&outpoint)).await
    }

    pub async fn lookup_outputs(self, outpoints: Vec<Outpoint>) -> TxDbResult<Vec<Option<Output>>> {
        spawn_blocking(move || self.inner.read().lookup_outputs(&outpoints)).await
    }

    pub async fn lookup_owned_output(self, outpoint: Outpoint) -> TxDbResult<Option<OwnedOutput>> {
        spawn_blocking(move || self.inner.read().lookup_owned_output(&outpoint)).await
    }

    pub async fn list_utxos(self, account_id: String, asset_id: String) -> TxDbResult<Vec<AccountUtxo>> {
        spawn_blocking(move || self.inner.read().list_utxos(&account_id, &asset_id)).await
    }

    pub async fn insert_utxo(self, record: UtxoRecord) -> TxDbResult<()> {
        spawn_blocking(move || self.inner.write().insert_utxo(&record)).await
    }

    pub async fn remove_utxo(self, outpoint: Outpoint) -> TxDbResult<UtxoRecord> {
        spawn_blocking(move || self.inner.write().remove_utxo(&outpoint)).await
    }

    pub async fn set_reservation(self, outpoint: Outpoint, reserved_until: Option<DateTime<FixedOffset>>) -> TxDbResult<()> {
        spawn_blocking(move || self.inner.write().set_reservation(&outpoint, reserved_until)).await
    }
}

/// Runs `f` on the blocking pool, resuming its panic on the caller if it panicked.
async fn spawn_blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(res) => res,
        Err(err) => std::panic::resume_unwind(err.into_panic()),
    }
}
