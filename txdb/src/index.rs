//! Account UTXO index: the unspent outputs owned by an account/asset pair.

use chrono::Utc;
use ledger_core::{time::Stopwatch, trace};
use ledger_hashes::Hash;
use std::str::FromStr;

use crate::{
    IDENT,
    errors::{TxDbError, TxDbResult},
    model::{AccountUtxo, Outpoint},
    stores::account_utxos::{AccountUtxoCursor, AccountUtxoStoreReader},
};

/// Lists every unspent output stored for `(account_id, asset_id)`, with reservation expiries in UTC.
///
/// The identifiers are opaque and matched exactly. No rows yield an empty list. A row whose transaction hash
/// does not parse fails the whole call, as does any cursor failure, including one reported after the last row.
/// Pending spends are not taken into account and expiries are never compared to the current time.
pub fn list_utxos<S>(store: &S, account_id: &str, asset_id: &str) -> TxDbResult<Vec<AccountUtxo>>
where
    S: AccountUtxoStoreReader + ?Sized,
{
    let _sw = Stopwatch::<500>::with_threshold("list_utxos op");
    trace!("[{0}] listing utxos of account {1} asset {2}", IDENT, account_id, asset_id);

    let mut cursor = store.query(account_id, asset_id).map_err(|source| TxDbError::Query { source })?;
    let mut utxos = Vec::new();
    while cursor.advance() {
        let row = cursor.scan().map_err(|source| TxDbError::Scan { source })?;
        let transaction_hash = match Hash::from_str(&row.transaction_hash) {
            Ok(hash) => hash,
            Err(source) => return Err(TxDbError::DecodeHash { value: row.transaction_hash, source }),
        };
        utxos.push(AccountUtxo {
            account_id: account_id.to_owned(),
            asset_id: asset_id.to_owned(),
            outpoint: Outpoint::new(transaction_hash, row.index),
            amount: row.amount,
            reservation_expiry: row.reserved_until.map(|expiry| expiry.with_timezone(&Utc)),
        });
    }
    cursor.status().map_err(|source| TxDbError::Rows { source })?;

    trace!("[{0}] found {1} utxos of account {2} asset {3}", IDENT, utxos.len(), account_id, asset_id);
    Ok(utxos)
}
