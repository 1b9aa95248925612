use super::{AccountId, AssetId, Outpoint, OutputIndex, UtxoRecord};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// An unspent output owned by an account/asset pair, as returned by the account index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountUtxo {
    pub account_id: AccountId,
    pub asset_id: AssetId,
    pub outpoint: Outpoint,
    pub amount: u64,
    /// Advisory lock set by the allocator. `None` when the output is not reserved.
    ///
    /// The stored value is surfaced as is and never compared to the current time: an expiry in the past,
    /// the Unix epoch included, is a lapsed reservation and allocators treat it like `None`.
    pub reservation_expiry: Option<DateTime<Utc>>,
}

/// The columns the account index reads for each row. The transaction hash is kept in its string form
/// and parsed when the row is listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUtxoRow {
    pub amount: u64,
    pub reserved_until: Option<DateTime<FixedOffset>>,
    pub transaction_hash: String,
    pub index: OutputIndex,
}

impl From<&UtxoRecord> for AccountUtxoRow {
    fn from(record: &UtxoRecord) -> Self {
        Self {
            amount: record.amount,
            reserved_until: record.reserved_until,
            transaction_hash: record.outpoint.transaction_hash.to_string(),
            index: record.outpoint.index,
        }
    }
}
