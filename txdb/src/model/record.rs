use super::{AccountId, AddressIndex, AssetId, Outpoint};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A full unspent output row as written by the confirmation writer.
///
/// `reserved_until` keeps the offset it was written with; readers normalize it to UTC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoRecord {
    pub outpoint: Outpoint,
    pub account_id: AccountId,
    pub asset_id: AssetId,
    pub amount: u64,
    pub script: Vec<u8>,
    pub metadata: Vec<u8>,
    pub reserved_until: Option<DateTime<FixedOffset>>,
    pub manager_node_id: String,
    pub address_index: AddressIndex,
}

impl UtxoRecord {
    pub fn new(outpoint: Outpoint, account_id: AccountId, asset_id: AssetId, amount: u64) -> Self {
        Self {
            outpoint,
            account_id,
            asset_id,
            amount,
            script: Vec::new(),
            metadata: Vec::new(),
            reserved_until: None,
            manager_node_id: String::new(),
            address_index: [0, 0],
        }
    }

    pub fn with_script(self, script: Vec<u8>) -> Self {
        Self { script, ..self }
    }

    pub fn with_metadata(self, metadata: Vec<u8>) -> Self {
        Self { metadata, ..self }
    }

    pub fn with_reservation(self, reserved_until: DateTime<FixedOffset>) -> Self {
        Self { reserved_until: Some(reserved_until), ..self }
    }

    pub fn with_owner(self, manager_node_id: String, address_index: AddressIndex) -> Self {
        Self { manager_node_id, address_index, ..self }
    }
}
