use super::{AccountId, AssetId, Outpoint, UtxoRecord};

/// Two level derivation index of the address an output pays to.
pub type AddressIndex = [u32; 2];

/// The committed on-chain state of an outpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub outpoint: Outpoint,
    pub asset_id: AssetId,
    /// Value in the asset's smallest unit
    pub amount: u64,
    pub script: Vec<u8>,
    pub metadata: Vec<u8>,
    /// Always `false` for outputs read from the index, which only holds unspent outputs
    pub spent: bool,
}

impl Output {
    /// Builds the output view of `record`. The outpoint is taken from the caller, not from the record.
    pub fn from_record(outpoint: Outpoint, record: UtxoRecord) -> Self {
        Self { outpoint, asset_id: record.asset_id, amount: record.amount, script: record.script, metadata: record.metadata, spent: false }
    }
}

/// An [`Output`] together with the ownership details it was recorded with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedOutput {
    pub output: Output,
    pub manager_node_id: String,
    pub account_id: AccountId,
    pub address_index: AddressIndex,
}

impl OwnedOutput {
    pub fn from_record(outpoint: Outpoint, mut record: UtxoRecord) -> Self {
        let manager_node_id = std::mem::take(&mut record.manager_node_id);
        let account_id = std::mem::take(&mut record.account_id);
        let address_index = record.address_index;
        Self { output: Output::from_record(outpoint, record), manager_node_id, account_id, address_index }
    }
}
