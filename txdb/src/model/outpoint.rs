use ledger_hashes::Hash;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub type OutputIndex = u32;

/// Identity of a transaction output: the hash of the transaction that created it and its position in that transaction.
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Outpoint {
    pub transaction_hash: Hash,
    pub index: OutputIndex,
}

impl Outpoint {
    pub fn new(transaction_hash: Hash, index: OutputIndex) -> Self {
        Self { transaction_hash, index }
    }
}

impl Display for Outpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_hash, self.index)
    }
}
