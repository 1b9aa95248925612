mod account_utxo;
mod outpoint;
mod output;
mod record;

pub use account_utxo::{AccountUtxo, AccountUtxoRow};
pub use outpoint::{Outpoint, OutputIndex};
pub use output::{AddressIndex, OwnedOutput, Output};
pub use record::UtxoRecord;

/// Opaque account identifier.
pub type AccountId = String;

/// Opaque asset identifier.
pub type AssetId = String;
