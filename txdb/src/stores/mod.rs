pub mod account_utxos;
pub mod store_manager;
pub mod unspent_outputs;
