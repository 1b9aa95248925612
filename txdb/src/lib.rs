//! Durable unspent output index.
//!
//! Two read operations sit on top of the rocksdb stores: [`lookup::lookup_output`] resolves a single
//! outpoint to its committed output, and [`index::list_utxos`] lists the unspent outputs owned by an
//! account/asset pair together with their reservation expiry. [`TxDb`] wires both to an opened database,
//! and [`api::TxDbProxy`] exposes them to async callers.

pub mod api;
pub mod config;
pub mod errors;
pub mod index;
pub mod lookup;
pub mod model;
pub mod stores;
pub mod test_helpers;
mod txdb;

pub use crate::txdb::TxDb;

const IDENT: &str = "txdb";
