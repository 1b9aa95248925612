extern crate self as ledger_core;

pub mod log;
pub mod time;
