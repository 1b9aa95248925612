//! Helpers for populating a txdb in tests.

use chrono::{DateTime, FixedOffset};
use ledger_hashes::{HASH_SIZE, Hash};
use rand::{Rng, RngCore};

use crate::model::{Outpoint, UtxoRecord};

pub fn generate_random_hash(rng: &mut impl RngCore) -> Hash {
    let mut bytes = [0u8; HASH_SIZE];
    rng.fill_bytes(&mut bytes);
    Hash::from_bytes(bytes)
}

pub fn generate_random_outpoint(rng: &mut impl RngCore) -> Outpoint {
    Outpoint::new(generate_random_hash(rng), rng.r#gen::<u8>() as u32)
}

/// Builds a record with a random script and address index for `(account_id, asset_id)`.
pub fn generate_random_record(rng: &mut impl RngCore, account_id: &str, asset_id: &str, amount: u64) -> UtxoRecord {
    let script = (0..rng.gen_range(1..40)).map(|_| rng.r#gen()).collect();
    UtxoRecord::new(generate_random_outpoint(rng), account_id.to_string(), asset_id.to_string(), amount)
        .with_script(script)
        .with_owner(format!("mnode{}", rng.gen_range(0..4)), [rng.r#gen(), rng.r#gen()])
}

/// Parses an RFC 3339 timestamp, keeping its offset.
///
/// # Panics
/// Panics if `timestamp` is not valid RFC 3339.
pub fn timestamp(timestamp: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(timestamp).expect("test timestamps are valid RFC 3339")
}
