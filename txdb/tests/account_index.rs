use chrono::{TimeZone, Utc};
use ledger_core::log::try_init_logger;
use ledger_database::{
    create_temp_db,
    prelude::{ConnBuilder, DirectDbWriter},
};
use ledger_hashes::Hash;
use ledger_txdb::{
    TxDb,
    api::TxDbApi,
    errors::{ErrorPhase, TxDbError},
    model::{AccountUtxoRow, Outpoint, UtxoRecord},
    stores::account_utxos::{AccountUtxoStore, DbAccountUtxoStore},
    test_helpers::{generate_random_hash, generate_random_record, timestamp},
};
use rand::{SeedableRng, rngs::StdRng};
use std::{collections::HashSet, sync::Arc, thread};

fn record(hash: Hash, index: u32, account_id: &str, asset_id: &str, amount: u64) -> UtxoRecord {
    UtxoRecord::new(Outpoint::new(hash, index), account_id.to_string(), asset_id.to_string(), amount)
}

#[test]
fn test_account_scenario() {
    try_init_logger("info,ledger_txdb=trace");
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db);
    let mut rng = StdRng::seed_from_u64(1);

    let expiry = Utc.with_ymd_and_hms(2099, 6, 30, 18, 45, 0).unwrap();
    let unreserved = record(generate_random_hash(&mut rng), 0, "acct1", "USD", 100);
    let reserved = record(generate_random_hash(&mut rng), 1, "acct1", "USD", 200).with_reservation(expiry.fixed_offset());
    txdb.insert_utxo(&unreserved).unwrap();
    txdb.insert_utxo(&reserved).unwrap();

    let mut utxos = txdb.list_utxos("acct1", "USD").unwrap();
    utxos.sort_by_key(|utxo| utxo.amount);
    assert_eq!(utxos.len(), 2);

    assert_eq!(utxos[0].outpoint, unreserved.outpoint);
    assert_eq!(utxos[0].amount, 100);
    assert_eq!(utxos[0].reservation_expiry, None);

    assert_eq!(utxos[1].outpoint, reserved.outpoint);
    assert_eq!(utxos[1].amount, 200);
    assert_eq!(utxos[1].reservation_expiry, Some(expiry));
    assert!(utxos.iter().all(|utxo| utxo.account_id == "acct1" && utxo.asset_id == "USD"));
}

#[test]
fn test_no_matching_rows() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db);
    let mut rng = StdRng::seed_from_u64(2);

    assert!(txdb.list_utxos("acct1", "USD").unwrap().is_empty());

    txdb.insert_utxo(&generate_random_record(&mut rng, "acct1", "EUR", 1)).unwrap();
    txdb.insert_utxo(&generate_random_record(&mut rng, "acct10", "USD", 1)).unwrap();
    txdb.insert_utxo(&generate_random_record(&mut rng, "acct", "1USD", 1)).unwrap();
    assert!(txdb.list_utxos("acct1", "USD").unwrap().is_empty());
    assert!(txdb.list_utxos("", "").unwrap().is_empty());
}

#[test]
fn test_expiry_is_normalized_to_utc() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db);
    let mut rng = StdRng::seed_from_u64(3);

    let stored = [
        "2030-01-01T12:00:00+00:00",
        "2030-01-01T14:00:00+02:00",
        "2030-01-01T06:30:00-05:30",
        "2030-01-01T21:00:00+09:00",
        "1970-01-01T00:00:00+00:00",
    ];
    let mut expected = HashSet::new();
    for (i, ts) in stored.iter().enumerate() {
        let record = generate_random_record(&mut rng, "acct1", "USD", i as u64).with_reservation(timestamp(ts));
        expected.insert((record.outpoint, record.amount, timestamp(ts).with_timezone(&Utc)));
        txdb.insert_utxo(&record).unwrap();
    }

    let utxos = txdb.list_utxos("acct1", "USD").unwrap();
    assert_eq!(utxos.len(), stored.len());
    let actual: HashSet<_> = utxos
        .iter()
        .map(|utxo| {
            let expiry = utxo.reservation_expiry.expect("every stored row is reserved");
            assert_eq!(expiry.timezone(), Utc);
            (utxo.outpoint, utxo.amount, expiry)
        })
        .collect();
    assert_eq!(actual, expected);

    // the first four rows are the same instant
    let noon = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(utxos.iter().filter(|utxo| utxo.reservation_expiry == Some(noon)).count(), 4);
    // the epoch is surfaced as is, never treated as expired or unreserved
    assert_eq!(utxos.iter().filter(|utxo| utxo.reservation_expiry == Some(Utc.timestamp_opt(0, 0).unwrap())).count(), 1);
}

#[test]
fn test_reservation_and_spend_updates() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db);
    let mut rng = StdRng::seed_from_u64(4);

    let records: Vec<_> = (0..5).map(|i| generate_random_record(&mut rng, "acct7", "BTC", 1000 + i)).collect();
    for record in records.iter() {
        txdb.insert_utxo(record).unwrap();
    }

    let expiry = timestamp("2031-03-04T05:06:07+01:00");
    txdb.set_reservation(&records[2].outpoint, Some(expiry)).unwrap();
    let reserved: Vec<_> = txdb.list_utxos("acct7", "BTC").unwrap().into_iter().filter(|utxo| utxo.reservation_expiry.is_some()).collect();
    assert_eq!(reserved.len(), 1);
    assert_eq!(reserved[0].outpoint, records[2].outpoint);
    assert_eq!(reserved[0].reservation_expiry, Some(expiry.with_timezone(&Utc)));

    // the point lookup is not affected by reservations
    assert_eq!(txdb.lookup_output(&records[2].outpoint).unwrap().unwrap().amount, 1002);

    txdb.set_reservation(&records[2].outpoint, None).unwrap();
    assert!(txdb.list_utxos("acct7", "BTC").unwrap().iter().all(|utxo| utxo.reservation_expiry.is_none()));

    txdb.remove_utxo(&records[0].outpoint).unwrap();
    txdb.remove_utxo(&records[4].outpoint).unwrap();
    let remaining: HashSet<_> = txdb.list_utxos("acct7", "BTC").unwrap().into_iter().map(|utxo| utxo.outpoint).collect();
    assert_eq!(remaining, records[1..4].iter().map(|record| record.outpoint).collect::<HashSet<_>>());

    let err = txdb.set_reservation(&records[0].outpoint, Some(expiry)).unwrap_err();
    assert_eq!(err.phase(), ErrorPhase::Store);
}

#[test]
fn test_malformed_hash_fails_the_listing() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db.clone());
    let mut rng = StdRng::seed_from_u64(5);

    for i in 0..3 {
        txdb.insert_utxo(&generate_random_record(&mut rng, "acct1", "USD", i)).unwrap();
    }
    assert_eq!(txdb.list_utxos("acct1", "USD").unwrap().len(), 3);

    let mut store = DbAccountUtxoStore::new(db.clone());
    let outpoint = Outpoint::new(generate_random_hash(&mut rng), 0);
    let row = AccountUtxoRow { amount: 5, reserved_until: None, transaction_hash: "abc123".to_string(), index: 0 };
    store.insert_row(DirectDbWriter::new(&db), "acct1", "USD", &outpoint, &row).unwrap();

    let err = txdb.list_utxos("acct1", "USD").unwrap_err();
    assert_eq!(err.phase(), ErrorPhase::Decode);
    assert_eq!(err.field(), Some("transaction_hash"));
    assert!(matches!(err, TxDbError::DecodeHash { ref value, .. } if value == "abc123"));

    // other pairs are unaffected
    assert!(txdb.list_utxos("acct1", "EUR").unwrap().is_empty());
}

#[test]
fn test_overlong_hash_fails_the_listing() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db.clone());
    let mut rng = StdRng::seed_from_u64(8);

    txdb.insert_utxo(&generate_random_record(&mut rng, "acct2", "USD", 10)).unwrap();

    // a valid hash followed by extra hex digits must not be truncated into a different outpoint
    let mut store = DbAccountUtxoStore::new(db.clone());
    let hash = generate_random_hash(&mut rng);
    let overlong = format!("{}00", hash);
    let row = AccountUtxoRow { amount: 7, reserved_until: None, transaction_hash: overlong.clone(), index: 1 };
    store.insert_row(DirectDbWriter::new(&db), "acct2", "USD", &Outpoint::new(hash, 1), &row).unwrap();

    let err = txdb.list_utxos("acct2", "USD").unwrap_err();
    assert_eq!(err.phase(), ErrorPhase::Decode);
    assert!(matches!(err, TxDbError::DecodeHash { ref value, .. } if *value == overlong));
}

#[test]
fn test_concurrent_reads() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db);
    let mut rng = StdRng::seed_from_u64(6);

    let records: Vec<_> = (0..50).map(|i| generate_random_record(&mut rng, &format!("acct{}", i % 5), "USD", i)).collect();
    for record in records.iter() {
        txdb.insert_utxo(record).unwrap();
    }

    let txdb = Arc::new(txdb);
    let records = Arc::new(records);
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let txdb = txdb.clone();
            let records = records.clone();
            thread::spawn(move || {
                for round in 0..20 {
                    let account = format!("acct{}", (t + round) % 5);
                    assert_eq!(txdb.list_utxos(&account, "USD").unwrap().len(), 10);
                    let record = &records[(t * 7 + round) % records.len()];
                    assert_eq!(txdb.lookup_output(&record.outpoint).unwrap().unwrap().amount, record.amount);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
