use ledger_database::{create_temp_db, prelude::ConnBuilder};
use ledger_txdb::{
    TxDb,
    api::{TxDbApi, TxDbProxy},
    errors::ErrorPhase,
    test_helpers::{generate_random_outpoint, generate_random_record, timestamp},
};
use parking_lot::RwLock;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;

#[tokio::test]
async fn test_proxy_reads_and_writes() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let txdb: Arc<RwLock<dyn TxDbApi>> = Arc::new(RwLock::new(TxDb::new(db)));
    let proxy = TxDbProxy::new(txdb.clone());
    let mut rng = StdRng::seed_from_u64(11);

    let record = generate_random_record(&mut rng, "acct1", "USD", 500);
    proxy.clone().insert_utxo(record.clone()).await.unwrap();

    let output = proxy.clone().lookup_output(record.outpoint).await.unwrap().unwrap();
    assert_eq!(output.amount, 500);
    assert!(!output.spent);

    let missing = generate_random_outpoint(&mut rng);
    let outputs = proxy.clone().lookup_outputs(vec![missing, record.outpoint]).await.unwrap();
    assert_eq!(outputs.iter().map(Option::is_some).collect::<Vec<_>>(), vec![false, true]);

    let owned = proxy.clone().lookup_owned_output(record.outpoint).await.unwrap().unwrap();
    assert_eq!(owned.manager_node_id, record.manager_node_id);

    let expiry = timestamp("2040-02-02T02:02:02-03:00");
    proxy.clone().set_reservation(record.outpoint, Some(expiry)).await.unwrap();
    let utxos = proxy.clone().list_utxos("acct1".to_string(), "USD".to_string()).await.unwrap();
    assert_eq!(utxos.len(), 1);
    assert_eq!(utxos[0].reservation_expiry.unwrap(), expiry);

    proxy.clone().remove_utxo(record.outpoint).await.unwrap();
    assert!(proxy.clone().lookup_output(record.outpoint).await.unwrap().is_none());
    let err = proxy.clone().remove_utxo(record.outpoint).await.unwrap_err();
    assert_eq!(err.phase(), ErrorPhase::Store);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_proxy_concurrent_listing() {
    let (_lifetime, db) = create_temp_db!(ConnBuilder::default().with_files_limit(10));
    let mut txdb = TxDb::new(db);
    let mut rng = StdRng::seed_from_u64(12);
    for i in 0..30 {
        txdb.insert_utxo(&generate_random_record(&mut rng, &format!("acct{}", i % 3), "EUR", i)).unwrap();
    }
    let proxy = TxDbProxy::new(Arc::new(RwLock::new(txdb)));

    let tasks: Vec<_> =
        (0..12).map(|i| tokio::spawn(proxy.clone().list_utxos(format!("acct{}", i % 3), "EUR".to_string()))).collect();
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().len(), 10);
    }
}
