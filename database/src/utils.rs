use crate::prelude::DB;
use std::sync::Weak;
use tempfile::TempDir;

/// Keeps a temporary DB directory alive and destroys the DB files once the last strong DB reference is gone.
pub struct DbLifetime {
    weak_db_ref: Weak<DB>,
    optional_tempdir: Option<TempDir>,
}

impl DbLifetime {
    pub fn new(tempdir: TempDir, weak_db_ref: Weak<DB>) -> Self {
        Self { optional_tempdir: Some(tempdir), weak_db_ref }
    }
}

impl Drop for DbLifetime {
    fn drop(&mut self) {
        for _ in 0..16 {
            if self.weak_db_ref.strong_count() > 0 {
                // Sometimes another thread is shutting down and cleaning resources
                std::thread::sleep(std::time::Duration::from_millis(1000));
            } else {
                break;
            }
        }
        assert_eq!(self.weak_db_ref.strong_count(), 0, "DB is expected to have no strong references when lifetime is dropped");
        if let Some(dir) = self.optional_tempdir.take() {
            let options = rocksdb::Options::default();
            let path_buf = dir.path().to_owned();
            let path = path_buf.to_str().unwrap_or_default();
            DB::destroy(&options, path).expect("DB is expected to be deletable since there are no references to it");
        }
    }
}

pub fn get_ledger_tempdir() -> TempDir {
    let global_tempdir = std::env::temp_dir();
    let ledger_tempdir = global_tempdir.join("ledger-txdb");
    std::fs::create_dir_all(ledger_tempdir.as_path()).unwrap();
    tempfile::tempdir_in(ledger_tempdir.as_path()).unwrap()
}

/// Creates a DB within a temp directory under `<OS SPECIFIC TEMP DIR>/ledger-txdb`
/// Callers must keep the `DbLifetime` guard for as long as they wish the DB to exist.
#[macro_export]
macro_rules! create_temp_db {
    ($conn_builder: expr) => {{
        let db_tempdir = $crate::utils::get_ledger_tempdir();
        let db_path = db_tempdir.path().to_owned();
        let db = $conn_builder.with_db_path(db_path).build().unwrap();
        ($crate::utils::DbLifetime::new(db_tempdir, std::sync::Arc::downgrade(&db)), db)
    }};
}
