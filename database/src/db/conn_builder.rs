use crate::db::DB;
use rocksdb::{BlockBasedOptions, DBCompressionType};
use std::{path::PathBuf, sync::Arc};

const KB: usize = 1024;
const MB: usize = 1024 * KB;

#[derive(Debug)]
pub struct Unspecified;

/// Typed builder for a rocksdb connection. `build` is only available once a path and a files limit were provided.
#[derive(Debug)]
pub struct ConnBuilder<Path, FDLimit> {
    db_path: Path,
    create_if_missing: bool,
    parallelism: usize,
    files_limit: FDLimit,
    mem_budget: usize,
}

impl Default for ConnBuilder<Unspecified, Unspecified> {
    fn default() -> Self {
        ConnBuilder { db_path: Unspecified, create_if_missing: true, parallelism: 1, mem_budget: 64 * MB, files_limit: Unspecified }
    }
}

impl<Path, FDLimit> ConnBuilder<Path, FDLimit> {
    pub fn with_db_path(self, db_path: PathBuf) -> ConnBuilder<PathBuf, FDLimit> {
        ConnBuilder {
            db_path,
            files_limit: self.files_limit,
            create_if_missing: self.create_if_missing,
            parallelism: self.parallelism,
            mem_budget: self.mem_budget,
        }
    }
    pub fn with_create_if_missing(self, create_if_missing: bool) -> ConnBuilder<Path, FDLimit> {
        ConnBuilder { create_if_missing, ..self }
    }
    pub fn with_parallelism(self, parallelism: impl Into<usize>) -> ConnBuilder<Path, FDLimit> {
        ConnBuilder { parallelism: parallelism.into(), ..self }
    }
    pub fn with_mem_budget(self, mem_budget: impl Into<usize>) -> ConnBuilder<Path, FDLimit> {
        ConnBuilder { mem_budget: mem_budget.into(), ..self }
    }
    pub fn with_files_limit(self, files_limit: impl Into<i32>) -> ConnBuilder<Path, i32> {
        ConnBuilder {
            db_path: self.db_path,
            files_limit: files_limit.into(),
            create_if_missing: self.create_if_missing,
            parallelism: self.parallelism,
            mem_budget: self.mem_budget,
        }
    }
}

impl ConnBuilder<PathBuf, i32> {
    fn options(&self) -> rocksdb::Options {
        let mut opts = rocksdb::Options::default();
        if self.parallelism > 1 {
            opts.increase_parallelism(self.parallelism as i32);
        }
        opts.optimize_level_style_compaction(self.mem_budget);
        opts.set_compression_per_level(&[
            DBCompressionType::None,
            DBCompressionType::Lz4,
            DBCompressionType::Lz4,
            DBCompressionType::Lz4,
            DBCompressionType::Lz4,
            DBCompressionType::Lz4,
            DBCompressionType::Lz4,
        ]);

        let mut b_opts = BlockBasedOptions::default();
        b_opts.set_bloom_filter(10.0, false);
        b_opts.set_block_size(16 * KB);
        opts.set_block_based_table_factory(&b_opts);

        opts.set_max_open_files(self.files_limit);
        opts.create_if_missing(self.create_if_missing);
        opts
    }

    pub fn build(self) -> Result<Arc<DB>, rocksdb::Error> {
        let opts = self.options();
        let db = DB::open(&opts, &self.db_path)?;
        Ok(Arc::new(db))
    }
}
