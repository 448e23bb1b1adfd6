//! # RocksDB Backend
//!
//! Production-ready RocksDB implementation of `ApprovalBackend`.
//!
//! ## Column Families
//!
//! - `allowed` - promoted infohashes
//! - `denied` - deny-listed infohashes (read-only from this engine)
//!
//! Keys are raw 20-byte infohashes, values are empty.

use crate::config::RocksDbConfig;
use crate::errors::BackendError;
use crate::ports::{ApprovalBackend, Namespace};
use rocksdb::{ColumnFamilyDescriptor, IteratorMode, Options, WriteOptions, DB};

/// RocksDB-backed approval store.
pub struct RocksDbBackend {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbBackend {
    /// Open or create the database with one column family per namespace.
    pub fn open(config: RocksDbConfig) -> Result<Self, BackendError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        // Bloom filter for faster point lookups
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = Namespace::ALL
            .iter()
            .map(|ns| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(ns.as_str(), cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors).map_err(|e| {
            BackendError::IOError {
                message: format!("Failed to open RocksDB: {}", e),
            }
        })?;

        tracing::info!(path = %config.path.display(), "Opened RocksDB approval store");
        Ok(Self { db, config })
    }

    fn cf(&self, namespace: Namespace) -> Result<&rocksdb::ColumnFamily, BackendError> {
        self.db
            .cf_handle(namespace.as_str())
            .ok_or_else(|| BackendError::CorruptionError {
                message: format!("missing column family '{}'", namespace),
            })
    }
}

impl ApprovalBackend for RocksDbBackend {
    fn list_keys(&self, namespace: Namespace) -> Result<Vec<Vec<u8>>, BackendError> {
        let cf = self.cf(namespace)?;
        let mut keys = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            match item {
                Ok((key, _)) => keys.push(key.to_vec()),
                Err(e) => {
                    return Err(BackendError::IOError {
                        message: format!("RocksDB scan failed: {}", e),
                    });
                }
            }
        }

        Ok(keys)
    }

    fn put(&self, namespace: Namespace, key: &[u8], value: &[u8]) -> Result<(), BackendError> {
        let cf = self.cf(namespace)?;
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);

        self.db
            .put_cf_opt(cf, key, value, &write_opts)
            .map_err(|e| BackendError::IOError {
                message: format!("RocksDB put failed: {}", e),
            })
    }

    fn name(&self) -> &'static str {
        "rocksdb"
    }
}
