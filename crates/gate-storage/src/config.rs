//! # Backend Selection
//!
//! Serde-tagged selector read once at construction:
//!
//! ```json
//! { "kind": "none" }
//! { "kind": "memory" }
//! { "kind": "file", "path": "./data/approvals.db" }
//! { "kind": "rocksdb", "path": "./data/approvals", "sync_writes": true }
//! ```

use crate::adapters::{FileBackedBackend, InMemoryBackend, NoopBackend};
use crate::errors::BackendError;
use crate::ports::ApprovalBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which storage engine backs the approval sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// No persistence.
    #[default]
    #[serde(rename = "none")]
    Disabled,
    /// Volatile in-memory map.
    Memory,
    /// Single data file.
    File { path: PathBuf },
    /// RocksDB directory (requires the `rocksdb` feature).
    Rocksdb(RocksDbConfig),
}

impl BackendConfig {
    /// Name used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendConfig::Disabled => "none",
            BackendConfig::Memory => "memory",
            BackendConfig::File { .. } => "file",
            BackendConfig::Rocksdb(_) => "rocksdb",
        }
    }
}

/// RocksDB tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 8MB; the working set is tiny)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 4MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/approvals"),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (small buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 1024 * 1024,
            write_buffer_size: 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// Open the configured backend.
///
/// Errors here are fatal for the admission engine: it refuses to start
/// rather than run without its durable state.
pub fn open_backend(config: &BackendConfig) -> Result<Arc<dyn ApprovalBackend>, BackendError> {
    let backend: Arc<dyn ApprovalBackend> = match config {
        BackendConfig::Disabled => Arc::new(NoopBackend),
        BackendConfig::Memory => Arc::new(InMemoryBackend::new()),
        BackendConfig::File { path } => Arc::new(FileBackedBackend::open(path)?),
        BackendConfig::Rocksdb(rocks) => open_rocksdb(rocks)?,
    };

    tracing::debug!(backend = backend.name(), "Approval backend opened");
    Ok(backend)
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &RocksDbConfig) -> Result<Arc<dyn ApprovalBackend>, BackendError> {
    Ok(Arc::new(crate::adapters::rocksdb_adapter::RocksDbBackend::open(config.clone())?))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &RocksDbConfig) -> Result<Arc<dyn ApprovalBackend>, BackendError> {
    Err(BackendError::Unsupported {
        kind: "rocksdb".to_string(),
    })
}
