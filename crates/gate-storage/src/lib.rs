//! # Gate Storage
//!
//! Durable backends for the infohash approval sets.
//!
//! ## Architecture
//!
//! - **Port** (`ports`): the narrow `ApprovalBackend` trait the admission
//!   engine depends on: a full key scan per namespace at startup and an
//!   idempotent `put` for write-back.
//! - **Adapters** (`adapters`): interchangeable implementations.
//! - **Config** (`config`): backend selector and `open_backend`.
//!
//! ## Namespaces
//!
//! - `allowed` - one empty-valued entry per promoted infohash (raw 20-byte key)
//! - `denied` - read at startup only
//!
//! ## Backends
//!
//! | Kind | Type | Durable |
//! |------|------|---------|
//! | `none` | `NoopBackend` | no |
//! | `memory` | `InMemoryBackend` | no |
//! | `file` | `FileBackedBackend` | yes |
//! | `rocksdb` | `RocksDbBackend` (feature `rocksdb`) | yes |

pub mod adapters;
pub mod config;
pub mod errors;
pub mod ports;

pub use adapters::{FileBackedBackend, InMemoryBackend, NoopBackend};
#[cfg(feature = "rocksdb")]
pub use adapters::rocksdb_adapter::RocksDbBackend;
pub use config::{open_backend, BackendConfig, RocksDbConfig};
pub use errors::BackendError;
pub use ports::{ApprovalBackend, Namespace, EMPTY_MARKER};
