//! # Backend Adapters
//!
//! Implementations of `ApprovalBackend`. From the admission engine's point of
//! view they are interchangeable; they differ only in the storage engine.

pub mod file;
pub mod memory;
pub mod noop;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use file::FileBackedBackend;
pub use memory::InMemoryBackend;
pub use noop::NoopBackend;
