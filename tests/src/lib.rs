//! # Swarm Gate Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the announce hot path
//! └── src/
//!     ├── fixtures.rs   # Authority keys, random infohashes, config builders
//!     └── integration/  # Cross-crate flows over real backends
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gate-tests
//! cargo test -p gate-tests --features rocksdb
//! cargo bench -p gate-tests
//! ```

pub mod fixtures;
pub mod integration;
