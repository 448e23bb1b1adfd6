//! # Outbound Ports (Driven Ports / SPI)
//!
//! The only driven dependency is durable storage. The trait lives in
//! `gate-storage` so backends can be built without this crate.

pub use gate_storage::{ApprovalBackend, BackendError, Namespace, EMPTY_MARKER};
