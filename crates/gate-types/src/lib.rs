//! # Gate Types Crate
//!
//! Entities shared across the Swarm Gate workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the 20-byte `InfoHash` is defined once here and
//!   used as the natural key by the approval store, the write-back queue and
//!   the storage backends.
//! - **Host-Agnostic Requests**: `AnnounceRequest` / `ScrapeRequest` carry only
//!   what admission needs; wire decoding stays with the tracker host.

pub mod entities;
pub mod errors;
pub mod requests;

pub use entities::*;
pub use errors::*;
pub use requests::*;
