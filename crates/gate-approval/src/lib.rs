//! # Infohash Approval
//!
//! Decides whether an announce for a given infohash is admitted.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): approval sets, decisions, config resolution
//! - **Ports Layer** (`ports/`): inbound admission API, outbound storage port
//! - **Adapters Layer** (`adapters/`): write-back worker, tracker hook
//! - **Service Layer** (`service.rs`): the admission pipeline
//!
//! ## Decision Order
//!
//! 1. A present signature for a not-yet-allowed infohash is decoded and
//!    verified; failure denies with `InvalidSignature` immediately.
//! 2. A verified signature promotes the infohash (memory first, then a
//!    non-blocking enqueue for durable write-back).
//! 3. Deny-list membership denies with `Unapproved`, even after step 2.
//! 4. Allow-list membership allows; anything else is denied.
//!
//! ## Security Notes
//!
//! - **Default deny**: an infohash in neither list is rejected
//! - **Deny dominates**: a valid signature never admits a deny-listed infohash
//! - **No revocation**: promotions last for the process lifetime

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::hook::ApprovalHook;
pub use adapters::writer::{EnqueueOutcome, PersistenceWriter, WriterError};
pub use domain::config::{ApprovalConfig, ApprovalPolicy, DEFAULT_QUEUE_CAPACITY};
pub use domain::decision::{Decision, DenyReason};
pub use domain::errors::{ApprovalError, ConfigError};
pub use domain::store::{ApprovalStore, PromotionOutcome};
pub use ports::inbound::{AdmissionApi, TrackerHook};
pub use service::AdmissionService;
