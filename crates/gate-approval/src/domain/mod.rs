//! # Domain Layer
//!
//! Approval state and decision types with no I/O dependencies.

pub mod config;
pub mod decision;
pub mod errors;
pub mod store;
