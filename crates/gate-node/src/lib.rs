//! # Gate Node
//!
//! Operator tooling around the admission engine.
//!
//! - `config/` - node configuration file
//! - `console/` - line protocol driving an `AdmissionApi`
//! - `authority/` - key generation and infohash signing for the authority

pub mod authority;
pub mod config;
pub mod console;

pub use config::NodeConfig;
