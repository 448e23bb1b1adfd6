//! # Adapters Module
//!
//! - `writer` - bounded write-back queue and its single worker task
//! - `hook` - tracker hook over any `AdmissionApi`

pub mod hook;
pub mod writer;
