//! Cross-crate flows: config → backend → service → hook → write-back.

pub mod admission_flow;
pub mod concurrency;
pub mod persistence;
