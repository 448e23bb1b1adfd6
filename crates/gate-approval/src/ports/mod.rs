//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API the tracker host calls
//! - **Outbound (Driven)**: durable storage this engine needs

pub mod inbound;
pub mod outbound;
