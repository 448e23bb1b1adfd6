//! # Gate Crypto
//!
//! Detached signature checks used to promote infohashes at runtime.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Key material, single-key verification |
//! | `registry` | Ed25519 | Ordered list of trusted signers, any-of verification |
//!
//! ## Security Properties
//!
//! - **Strict verification**: non-canonical signatures and small-order keys
//!   are rejected (`verify_strict`)
//! - **Fail closed**: malformed input never panics or errors, it just fails
//!   to verify

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod registry;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use registry::{verify, SignerRegistry};
pub use signatures::{
    Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, PUBLIC_KEY_LEN, SIGNATURE_LEN,
};
