//! # Approval Errors
//!
//! Construction-time failures. Per-request outcomes are not errors; see
//! `Decision`.

use gate_crypto::CryptoError;
use gate_storage::BackendError;
use gate_types::ParseError;
use thiserror::Error;

/// A configured value could not be used. Fatal at construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An allow/deny entry is not a 40-character hex infohash
    #[error("Invalid infohash in {list}: {source}")]
    InvalidInfoHash {
        list: &'static str,
        #[source]
        source: ParseError,
    },

    /// A trusted key is not a 32-byte hex Ed25519 public key
    #[error("Invalid trusted key {value:?}: {source}")]
    InvalidTrustedKey {
        value: String,
        #[source]
        source: CryptoError,
    },

    /// The write-back queue must hold at least one entry
    #[error("Write-back queue capacity must be greater than zero")]
    ZeroQueueCapacity,
}

/// Errors that prevent the admission service from starting.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Static configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The durable backend cannot be opened or scanned
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),

    /// The write-back worker needs a Tokio runtime
    #[error("No Tokio runtime available to spawn the persistence writer")]
    NoRuntime,
}
