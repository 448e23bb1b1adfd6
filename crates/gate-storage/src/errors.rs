//! # Backend Errors

use thiserror::Error;

/// Errors from a durable approval backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// I/O error during open, read or write.
    #[error("Backend I/O error: {message}")]
    IOError { message: String },

    /// Stored data could not be decoded.
    #[error("Backend corruption: {message}")]
    CorruptionError { message: String },

    /// Another process holds the store's lock.
    #[error("Backend locked by another process: {path}")]
    Locked { path: String },

    /// The selected backend was not compiled into this build.
    #[error("Backend '{kind}' is not available in this build")]
    Unsupported { kind: String },
}
