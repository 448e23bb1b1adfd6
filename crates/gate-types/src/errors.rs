//! # Error Types
//!
//! Parsing errors and the tracker-facing client error.

use thiserror::Error;

/// Errors raised while decoding hex-encoded fixed-size values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input is not valid hex.
    #[error("Invalid hex {input:?}: {reason}")]
    InvalidHex { input: String, reason: String },

    /// The input decoded to the wrong number of bytes.
    #[error("Invalid length for {input:?}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        input: String,
        expected: usize,
        actual: usize,
    },
}

/// Error surfaced to a tracker client as an announce/scrape failure reason.
///
/// The message is sent verbatim in the tracker's `failure reason` field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ClientError(pub &'static str);

impl ClientError {
    /// The failure reason text.
    pub fn reason(&self) -> &'static str {
        self.0
    }
}
