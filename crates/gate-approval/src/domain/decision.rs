//! # Decisions
//!
//! Typed per-request outcomes of the admission pipeline.

use gate_types::ClientError;
use std::fmt;

/// Failure reason sent to clients for an unapproved infohash.
pub const ERR_INFOHASH_UNAPPROVED: ClientError = ClientError("unapproved infohash");

/// Failure reason sent to clients for a bad promotion signature.
pub const ERR_INVALID_SIGNATURE: ClientError = ClientError("invalid signature");

/// Why an announce was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// Deny-listed, or in neither list.
    Unapproved,
    /// A signature was present but failed to decode or verify.
    InvalidSignature,
}

impl DenyReason {
    /// Short label for logs and the operator console.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::Unapproved => "unapproved",
            DenyReason::InvalidSignature => "invalid_signature",
        }
    }

    /// Error surfaced to the tracker client.
    pub fn client_error(&self) -> ClientError {
        match self {
            DenyReason::Unapproved => ERR_INFOHASH_UNAPPROVED,
            DenyReason::InvalidSignature => ERR_INVALID_SIGNATURE,
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one admission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Map to the host's hook convention.
    pub fn into_result(self) -> Result<(), ClientError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason.client_error()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => f.write_str("allow"),
            Decision::Deny(reason) => write!(f, "deny {}", reason),
        }
    }
}
