//! # Tracker Requests
//!
//! The parts of announce and scrape requests that admission looks at.
//! Everything else (peer id, port, transfer counters) belongs to the host.

use crate::entities::InfoHash;

/// An announce: a peer registering interest in a swarm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnounceRequest {
    /// Swarm being joined.
    pub info_hash: InfoHash,
    /// Optional hex-encoded detached signature over `info_hash`.
    pub signature: Option<String>,
}

impl AnnounceRequest {
    /// Announce without a signature.
    pub fn new(info_hash: InfoHash) -> Self {
        Self {
            info_hash,
            signature: None,
        }
    }

    /// Attach a hex-encoded signature.
    pub fn with_signature(mut self, signature_hex: impl Into<String>) -> Self {
        self.signature = Some(signature_hex.into());
        self
    }
}

/// A scrape: a statistics-only request for one or more swarms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub info_hashes: Vec<InfoHash>,
}
