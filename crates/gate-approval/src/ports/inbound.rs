//! # Inbound Ports (Driving Ports / API)
//!
//! Traits the tracker host calls. Implementations must be thread-safe
//! (`Send + Sync`); announces arrive from many request threads at once.

use crate::domain::decision::Decision;
use gate_types::{AnnounceRequest, ClientError, InfoHash, ScrapeRequest};

/// Primary admission API.
pub trait AdmissionApi: Send + Sync {
    /// Decide whether an announce for `info_hash` is admitted.
    ///
    /// `signature_hex` is the optional hex-encoded detached Ed25519
    /// signature over the 20 raw infohash bytes. A valid signature from a
    /// trusted key promotes the infohash into the allow set before the
    /// list checks run.
    ///
    /// Never blocks on storage I/O.
    fn decide(&self, info_hash: &InfoHash, signature_hex: Option<&str>) -> Decision;

    /// Scrapes are always admitted.
    fn scrape(&self) -> Decision;
}

/// Hook contract of the surrounding tracker.
///
/// `Ok(())` admits the request. `Err` carries the failure reason sent to
/// the client.
pub trait TrackerHook: Send + Sync {
    fn handle_announce(&self, request: &AnnounceRequest) -> Result<(), ClientError>;

    fn handle_scrape(&self, request: &ScrapeRequest) -> Result<(), ClientError>;
}
