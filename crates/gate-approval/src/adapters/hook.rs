//! # Tracker Hook Adapter
//!
//! Binds an `AdmissionApi` to the tracker's pre-hook contract. Announces map
//! the decision to `Ok(())` or a client-facing failure reason; scrapes always
//! pass.

use crate::ports::inbound::{AdmissionApi, TrackerHook};
use gate_types::{AnnounceRequest, ClientError, ScrapeRequest};
use std::sync::Arc;

/// Pre-hook installed into the tracker's announce and scrape chains.
pub struct ApprovalHook<A: AdmissionApi> {
    api: Arc<A>,
}

impl<A: AdmissionApi> ApprovalHook<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }
}

impl<A: AdmissionApi> Clone for ApprovalHook<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: AdmissionApi> TrackerHook for ApprovalHook<A> {
    fn handle_announce(&self, request: &AnnounceRequest) -> Result<(), ClientError> {
        self.api
            .decide(&request.info_hash, request.signature.as_deref())
            .into_result()
    }

    fn handle_scrape(&self, _request: &ScrapeRequest) -> Result<(), ClientError> {
        self.api.scrape().into_result()
    }
}
