//! # Admission Service
//!
//! Application service layer that implements the `AdmissionApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AdmissionApi`)
//! - Hydrates from, and writes back to, the outbound port (`ApprovalBackend`)
//! - Delegates set membership to `ApprovalStore` and verification to
//!   `SignerRegistry`
//!
//! ## Request Path
//!
//! ```text
//! announce(id, sig?) ──→ [sig present, id not allowed?] ──malformed──→ Deny(InvalidSignature)
//!                                 │            └──unverified, not denied──→ Deny(InvalidSignature)
//!                                 │ verified, or unverified and denied
//!                                 ↓
//!                         promote in memory ──→ enqueue (try_send, may drop)
//!                                 │
//!                                 ↓
//!                    denied? ──→ Deny(Unapproved)
//!                    allowed? ──→ Allow
//!                    otherwise ──→ Deny(Unapproved)
//! ```

use crate::adapters::writer::{PersistenceWriter, WriterError};
use crate::domain::config::ApprovalConfig;
use crate::domain::decision::{Decision, DenyReason};
use crate::domain::errors::ApprovalError;
use crate::domain::store::{ApprovalStore, PromotionOutcome};
use crate::ports::inbound::AdmissionApi;
use crate::ports::outbound::{ApprovalBackend, Namespace};
use gate_crypto::{Ed25519Signature, SignerRegistry};
use gate_storage::open_backend;
use gate_telemetry::{ApprovalMetrics, HistogramTimer};
use gate_types::InfoHash;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Infohash admission service.
///
/// Shared by reference across request threads; `decide` never blocks on I/O.
pub struct AdmissionService {
    store: ApprovalStore,
    signers: SignerRegistry,
    writer: PersistenceWriter,
    metrics: Arc<ApprovalMetrics>,
}

impl AdmissionService {
    /// Open the configured backend and build the service.
    pub fn from_config(
        config: &ApprovalConfig,
        metrics: Arc<ApprovalMetrics>,
    ) -> Result<Self, ApprovalError> {
        // Validate before touching storage
        config.resolve()?;
        let backend = open_backend(&config.backend)?;
        Self::new(config, backend, metrics)
    }

    /// Build the service over an already-open backend.
    ///
    /// Loads both namespaces once, merges them with the static lists and
    /// starts the write-back worker on the current Tokio runtime.
    pub fn new(
        config: &ApprovalConfig,
        backend: Arc<dyn ApprovalBackend>,
        metrics: Arc<ApprovalMetrics>,
    ) -> Result<Self, ApprovalError> {
        let policy = config.resolve()?;
        let handle = Handle::try_current().map_err(|_| ApprovalError::NoRuntime)?;

        let mut allowed = policy.allowed;
        let mut denied = policy.denied;
        let static_allowed = allowed.len();
        let static_denied = denied.len();
        allowed.extend(load_namespace(backend.as_ref(), Namespace::Allowed)?);
        denied.extend(load_namespace(backend.as_ref(), Namespace::Denied)?);

        let store = ApprovalStore::from_lists(allowed, denied);
        let (allowed_len, denied_len) = store.snapshot();
        metrics.allowlist_size.set(allowed_len as i64);

        if policy.signers.is_empty() {
            warn!("No trusted keys configured, signature promotion is disabled");
        }

        info!(
            backend = backend.name(),
            static_allowed,
            static_denied,
            allowed = allowed_len,
            denied = denied_len,
            trusted_keys = policy.signers.len(),
            "Admission service initialized"
        );

        let writer = PersistenceWriter::spawn_on(
            &handle,
            backend,
            policy.queue_capacity,
            Arc::clone(&metrics),
        );

        Ok(Self {
            store,
            signers: policy.signers,
            writer,
            metrics,
        })
    }

    /// Verify `signature_hex` over `id` and promote on success.
    ///
    /// A well-formed signature that fails verification on a deny-listed id
    /// falls through to the deny check.
    fn try_promote(&self, id: &InfoHash, signature_hex: &str) -> Result<(), DenyReason> {
        let signature = match Ed25519Signature::from_hex(signature_hex) {
            Ok(sig) => sig,
            Err(e) => {
                self.metrics.signature_failures.inc();
                debug!(info_hash = %id, error = %e, "Malformed signature");
                return Err(DenyReason::InvalidSignature);
            }
        };

        let Some(signer) = self.signers.find_signer(id.as_bytes(), &signature) else {
            self.metrics.signature_failures.inc();
            debug!(info_hash = %id, "Signature not valid for any trusted key");
            if self.store.is_denied(id) {
                return Ok(());
            }
            return Err(DenyReason::InvalidSignature);
        };

        match self.store.promote(*id) {
            PromotionOutcome::Promoted => {
                self.metrics.promotions.inc();
                self.metrics.allowlist_size.inc();
                info!(info_hash = %id, signer, "Infohash promoted to allow-list");
                self.writer.enqueue(*id);
            }
            PromotionOutcome::AlreadyAllowed => {}
            PromotionOutcome::Denied => {
                debug!(info_hash = %id, signer, "Valid signature for deny-listed infohash ignored");
            }
        }
        Ok(())
    }

    pub fn store(&self) -> &ApprovalStore {
        &self.store
    }

    pub fn writer(&self) -> &PersistenceWriter {
        &self.writer
    }

    pub fn metrics(&self) -> Arc<ApprovalMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Stop the write-back worker after it drains queued promotions.
    ///
    /// Decisions keep working afterwards; new promotions are simply not
    /// persisted.
    pub async fn shutdown(&self) -> Result<(), WriterError> {
        self.writer.stop().await
    }
}

impl AdmissionApi for AdmissionService {
    fn decide(&self, info_hash: &InfoHash, signature_hex: Option<&str>) -> Decision {
        let _timer = HistogramTimer::new(&self.metrics.decision_duration);
        self.metrics.announces_received.inc();

        if let Some(sig) = signature_hex.filter(|s| !s.is_empty()) {
            if !self.store.is_allowed(info_hash) {
                if let Err(reason) = self.try_promote(info_hash, sig) {
                    return Decision::Deny(reason);
                }
            }
        }

        if self.store.is_denied(info_hash) {
            self.metrics.announces_denylisted.inc();
            debug!(info_hash = %info_hash, "Announce denied, infohash deny-listed");
            return Decision::Deny(DenyReason::Unapproved);
        }

        if self.store.is_allowed(info_hash) {
            self.metrics.announces_allowed.inc();
            return Decision::Allow;
        }

        self.metrics.announces_unlisted.inc();
        debug!(info_hash = %info_hash, "Announce denied, infohash not approved");
        Decision::Deny(DenyReason::Unapproved)
    }

    fn scrape(&self) -> Decision {
        self.metrics.scrapes.inc();
        Decision::Allow
    }
}

fn load_namespace(
    backend: &dyn ApprovalBackend,
    namespace: Namespace,
) -> Result<Vec<InfoHash>, ApprovalError> {
    let keys = backend.list_keys(namespace)?;
    let total = keys.len();

    let ids: Vec<InfoHash> = keys
        .iter()
        .filter_map(|key| {
            let id = InfoHash::from_slice(key);
            if id.is_none() {
                warn!(%namespace, len = key.len(), "Skipping stored key that is not a 20-byte infohash");
            }
            id
        })
        .collect();

    debug!(%namespace, loaded = ids.len(), skipped = total - ids.len(), "Hydrated from backend");
    Ok(ids)
}
