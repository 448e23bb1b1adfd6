//! Shared test fixtures.

use gate_approval::ApprovalConfig;
use gate_crypto::Ed25519KeyPair;
use gate_storage::BackendConfig;
use gate_types::InfoHash;
use rand::RngCore;

/// A random infohash.
pub fn random_infohash() -> InfoHash {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    InfoHash::new(bytes)
}

/// `count` distinct random infohashes.
pub fn random_infohashes(count: usize) -> Vec<InfoHash> {
    let mut ids = std::collections::HashSet::with_capacity(count);
    while ids.len() < count {
        ids.insert(random_infohash());
    }
    ids.into_iter().collect()
}

/// Trusted signing authority for promotion tests.
pub struct Authority {
    key: Ed25519KeyPair,
}

impl Authority {
    pub fn new() -> Self {
        Self {
            key: Ed25519KeyPair::generate(),
        }
    }

    pub fn public_key_hex(&self) -> String {
        self.key.public_key().to_hex()
    }

    pub fn sign(&self, id: &InfoHash) -> String {
        self.key.sign(id.as_bytes()).to_hex()
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self::new()
    }
}

/// Config trusting `authorities`, with the given lists and backend.
pub fn config(
    allow: &[InfoHash],
    deny: &[InfoHash],
    authorities: &[&Authority],
    backend: BackendConfig,
) -> ApprovalConfig {
    ApprovalConfig {
        allowlist: allow.iter().map(InfoHash::to_hex).collect(),
        denylist: deny.iter().map(InfoHash::to_hex).collect(),
        trusted_keys: authorities.iter().map(|a| a.public_key_hex()).collect(),
        backend,
        ..Default::default()
    }
}
