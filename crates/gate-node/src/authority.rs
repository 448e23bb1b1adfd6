//! Authority-side helpers: produce keys and sign infohashes for promotion.

use anyhow::{Context, Result};
use gate_crypto::Ed25519KeyPair;
use gate_types::InfoHash;

/// Hex seed and public key of a freshly generated authority key.
pub struct GeneratedKey {
    pub seed_hex: String,
    pub public_key_hex: String,
}

pub fn generate_key() -> GeneratedKey {
    let key = Ed25519KeyPair::generate();
    let seed = key.to_seed();
    GeneratedKey {
        seed_hex: hex::encode(seed),
        public_key_hex: key.public_key().to_hex(),
    }
}

/// Detached signature (hex) over the raw infohash bytes.
pub fn sign_infohash(seed_hex: &str, infohash_hex: &str) -> Result<String> {
    let key = Ed25519KeyPair::from_seed_hex(seed_hex).context("Invalid signing seed")?;
    let id = InfoHash::from_hex(infohash_hex).context("Invalid infohash")?;
    Ok(key.sign(id.as_bytes()).to_hex())
}
