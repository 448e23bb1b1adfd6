//! # Signer Registry
//!
//! Ordered list of trusted authority keys. A detached signature is accepted
//! when any key in the list verifies it; keys are tried in configured order
//! so operators can rotate authorities by appending the new key first.

use crate::signatures::{Ed25519PublicKey, Ed25519Signature, PUBLIC_KEY_LEN};
use crate::CryptoError;

/// Immutable, ordered set of trusted Ed25519 public keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignerRegistry {
    keys: Vec<Ed25519PublicKey>,
}

impl SignerRegistry {
    /// Build from already-validated keys.
    pub fn new(keys: Vec<Ed25519PublicKey>) -> Self {
        Self { keys }
    }

    /// Decode every key from hex, failing on the first bad entry.
    pub fn from_hex_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self, CryptoError> {
        let keys = keys
            .iter()
            .map(|k| Ed25519PublicKey::from_hex(k.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keys })
    }

    /// Trusted keys in configured order.
    pub fn keys(&self) -> &[Ed25519PublicKey] {
        &self.keys
    }

    /// Number of trusted keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no key is trusted (every signature fails).
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the index of the first key that verifies `signature` over `message`.
    pub fn find_signer(&self, message: &[u8], signature: &Ed25519Signature) -> Option<usize> {
        self.keys
            .iter()
            .position(|key| key.verify(message, signature).is_ok())
    }

    /// True if any trusted key verifies `signature` over `message`.
    ///
    /// A signature of the wrong length is a failed verification.
    pub fn verify_any(&self, message: &[u8], signature: &[u8]) -> bool {
        match Ed25519Signature::from_slice(signature) {
            Ok(sig) => self.find_signer(message, &sig).is_some(),
            Err(_) => false,
        }
    }
}

/// Stateless check of a detached signature against raw 32-byte keys.
///
/// Keys are tried in order; the first success wins. Wrong-length signatures
/// and keys that are not valid curve points count as failures.
pub fn verify(message: &[u8], signature: &[u8], keys: &[[u8; PUBLIC_KEY_LEN]]) -> bool {
    let Ok(sig) = Ed25519Signature::from_slice(signature) else {
        return false;
    };

    keys.iter().any(|raw| {
        Ed25519PublicKey::from_bytes(*raw)
            .map(|key| key.verify(message, &sig).is_ok())
            .unwrap_or(false)
    })
}
