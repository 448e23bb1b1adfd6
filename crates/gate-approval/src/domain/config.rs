//! # Approval Configuration
//!
//! Raw (hex string) configuration as read from a file, and its validated
//! form. Validation happens once at construction; every error is fatal.
//!
//! ```json
//! {
//!   "allowlist": ["0123456789abcdef0123456789abcdef01234567"],
//!   "denylist": [],
//!   "trusted_keys": ["<64 hex chars>"],
//!   "backend": { "kind": "file", "path": "./data/approvals.db" },
//!   "queue_capacity": 1024
//! }
//! ```

use super::errors::ConfigError;
use gate_crypto::{Ed25519PublicKey, SignerRegistry};
use gate_storage::BackendConfig;
use gate_types::InfoHash;
use serde::{Deserialize, Serialize};

/// Default bound on pending write-back entries.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Admission engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalConfig {
    /// Hex infohashes admitted from startup.
    #[serde(alias = "whitelist")]
    pub allowlist: Vec<String>,
    /// Hex infohashes always rejected.
    #[serde(alias = "blacklist")]
    pub denylist: Vec<String>,
    /// Hex Ed25519 public keys whose signatures promote an infohash.
    pub trusted_keys: Vec<String>,
    /// Durable storage selector.
    pub backend: BackendConfig,
    /// Maximum queued write-back entries before new ones are dropped.
    pub queue_capacity: usize,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            allowlist: Vec::new(),
            denylist: Vec::new(),
            trusted_keys: Vec::new(),
            backend: BackendConfig::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ApprovalPolicy {
    pub allowed: Vec<InfoHash>,
    pub denied: Vec<InfoHash>,
    pub signers: SignerRegistry,
    pub queue_capacity: usize,
}

impl ApprovalConfig {
    /// Decode every hex entry and check limits.
    pub fn resolve(&self) -> Result<ApprovalPolicy, ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }

        let allowed = parse_list("allowlist", &self.allowlist)?;
        let denied = parse_list("denylist", &self.denylist)?;

        let keys = self
            .trusted_keys
            .iter()
            .map(|value| {
                Ed25519PublicKey::from_hex(value).map_err(|source| ConfigError::InvalidTrustedKey {
                    value: value.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ApprovalPolicy {
            allowed,
            denied,
            signers: SignerRegistry::new(keys),
            queue_capacity: self.queue_capacity,
        })
    }
}

fn parse_list(list: &'static str, values: &[String]) -> Result<Vec<InfoHash>, ConfigError> {
    values
        .iter()
        .map(|v| InfoHash::from_hex(v).map_err(|source| ConfigError::InvalidInfoHash { list, source }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_crypto::Ed25519KeyPair;

    const HASH_A: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_defaults() {
        let config: ApprovalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ApprovalConfig::default());
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.backend, BackendConfig::Disabled);
    }

    #[test]
    fn test_legacy_list_names() {
        let config: ApprovalConfig =
            serde_json::from_str(&format!(r#"{{"whitelist": ["{HASH_A}"], "blacklist": []}}"#))
                .unwrap();
        assert_eq!(config.allowlist, vec![HASH_A.to_string()]);
    }

    #[test]
    fn test_resolve() {
        let key = Ed25519KeyPair::generate().public_key().to_hex();
        let config = ApprovalConfig {
            allowlist: vec![HASH_A.to_uppercase()],
            trusted_keys: vec![key],
            ..Default::default()
        };

        let policy = config.resolve().unwrap();
        assert_eq!(policy.allowed, vec![InfoHash::from_hex(HASH_A).unwrap()]);
        assert_eq!(policy.signers.len(), 1);
    }

    #[test]
    fn test_bad_infohash_names_list() {
        let config = ApprovalConfig {
            denylist: vec!["abcd".into()],
            ..Default::default()
        };

        match config.resolve() {
            Err(ConfigError::InvalidInfoHash { list, .. }) => assert_eq!(list, "denylist"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_bad_trusted_key() {
        let config = ApprovalConfig {
            trusted_keys: vec!["zz".repeat(32)],
            ..Default::default()
        };
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::InvalidTrustedKey { .. })
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = ApprovalConfig {
            queue_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.resolve().unwrap_err(), ConfigError::ZeroQueueCapacity);
    }
}
