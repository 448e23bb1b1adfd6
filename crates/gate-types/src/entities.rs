//! # Core Entities
//!
//! The 20-byte infohash identifier.

use crate::errors::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an infohash in bytes.
pub const INFOHASH_LEN: usize = 20;

/// 20-byte BitTorrent infohash naming a swarm.
///
/// Compared by exact byte content. Serialized as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct InfoHash(pub [u8; INFOHASH_LEN]);

impl InfoHash {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; INFOHASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, failing unless it is exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; INFOHASH_LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Decode from a hex string (40 characters).
    pub fn from_hex(input: &str) -> Result<Self, ParseError> {
        let bytes = decode_fixed::<INFOHASH_LEN>(input)?;
        Ok(Self(bytes))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; INFOHASH_LEN] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl FromStr for InfoHash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; INFOHASH_LEN]> for InfoHash {
    fn from(bytes: [u8; INFOHASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for InfoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for InfoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for InfoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], ParseError> {
    let bytes = hex::decode(input.trim()).map_err(|e| ParseError::InvalidHex {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    let actual = bytes.len();
    bytes.try_into().map_err(|_| ParseError::InvalidLength {
        input: input.to_string(),
        expected: N,
        actual,
    })
}
