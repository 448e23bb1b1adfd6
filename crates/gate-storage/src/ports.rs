//! # Outbound Port
//!
//! The only storage surface the admission engine sees.

use crate::errors::BackendError;
use std::fmt;

/// Value stored for every membership key.
pub const EMPTY_MARKER: &[u8] = b"";

/// Keyspace inside a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// Infohashes admitted by promotion.
    Allowed,
    /// Infohashes rejected regardless of signature.
    Denied,
}

impl Namespace {
    /// Both namespaces, in hydration order.
    pub const ALL: [Namespace; 2] = [Namespace::Allowed, Namespace::Denied];

    /// Stable on-disk name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Allowed => "allowed",
            Namespace::Denied => "denied",
        }
    }

    pub(crate) fn tag(&self) -> u8 {
        match self {
            Namespace::Allowed => 0,
            Namespace::Denied => 1,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Namespace::Allowed),
            1 => Some(Namespace::Denied),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface over a durable key-value store.
///
/// Production: `FileBackedBackend`, `RocksDbBackend`
/// Testing: `InMemoryBackend`, `NoopBackend`
///
/// Implementations take `&self` so one handle can be shared between startup
/// hydration and the write-back worker.
pub trait ApprovalBackend: Send + Sync {
    /// Every key currently stored under `namespace`.
    fn list_keys(&self, namespace: Namespace) -> Result<Vec<Vec<u8>>, BackendError>;

    /// Store `key` under `namespace`. Writing an existing key is a no-op.
    fn put(&self, namespace: Namespace, key: &[u8], value: &[u8]) -> Result<(), BackendError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<T: ApprovalBackend + ?Sized> ApprovalBackend for std::sync::Arc<T> {
    fn list_keys(&self, namespace: Namespace) -> Result<Vec<Vec<u8>>, BackendError> {
        (**self).list_keys(namespace)
    }

    fn put(&self, namespace: Namespace, key: &[u8], value: &[u8]) -> Result<(), BackendError> {
        (**self).put(namespace, key, value)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
