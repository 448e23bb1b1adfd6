//! Volatile backend for tests and development. Selected with `kind = "memory"`.

use crate::errors::BackendError;
use crate::ports::{ApprovalBackend, Namespace};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// In-memory key-value store keyed by namespace.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<HashMap<Namespace, BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate keys, e.g. a deny namespace written by another tool.
    pub fn with_keys<I, K>(self, namespace: Namespace, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        {
            let mut data = self.data.write();
            let ns = data.entry(namespace).or_default();
            for key in keys {
                ns.insert(key.as_ref().to_vec(), Vec::new());
            }
        }
        self
    }

    /// Number of keys under `namespace`.
    pub fn len(&self, namespace: Namespace) -> usize {
        self.data.read().get(&namespace).map_or(0, BTreeMap::len)
    }

    /// True if `key` is stored under `namespace`.
    pub fn contains(&self, namespace: Namespace, key: &[u8]) -> bool {
        self.data
            .read()
            .get(&namespace)
            .is_some_and(|ns| ns.contains_key(key))
    }
}

impl ApprovalBackend for InMemoryBackend {
    fn list_keys(&self, namespace: Namespace) -> Result<Vec<Vec<u8>>, BackendError> {
        Ok(self
            .data
            .read()
            .get(&namespace)
            .map(|ns| ns.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn put(&self, namespace: Namespace, key: &[u8], value: &[u8]) -> Result<(), BackendError> {
        self.data
            .write()
            .entry(namespace)
            .or_default()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
