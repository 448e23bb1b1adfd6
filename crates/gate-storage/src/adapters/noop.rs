//! Backend that stores nothing. Selected with `kind = "none"`.

use crate::errors::BackendError;
use crate::ports::{ApprovalBackend, Namespace};

/// Pure in-memory operation: scans are empty and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl ApprovalBackend for NoopBackend {
    fn list_keys(&self, _namespace: Namespace) -> Result<Vec<Vec<u8>>, BackendError> {
        Ok(Vec::new())
    }

    fn put(&self, _namespace: Namespace, _key: &[u8], _value: &[u8]) -> Result<(), BackendError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
