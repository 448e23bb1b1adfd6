//! # Approval Store
//!
//! In-memory allow and deny sets shared by every request thread.
//!
//! ## Invariants
//!
//! - The sets are disjoint. An infohash listed in both at load time is kept
//!   in the deny set only.
//! - The allow set only grows. Nothing is ever removed at runtime.
//! - The deny set is fixed after construction.

use gate_types::InfoHash;
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::warn;

/// Result of a promotion attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromotionOutcome {
    /// Newly inserted into the allow set.
    Promoted,
    /// Already present; nothing changed.
    AlreadyAllowed,
    /// Deny-listed; the allow set was not touched.
    Denied,
}

#[derive(Default)]
struct ApprovalSets {
    allowed: HashSet<InfoHash>,
    denied: HashSet<InfoHash>,
}

/// Reader-writer guarded approval sets.
///
/// Lookups take the read lock; promotion takes the write lock for a single
/// insert.
#[derive(Default)]
pub struct ApprovalStore {
    sets: RwLock<ApprovalSets>,
}

impl ApprovalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from initial lists, resolving overlaps in favour of the deny set.
    pub fn from_lists<A, D>(allowed: A, denied: D) -> Self
    where
        A: IntoIterator<Item = InfoHash>,
        D: IntoIterator<Item = InfoHash>,
    {
        let denied: HashSet<InfoHash> = denied.into_iter().collect();
        let mut sets = ApprovalSets {
            allowed: HashSet::new(),
            denied,
        };

        for id in allowed {
            if sets.denied.contains(&id) {
                warn!(info_hash = %id, "Infohash is both allowed and denied, keeping it denied");
                continue;
            }
            sets.allowed.insert(id);
        }

        Self {
            sets: RwLock::new(sets),
        }
    }

    pub fn is_allowed(&self, id: &InfoHash) -> bool {
        self.sets.read().allowed.contains(id)
    }

    pub fn is_denied(&self, id: &InfoHash) -> bool {
        self.sets.read().denied.contains(id)
    }

    /// Insert into the allow set unless deny-listed.
    ///
    /// Exactly one of any number of concurrent callers for the same id sees
    /// `Promoted`.
    pub fn promote(&self, id: InfoHash) -> PromotionOutcome {
        let mut sets = self.sets.write();
        if sets.denied.contains(&id) {
            return PromotionOutcome::Denied;
        }
        if sets.allowed.insert(id) {
            PromotionOutcome::Promoted
        } else {
            PromotionOutcome::AlreadyAllowed
        }
    }

    pub fn allowed_len(&self) -> usize {
        self.sets.read().allowed.len()
    }

    /// `(allowed, denied)` sizes read under one lock acquisition.
    pub fn snapshot(&self) -> (usize, usize) {
        let sets = self.sets.read();
        (sets.allowed.len(), sets.denied.len())
    }
}
