//! # Attempt ledger: per-owner consecutive restart counting.
//!
//! Tracks how many automatic restarts have been attempted for each owner
//! since that owner's last manual start. The crash handler is the only
//! writer that increments; manual start resets, manual stop and give-up
//! clear.
//!
//! ## Rules
//! - A missing entry reads as 0.
//! - Values stay within `[0, MAX_ATTEMPTS]`: the crash handler checks the
//!   cap before incrementing.
//! - A successful automatic restart does **not** reset the count; only a
//!   manual start does. Five crashes since the last manual start exhaust
//!   the budget even when recoveries succeeded in between.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::workers::OwnerId;

/// Per-owner counter of consecutive automatic restart attempts.
pub(crate) struct AttemptLedger {
    counts: Mutex<HashMap<OwnerId, u32>>,
}

impl AttemptLedger {
    /// Creates an empty ledger.
    pub(crate) fn new() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current count for `owner` (0 if absent).
    pub(crate) async fn get(&self, owner: OwnerId) -> u32 {
        self.counts.lock().await.get(&owner).copied().unwrap_or(0)
    }

    /// Increments the count for `owner` and returns the new value.
    pub(crate) async fn increment(&self, owner: OwnerId) -> u32 {
        let mut counts = self.counts.lock().await;
        let entry = counts.entry(owner).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Sets the count for `owner` to 0, creating the entry if needed.
    pub(crate) async fn reset(&self, owner: OwnerId) {
        self.counts.lock().await.insert(owner, 0);
    }

    /// Removes the entry for `owner`. Removing an absent entry is a no-op.
    pub(crate) async fn clear(&self, owner: OwnerId) {
        self.counts.lock().await.remove(&owner);
    }

    /// Returns true if an entry exists for `owner`.
    pub(crate) async fn contains(&self, owner: OwnerId) -> bool {
        self.counts.lock().await.contains_key(&owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_entry_reads_zero() {
        let ledger = AttemptLedger::new();
        assert_eq!(ledger.get(OwnerId(1)).await, 0);
        assert!(!ledger.contains(OwnerId(1)).await);
    }

    #[tokio::test]
    async fn test_increment_is_monotonic() {
        let ledger = AttemptLedger::new();
        let owner = OwnerId(2);
        assert_eq!(ledger.increment(owner).await, 1);
        assert_eq!(ledger.increment(owner).await, 2);
        assert_eq!(ledger.get(owner).await, 2);
    }

    #[tokio::test]
    async fn test_reset_zeroes_regardless_of_prior_value() {
        let ledger = AttemptLedger::new();
        let owner = OwnerId(3);
        for _ in 0..4 {
            ledger.increment(owner).await;
        }
        ledger.reset(owner).await;
        assert_eq!(ledger.get(owner).await, 0);
        assert!(ledger.contains(owner).await);
    }

    #[tokio::test]
    async fn test_clear_removes_entry() {
        let ledger = AttemptLedger::new();
        let owner = OwnerId(4);
        ledger.increment(owner).await;
        ledger.clear(owner).await;
        assert!(!ledger.contains(owner).await);
        // clearing again is a no-op
        ledger.clear(owner).await;
    }
}
