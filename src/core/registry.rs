//! # Supervisor registry: the authoritative map of supervised owners.
//!
//! One entry per owner holds the worker handle, the monitor task's
//! cancellation token, and the monitor's join handle. The registry is the
//! single source of truth for "is this owner's worker currently supervised":
//! the monitor race-guards against manual stop by re-checking membership,
//! and the crash handler refuses to resurrect an owner that was removed
//! while it slept.
//!
//! ## Rules
//! - At most one entry per owner (insert is check-and-set under one lock).
//! - Removing an absent owner is a no-op, not an error.
//! - Replacing requires the owner to still be present; a refused replace
//!   hands the new entry back so the caller can tear it down.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::workers::{OwnerId, WorkerRef};

/// One owner's supervision state.
pub(crate) struct Entry {
    /// Handle to the running worker instance.
    pub(crate) worker: WorkerRef,
    /// Cancels the owner's monitor task (and an in-flight restart backoff).
    pub(crate) cancel: CancellationToken,
    /// Join handle for the monitor task.
    pub(crate) join: JoinHandle<()>,
}

/// Process-wide owner → [`Entry`] map behind one lock.
pub(crate) struct Registry {
    entries: RwLock<HashMap<OwnerId, Entry>>,
}

impl Registry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `entry` for `owner` if no entry exists yet.
    ///
    /// On conflict the entry is handed back untouched; the caller must tear
    /// it down and surface the contract violation.
    pub(crate) async fn insert(&self, owner: OwnerId, entry: Entry) -> Result<(), Entry> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&owner) {
            return Err(entry);
        }
        entries.insert(owner, entry);
        Ok(())
    }

    /// Returns true if `owner` currently has an entry.
    pub(crate) async fn contains(&self, owner: OwnerId) -> bool {
        self.entries.read().await.contains_key(&owner)
    }

    /// Returns a shared handle to the owner's worker, if supervised.
    pub(crate) async fn worker(&self, owner: OwnerId) -> Option<WorkerRef> {
        self.entries
            .read()
            .await
            .get(&owner)
            .map(|e| WorkerRef::clone(&e.worker))
    }

    /// Replaces the entry for `owner`, returning the previous one.
    ///
    /// Refuses when the owner is no longer registered (a manual stop won
    /// the race); the caller gets the new entry back and must tear it down.
    pub(crate) async fn replace(&self, owner: OwnerId, entry: Entry) -> Result<Entry, Entry> {
        let mut entries = self.entries.write().await;
        let Some(previous) = entries.remove(&owner) else {
            return Err(entry);
        };
        entries.insert(owner, entry);
        Ok(previous)
    }

    /// Removes and returns the entry for `owner`. Absent owners yield `None`.
    pub(crate) async fn remove(&self, owner: OwnerId) -> Option<Entry> {
        self.entries.write().await.remove(&owner)
    }

    /// Removes and returns every entry, sorted by owner for determinism.
    pub(crate) async fn drain(&self) -> Vec<(OwnerId, Entry)> {
        let mut drained: Vec<(OwnerId, Entry)> =
            self.entries.write().await.drain().collect();
        drained.sort_by_key(|(owner, _)| *owner);
        drained
    }

    /// Returns the sorted list of currently supervised owners.
    pub(crate) async fn owners(&self) -> Vec<OwnerId> {
        let entries = self.entries.read().await;
        let mut owners: Vec<OwnerId> = entries.keys().copied().collect();
        owners.sort_unstable();
        owners
    }
}
