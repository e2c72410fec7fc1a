//! # Persisted worker status and the persistence collaborator.
//!
//! The supervisor does not own storage. Status writes and configuration
//! reads go through [`StatusStore`], implemented by the application's
//! persistence layer (a database in production, an in-memory map in tests).
//!
//! [`WorkerStatus`] is the only state visible outside the process boundary.
//! It is written synchronously with every transition of the supervision
//! state machine, never batched, so an operator polling status never sees a
//! stale value for longer than one scheduling quantum.
//!
//! ## Status transitions
//! ```text
//! (manual start)──► running ──► restarting ──► running
//!                     │             │  └─────► error      (attempt cap hit)
//!                     │             │
//!                     └─────────────┴────────► stopped    (manual stop only)
//! ```

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::WorkerError;
use crate::workers::OwnerId;

/// Externally visible state of one owner's worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerStatus {
    /// The worker is up and supervised.
    Running,
    /// The worker died unexpectedly; a restart is scheduled or in flight.
    Restarting,
    /// Restart attempts are exhausted; only a manual start recovers.
    Error,
    /// The owner stopped the worker; no supervision is active.
    Stopped,
}

impl WorkerStatus {
    /// Returns a short stable label (snake_case) for storage and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Running => "running",
            WorkerStatus::Restarting => "restarting",
            WorkerStatus::Error => "error",
            WorkerStatus::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted per-owner worker configuration.
///
/// Carries what a relaunch needs: the credential the session authenticates
/// with and, optionally, where the worker keeps its files.
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    /// Credential token the worker session authenticates with.
    pub token: String,
    /// Directory the worker downloads into (`None` = application default).
    pub data_dir: Option<PathBuf>,
}

impl WorkerConfig {
    /// Creates a configuration with the given token and default data dir.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            data_dir: None,
        }
    }
}

/// Persistence collaborator: status writes and configuration reads.
///
/// ### Implementation requirements
/// - `set_status` must absorb its own errors (log and move on); the
///   supervisor cannot meaningfully react to a failed status write and
///   never retries one.
/// - `get_config` is fallible: a missing or invalid configuration during a
///   restart folds into the counted-retry path like any launch failure.
#[async_trait]
pub trait StatusStore: Send + Sync + 'static {
    /// Records the externally visible status for `owner`.
    ///
    /// Called synchronously on every state transition, in transition order.
    async fn set_status(&self, owner: OwnerId, status: WorkerStatus, message: &str);

    /// Reads back the owner's persisted worker configuration.
    async fn get_config(&self, owner: OwnerId) -> Result<WorkerConfig, WorkerError>;
}
