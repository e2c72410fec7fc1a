//! Error types used by the botvisor runtime and worker collaborators.
//!
//! This module defines two main error enums:
//!
//! - [`SupervisorError`] — errors surfaced to callers of the supervisor API.
//! - [`WorkerError`] — failures of a single worker's lifecycle (spawn, probe,
//!   configuration).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. Worker failures never cross the API boundary on their
//! own: the crash handler absorbs them into the counted-restart cycle, and
//! only the supervisor-level variants below reach the request-handling layer.

use std::time::Duration;
use thiserror::Error;

use crate::workers::OwnerId;

/// # Errors surfaced by the supervisor API.
///
/// These represent failures of supervision itself rather than of the
/// supervised worker: contract violations, a manual start that could not
/// produce a worker, or a shutdown that overran its grace window.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// A worker is already supervised for this owner; it must be stopped
    /// before another start. This is a caller contract violation, not a
    /// recoverable runtime condition.
    #[error("worker for owner {owner} is already supervised")]
    AlreadySupervised {
        /// Owner whose registration was refused.
        owner: OwnerId,
    },

    /// Launching the worker during a manual start failed.
    ///
    /// Launch failures during an *automatic* restart never produce this
    /// error; they are folded into the retry cycle by the crash handler.
    #[error("failed to launch worker for owner {owner}: {source}")]
    Launch {
        /// Owner the start was requested for.
        owner: OwnerId,
        /// The underlying lifecycle failure.
        #[source]
        source: WorkerError,
    },

    /// Shutdown grace period was exceeded; some owners' monitor tasks did
    /// not wind down in time and were abandoned.
    #[error("shutdown grace {grace:?} exceeded; still supervised: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Owners whose teardown did not complete in time.
        stuck: Vec<OwnerId>,
    },
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use botvisor::{OwnerId, SupervisorError};
    ///
    /// let err = SupervisorError::AlreadySupervised { owner: OwnerId(7) };
    /// assert_eq!(err.as_label(), "already_supervised");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::AlreadySupervised { .. } => "already_supervised",
            SupervisorError::Launch { .. } => "launch_failed",
            SupervisorError::GraceExceeded { .. } => "grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SupervisorError::AlreadySupervised { owner } => {
                format!("owner {owner} already supervised")
            }
            SupervisorError::Launch { owner, source } => {
                format!("launch for owner {owner} failed: {source}")
            }
            SupervisorError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck owners={stuck:?}")
            }
        }
    }
}

/// # Failures of a worker's lifecycle.
///
/// All variants are treated the same way by the crash handler: each one
/// consumes a counted restart attempt. There is no separate fatal class —
/// a persistently failing launch or missing configuration is resolved by
/// eventually hitting the attempt cap.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum WorkerError {
    /// Creating the worker instance failed.
    #[error("worker spawn failed: {reason}")]
    Spawn {
        /// The underlying error message.
        reason: String,
    },

    /// The liveness probe could not observe the worker.
    ///
    /// Inability to observe a worker is itself a failure; the monitor routes
    /// it to the crash handler exactly like a detected death.
    #[error("liveness probe failed: {reason}")]
    Probe {
        /// The underlying error message.
        reason: String,
    },

    /// The owner's persisted configuration is missing or invalid.
    #[error("worker configuration unavailable: {reason}")]
    Config {
        /// The underlying error message.
        reason: String,
    },
}

impl WorkerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkerError::Spawn { .. } => "worker_spawn",
            WorkerError::Probe { .. } => "worker_probe",
            WorkerError::Config { .. } => "worker_config",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WorkerError::Spawn { reason } => format!("spawn: {reason}"),
            WorkerError::Probe { reason } => format!("probe: {reason}"),
            WorkerError::Config { reason } => format!("config: {reason}"),
        }
    }
}
