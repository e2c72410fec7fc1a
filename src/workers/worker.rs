//! # Worker handle abstraction.
//!
//! This module defines the [`Worker`] trait — an owned handle to one running
//! worker instance — and [`OwnerId`], the account identifier that scopes
//! supervision. The common handle type is [`WorkerRef`], an `Arc<dyn Worker>`
//! suitable for sharing between the registry and the monitor task.
//!
//! Liveness is always read through the handle, never cached: the monitor
//! probes [`Worker::is_running`] on every poll.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::WorkerError;

/// Stable account identifier on whose behalf a worker runs.
///
/// At most one worker is supervised per owner at any instant; the registry
/// enforces this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OwnerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// # Handle to one running worker instance.
///
/// A `Worker` belongs to exactly one [`OwnerId`] and exposes a liveness
/// probe plus a stop operation. The supervisor owns the handle through its
/// registry entry; nothing else holds it after registration.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use botvisor::{OwnerId, Worker, WorkerError};
///
/// struct Session {
///     owner: OwnerId,
/// }
///
/// #[async_trait]
/// impl Worker for Session {
///     fn owner(&self) -> OwnerId {
///         self.owner
///     }
///
///     async fn is_running(&self) -> Result<bool, WorkerError> {
///         // ask the underlying process/connection...
///         Ok(true)
///     }
///
///     async fn stop(&self) {
///         // tear down the underlying instance...
///     }
/// }
/// ```
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    /// Returns the owner this instance runs for.
    fn owner(&self) -> OwnerId;

    /// Probes whether the underlying instance is still running.
    ///
    /// `Err` means the instance could not be observed at all; the supervisor
    /// treats that identically to a detected death.
    async fn is_running(&self) -> Result<bool, WorkerError>;

    /// Stops the underlying instance and releases its resources.
    ///
    /// Must be idempotent and absorb its own errors: the supervisor calls
    /// this defensively on instances that already died.
    async fn stop(&self);
}

/// Shared handle to a worker (`Arc<dyn Worker>`).
pub type WorkerRef = Arc<dyn Worker>;
