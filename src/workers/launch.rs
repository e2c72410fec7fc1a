//! # Worker lifecycle collaborator.
//!
//! [`Launch`] is the seam through which the supervisor creates worker
//! instances — at manual start and on every automatic restart. The actual
//! session plumbing (connecting to the messaging service, wiring the
//! download pipeline) lives behind this trait and is out of scope here.

use async_trait::async_trait;

use crate::error::WorkerError;
use crate::persist::WorkerConfig;
use crate::workers::worker::{OwnerId, WorkerRef};

/// Creates worker instances from an owner's persisted configuration.
///
/// A launch failure during an automatic restart is not fatal: the crash
/// handler counts it as a consumed attempt and schedules the next one.
#[async_trait]
pub trait Launch: Send + Sync + 'static {
    /// Creates and starts a new worker instance for `owner`.
    ///
    /// On success the returned handle must already be live (its
    /// [`is_running`](crate::Worker::is_running) probe reports `true` until
    /// the instance actually dies).
    async fn launch(&self, owner: OwnerId, config: &WorkerConfig) -> Result<WorkerRef, WorkerError>;
}
