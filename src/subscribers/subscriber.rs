//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], the extension point for plugging custom event
//! handlers (logging, metrics, alerting) into the runtime.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and reported; other subscribers
//!   are unaffected)
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the event **for this subscriber only**.
//! - Events are processed sequentially (FIFO) per subscriber.
//! - Subscribers never block publishers or each other.

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for runtime observability.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this subscriber's queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, not in the publisher context.
    /// Events are delivered in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in drop/panic diagnostics.
    ///
    /// Prefer short, descriptive names (e.g., "metrics", "audit"). The
    /// default uses `type_name::<Self>()`, which can be verbose — override
    /// it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// On overflow the new event is dropped for this subscriber only. The
    /// runtime clamps capacity to a minimum of 1. Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
