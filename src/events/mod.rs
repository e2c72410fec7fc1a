//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the supervisor, the per-owner
//! monitor tasks, and the crash handler.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor` (start/stop/shutdown), monitor tasks
//!   (crash detection), the crash handler (backoff/restart outcomes).
//! - **Consumers**: the supervisor's subscriber listener (fans out to
//!   [`SubscriberSet`](crate::SubscriberSet)) and any direct
//!   [`Bus::subscribe`] receiver.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
