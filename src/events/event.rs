//! # Runtime events emitted by the supervisor, monitors, and crash handler.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Lifecycle events**: worker supervision flow (launched, crash
//!   detected, backoff scheduled, restarted, exhausted)
//! - **Management events**: manual stop outcomes
//! - **Shutdown events**: supervisor-wide teardown
//!
//! The [`Event`] struct carries metadata such as timestamps, the owner id,
//! attempt numbers, and backoff delays.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore exact order when events are observed
//! out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use botvisor::{Event, EventKind, OwnerId};
//!
//! let ev = Event::now(EventKind::BackoffScheduled)
//!     .with_owner(OwnerId(42))
//!     .with_attempt(2)
//!     .with_delay(Duration::from_secs(10));
//!
//! assert_eq!(ev.kind, EventKind::BackoffScheduled);
//! assert_eq!(ev.owner, Some(OwnerId(42)));
//! assert_eq!(ev.delay_ms, Some(10_000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::workers::OwnerId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Worker lifecycle events ===
    /// A worker was launched through a manual start.
    ///
    /// Sets: `owner`, `at`, `seq`.
    WorkerLaunched,

    /// The monitor observed a worker dead (or unobservable) without a
    /// preceding manual stop.
    ///
    /// Sets: `owner`, `reason` (probe error, if any), `at`, `seq`.
    CrashDetected,

    /// A restart attempt was scheduled after a crash.
    ///
    /// Sets: `owner`, `attempt` (upcoming, 1-based), `delay_ms`, `at`, `seq`.
    BackoffScheduled,

    /// A restart attempt failed to produce a worker (launch or config
    /// failure); another attempt may follow.
    ///
    /// Sets: `owner`, `attempt`, `reason`, `at`, `seq`.
    RestartFailed,

    /// A restart attempt succeeded; the worker is supervised again.
    ///
    /// Sets: `owner`, `attempt`, `at`, `seq`.
    WorkerRestarted,

    /// The attempt budget is spent; the owner's worker stays down until a
    /// manual start.
    ///
    /// Sets: `owner`, `attempt` (the cap), `at`, `seq`.
    RestartsExhausted,

    // === Management events ===
    /// A worker was stopped on request (or during supervisor shutdown).
    ///
    /// Sets: `owner`, `at`, `seq`.
    WorkerStopped,

    /// A stop was requested for an owner that is not supervised.
    ///
    /// Loud but harmless: stop is idempotent, yet an unexpected no-op stop
    /// usually points at a caller bug.
    ///
    /// Sets: `owner`, `reason`, `at`, `seq`.
    StopIgnored,

    /// The monitor task for an owner terminated abnormally.
    ///
    /// Sets: `owner`, `reason`, `at`, `seq`.
    MonitorPanicked,

    // === Shutdown events ===
    /// Supervisor-wide shutdown began.
    ShutdownRequested,

    /// Every supervised worker stopped within the grace window.
    AllStopped,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Owner the event concerns, if any.
    pub owner: Option<OwnerId>,
    /// Restart attempt number (1-based).
    pub attempt: Option<u32>,
    /// Backoff delay before the next attempt in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, ignore causes, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            owner: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches the owner id.
    #[inline]
    pub fn with_owner(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Attaches a restart attempt number.
    #[inline]
    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }

    /// Attaches a backoff delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::WorkerLaunched);
        let b = Event::now(EventKind::WorkerStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::now(EventKind::RestartFailed)
            .with_owner(OwnerId(1))
            .with_attempt(3)
            .with_reason("boom");
        assert_eq!(ev.owner, Some(OwnerId(1)));
        assert_eq!(ev.attempt, Some(3));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
    }

    #[test]
    fn test_delay_saturates_at_u32_millis() {
        let ev = Event::now(EventKind::BackoffScheduled)
            .with_delay(Duration::from_secs(u64::MAX / 1_000_000));
        assert_eq!(ev.delay_ms, Some(u32::MAX));
    }
}
