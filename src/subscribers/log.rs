//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [launched] owner=42
//! [crash] owner=42
//! [backoff] owner=42 attempt=1 delay_ms=5000
//! [restart-failed] owner=42 attempt=2 err="worker spawn failed: boom"
//! [restarted] owner=42 attempt=1
//! [exhausted] owner=42 attempts=5
//! [stopped] owner=42
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use —
/// implement a custom [`Subscribe`] for structured logging or metrics.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::WorkerLaunched => {
                if let Some(owner) = e.owner {
                    println!("[launched] owner={owner}");
                }
            }
            EventKind::CrashDetected => {
                println!("[crash] owner={:?} reason={:?}", e.owner, e.reason);
            }
            EventKind::BackoffScheduled => {
                println!(
                    "[backoff] owner={:?} attempt={:?} delay_ms={:?}",
                    e.owner, e.attempt, e.delay_ms
                );
            }
            EventKind::RestartFailed => {
                println!(
                    "[restart-failed] owner={:?} attempt={:?} err={:?}",
                    e.owner, e.attempt, e.reason
                );
            }
            EventKind::WorkerRestarted => {
                println!("[restarted] owner={:?} attempt={:?}", e.owner, e.attempt);
            }
            EventKind::RestartsExhausted => {
                println!("[exhausted] owner={:?} attempts={:?}", e.owner, e.attempt);
            }
            EventKind::WorkerStopped => {
                println!("[stopped] owner={:?}", e.owner);
            }
            EventKind::StopIgnored => {
                println!("[stop-ignored] owner={:?} reason={:?}", e.owner, e.reason);
            }
            EventKind::MonitorPanicked => {
                println!("[monitor-panicked] owner={:?} reason={:?}", e.owner, e.reason);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::AllStopped => {
                println!("[all-stopped]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
