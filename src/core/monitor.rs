//! # Monitor task: detect that a supervised worker stopped unasked.
//!
//! One monitor task runs per supervised owner. It sleeps a fixed poll
//! interval, re-checks the registry (a manual stop may have raced the
//! wake-up), then probes the worker's liveness through its handle.
//!
//! ## Flow
//! ```text
//! loop {
//!   ├─► sleep(poll_interval)        (cancellable; exit on cancel)
//!   ├─► registry still has owner?   (no → exit, stop won the race)
//!   ├─► worker.is_running()
//!   │     ├─ Ok(true)  → continue
//!   │     ├─ Ok(false) → publish CrashDetected → crash handler → exit
//!   │     └─ Err(e)    → same as a crash (unobservable is dead) → exit
//! }
//! ```
//!
//! ## Rules
//! - The monitor never retries its own probe after an error; it always
//!   hands off to the crash handler and exits.
//! - The crash handler owns spawning any replacement monitor.
//! - Cancellation during the sleep exits immediately with no side effects.

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::core::crash;
use crate::core::supervisor::Supervisor;
use crate::events::{Event, EventKind};
use crate::workers::OwnerId;

/// Runs the poll loop for one owner until cancellation or a detected crash.
pub(crate) async fn run(sup: Arc<Supervisor>, owner: OwnerId, token: CancellationToken) {
    loop {
        select! {
            _ = token.cancelled() => return,
            _ = time::sleep(sup.cfg.poll_interval) => {}
        }

        // A manual stop may have deregistered the owner while we slept; the
        // registry is authoritative.
        let Some(worker) = sup.registry.worker(owner).await else {
            return;
        };

        match worker.is_running().await {
            Ok(true) => continue,
            Ok(false) => {
                sup.bus
                    .publish(Event::now(EventKind::CrashDetected).with_owner(owner));
            }
            Err(e) => {
                sup.bus.publish(
                    Event::now(EventKind::CrashDetected)
                        .with_owner(owner)
                        .with_reason(e.to_string()),
                );
            }
        }

        crash::handle(sup, owner, worker, token).await;
        return;
    }
}
