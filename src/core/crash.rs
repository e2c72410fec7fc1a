//! # Crash handler: the bounded stop-wait-relaunch cycle.
//!
//! Invoked exactly once per detected crash. Runs the restart state machine
//! as an explicit loop (a relaunch failure re-enters the cap check with the
//! incremented ledger, so termination within `MAX_ATTEMPTS` iterations is
//! guaranteed by construction).
//!
//! ## State machine
//! ```text
//! running ──► restarting ──► running   (relaunch succeeded)
//!                  │
//!                  └───────► error     (attempt budget spent)
//!
//! running|restarting ──► stopped       only via manual stop, never here
//! ```
//!
//! ## Rules
//! - Every transition writes persisted status **before** proceeding.
//! - The backoff sleep and the relaunch share the monitor's cancellation
//!   token: a manual stop during either aborts the cycle with no further
//!   status writes.
//! - After the sleep, registry membership is re-checked; a deregistered
//!   owner is never resurrected.
//! - The dead handle is torn down defensively even though it already died,
//!   to release whatever it still holds.

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::core::registry::Entry;
use crate::core::supervisor::Supervisor;
use crate::events::{Event, EventKind};
use crate::persist::WorkerStatus;
use crate::policies::{RestartPolicy, Verdict};
use crate::workers::{OwnerId, WorkerRef};

/// Drives restarts for `owner` after its worker died, until the worker is
/// supervised again, the attempt budget is spent, or a manual stop cancels
/// the cycle.
pub(crate) async fn handle(
    sup: Arc<Supervisor>,
    owner: OwnerId,
    worker: WorkerRef,
    token: CancellationToken,
) {
    loop {
        let attempts = sup.ledger.get(owner).await;

        let delay = match RestartPolicy::verdict(attempts) {
            Verdict::Retry(delay) => delay,
            Verdict::GiveUp => {
                sup.store
                    .set_status(
                        owner,
                        WorkerStatus::Error,
                        &format!(
                            "gave up after {} failed restart attempts; start the worker manually to retry",
                            RestartPolicy::MAX_ATTEMPTS
                        ),
                    )
                    .await;
                worker.stop().await;
                sup.registry.remove(owner).await;
                sup.ledger.clear(owner).await;
                sup.bus.publish(
                    Event::now(EventKind::RestartsExhausted)
                        .with_owner(owner)
                        .with_attempt(attempts),
                );
                return;
            }
        };

        sup.store
            .set_status(
                owner,
                WorkerStatus::Restarting,
                &format!(
                    "restarting (attempt {}/{})",
                    attempts + 1,
                    RestartPolicy::MAX_ATTEMPTS
                ),
            )
            .await;

        // Already dead, but tear it down to release resources.
        worker.stop().await;

        sup.bus.publish(
            Event::now(EventKind::BackoffScheduled)
                .with_owner(owner)
                .with_attempt(attempts + 1)
                .with_delay(delay),
        );
        select! {
            _ = time::sleep(delay) => {}
            _ = token.cancelled() => return,
        }

        let attempt = sup.ledger.increment(owner).await;

        // A manual stop during the wait deregisters the owner; the pending
        // restart must not resurrect it.
        if !sup.registry.contains(owner).await {
            return;
        }

        let config = match sup.store.get_config(owner).await {
            Ok(config) => config,
            Err(e) => {
                sup.bus.publish(
                    Event::now(EventKind::RestartFailed)
                        .with_owner(owner)
                        .with_attempt(attempt)
                        .with_reason(e.to_string()),
                );
                continue;
            }
        };

        let launched = select! {
            res = sup.launcher.launch(owner, &config) => res,
            _ = token.cancelled() => return,
        };
        let new_worker = match launched {
            Ok(new_worker) => new_worker,
            Err(e) => {
                sup.bus.publish(
                    Event::now(EventKind::RestartFailed)
                        .with_owner(owner)
                        .with_attempt(attempt)
                        .with_reason(e.to_string()),
                );
                continue;
            }
        };

        let new_token = CancellationToken::new();
        let join = sup.spawn_monitor(owner, new_token.clone());
        let entry = Entry {
            worker: new_worker,
            cancel: new_token,
            join,
        };
        match sup.registry.replace(owner, entry).await {
            Ok(_previous) => {
                sup.store
                    .set_status(
                        owner,
                        WorkerStatus::Running,
                        &format!(
                            "recovered after restart (attempt {}/{})",
                            attempt,
                            RestartPolicy::MAX_ATTEMPTS
                        ),
                    )
                    .await;
                sup.bus.publish(
                    Event::now(EventKind::WorkerRestarted)
                        .with_owner(owner)
                        .with_attempt(attempt),
                );
                return;
            }
            Err(entry) => {
                // Stopped while we were relaunching: tear the fresh worker
                // down and leave without a status write.
                entry.cancel.cancel();
                entry.worker.stop().await;
                return;
            }
        }
    }
}
