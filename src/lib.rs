//! # botvisor
//!
//! **Botvisor** is the worker-supervision core of a self-hosted
//! media-download service. Each account runs one long-lived worker (a
//! messaging-bot session that ingests files); botvisor owns detecting that
//! a worker died when nobody asked it to, deciding whether and when to
//! restart it, bounding the retry budget, and recording observable status
//! for operators.
//!
//! The surrounding product — web/API layer, database, the worker's own
//! message handling, file storage — stays behind trait seams
//! ([`Launch`], [`Worker`], [`StatusStore`]).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     start(owner A)      start(owner B)      start(owner C)
//!          │                   │                   │
//! ┌────────┴───────────────────┴───────────────────┴────────────────────┐
//! │  Supervisor                                                         │
//! │  - Registry  (owner → {worker handle, cancel token, join handle})   │
//! │  - AttemptLedger (owner → consecutive restarts since manual start)  │
//! │  - Bus (broadcast events) ──► SubscriberSet (fan-out to observers)  │
//! │  - StatusStore / Launch collaborators                               │
//! └──────┬──────────────────────┬──────────────────────┬────────────────┘
//!        ▼                      ▼                      ▼
//!  ┌───────────┐          ┌───────────┐          ┌───────────┐
//!  │ monitor A │          │ monitor B │          │ monitor C │   (one task
//!  │ poll loop │          │ poll loop │          │ poll loop │    per owner)
//!  └─────┬─────┘          └─────┬─────┘          └─────┬─────┘
//!        │ crash detected       │                      │
//!        ▼                      ▼                      ▼
//!   crash handler          crash handler          crash handler
//!   (bounded restart cycle; every transition writes persisted status)
//! ```
//!
//! ### Lifecycle
//! ```text
//! start(owner, config, manual) ──► launch worker ──► register ──► monitor
//!
//! monitor loop {
//!   ├─► sleep(poll_interval)            (cancellable)
//!   ├─► still registered?               (no → exit; stop won the race)
//!   └─► worker.is_running()?
//!         ├─ alive        → continue
//!         └─ dead / error → crash handler, exit
//! }
//!
//! crash handler loop {
//!   ├─► n = ledger[owner]
//!   ├─► n ≥ 5 ─► status "error", deregister, clear ledger, exit
//!   ├─► status "restarting (attempt n+1/5)"
//!   ├─► stop dead handle (defensive)
//!   ├─► sleep [5,10,30,60,300][min(n,4)]  (cancellable by manual stop)
//!   ├─► ledger[owner] = n+1; bail if owner was deregistered meanwhile
//!   ├─► read config, launch new worker
//!   │     ├─ ok   → status "running", replace registry entry, new monitor
//!   │     └─ err  → loop (the failure consumed attempt n+1)
//! }
//!
//! stop(owner) ──► deregister ──► cancel ──► join monitor ──► stop worker
//!                        ──► clear ledger ──► status "stopped"
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits                  |
//! |-----------------|----------------------------------------------------------|-------------------------------------|
//! | **Supervision** | Start/stop per-owner workers, bounded automatic restarts | [`Supervisor`]                      |
//! | **Policies**    | Fixed backoff table and attempt cap                      | [`RestartPolicy`], [`Verdict`]      |
//! | **Collaborators** | Worker lifecycle and persistence seams                 | [`Launch`], [`Worker`], [`StatusStore`] |
//! | **Status**      | The externally visible per-owner signal                  | [`WorkerStatus`]                    |
//! | **Observability** | Lifecycle events with fan-out to subscribers           | [`Event`], [`Subscribe`]            |
//! | **Errors**      | Typed errors for the API boundary and worker lifecycle   | [`SupervisorError`], [`WorkerError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use botvisor::{
//!     Launch, OwnerId, StatusStore, Supervisor, SupervisorConfig, WorkerConfig,
//! };
//!
//! async fn wire(store: Arc<dyn StatusStore>, launcher: Arc<dyn Launch>) {
//!     let sup = Supervisor::builder(SupervisorConfig::default(), store, launcher).build();
//!
//!     let owner = OwnerId(42);
//!     let config = WorkerConfig::new("bot-token");
//!     sup.start(owner, &config, true).await.expect("fresh owner");
//!
//!     // ... later, on user request:
//!     sup.stop(owner).await;
//! }
//! ```

mod core;
mod error;
mod events;
mod persist;
mod policies;
mod subscribers;
mod workers;

// ---- Public re-exports ----

pub use core::{Supervisor, SupervisorBuilder, SupervisorConfig};
pub use error::{SupervisorError, WorkerError};
pub use events::{Bus, Event, EventKind};
pub use persist::{StatusStore, WorkerConfig, WorkerStatus};
pub use policies::{RestartPolicy, Verdict};
pub use subscribers::{Subscribe, SubscriberSet};
pub use workers::{Launch, OwnerId, Worker, WorkerRef};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
