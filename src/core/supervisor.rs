//! # Supervisor: per-owner worker supervision with bounded restarts.
//!
//! The [`Supervisor`] owns the registry of supervised owners, the attempt
//! ledger, the event bus, and the two collaborator seams (status store,
//! worker launcher). It exposes the start/stop API consumed by the web
//! layer and performs graceful supervisor-wide shutdown.
//!
//! ## High-level architecture
//! ```text
//! start(owner) ──► launch worker ──► Registry.insert ──► spawn monitor task
//!                                                              │
//!                     ┌────────────────────────────────────────┘
//!                     ▼
//!            monitor::run (poll loop)
//!                     │ crash detected
//!                     ▼
//!            crash::handle (bounded restart cycle)
//!                     ├─ relaunch ok ──► Registry.replace + new monitor
//!                     └─ budget spent ─► status "error", deregister
//!
//! stop(owner) ──► Registry.remove ──► cancel token ──► join monitor
//!                     ──► worker.stop() ──► clear ledger ──► status "stopped"
//! ```
//!
//! ## Rules
//! - At most one {worker, monitor} pair per owner (registry invariant).
//! - `stop` returns only after the owner is no longer supervised — it joins
//!   the monitor task, so an in-flight restart cycle is fully wound down.
//! - Persisted status writes are totally ordered per owner: there is a
//!   single live monitor/crash-handler pair, and `stop` writes only after
//!   joining it.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::core::builder::SupervisorBuilder;
use crate::core::config::SupervisorConfig;
use crate::core::ledger::AttemptLedger;
use crate::core::monitor;
use crate::core::registry::{Entry, Registry};
use crate::error::SupervisorError;
use crate::events::{Bus, Event, EventKind};
use crate::persist::{StatusStore, WorkerConfig, WorkerStatus};
use crate::subscribers::SubscriberSet;
use crate::workers::{Launch, OwnerId};

/// Supervises one worker per owner: crash detection, bounded restarts,
/// observable status.
pub struct Supervisor {
    /// Global runtime configuration.
    pub(crate) cfg: SupervisorConfig,
    /// Event bus shared with monitors and crash handlers.
    pub(crate) bus: Bus,
    /// Fan-out set for subscribers.
    pub(crate) subs: Arc<SubscriberSet>,
    /// Authoritative map of supervised owners.
    pub(crate) registry: Registry,
    /// Per-owner consecutive restart counting.
    pub(crate) ledger: AttemptLedger,
    /// Persistence collaborator (status writes, config reads).
    pub(crate) store: Arc<dyn StatusStore>,
    /// Worker lifecycle collaborator.
    pub(crate) launcher: Arc<dyn Launch>,
}

impl Supervisor {
    /// Returns a builder for assembling a supervisor.
    pub fn builder(
        cfg: SupervisorConfig,
        store: Arc<dyn StatusStore>,
        launcher: Arc<dyn Launch>,
    ) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg, store, launcher)
    }

    pub(crate) fn new_internal(
        cfg: SupervisorConfig,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        store: Arc<dyn StatusStore>,
        launcher: Arc<dyn Launch>,
    ) -> Self {
        Self {
            cfg,
            bus,
            subs,
            registry: Registry::new(),
            ledger: AttemptLedger::new(),
            store,
            launcher,
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set.
    pub(crate) fn spawn_subscriber_listener(self: &Arc<Self>) {
        let mut rx = self.bus.subscribe();
        let subs = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => subs.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Spawns the monitor task for `owner`.
    pub(crate) fn spawn_monitor(
        self: &Arc<Self>,
        owner: OwnerId,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(monitor::run(Arc::clone(self), owner, token))
    }

    /// Creates a new independent receiver for runtime events.
    ///
    /// Useful for in-process observers that want raw events rather than a
    /// [`Subscribe`](crate::Subscribe) worker.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Starts supervising a worker for `owner`.
    ///
    /// - `manual = true` is a user-initiated start: the attempt ledger is
    ///   reset to 0 regardless of its prior value.
    /// - `manual = false` is the boot-time resume path: the ledger is
    ///   preserved so a worker that was mid-restart-budget before the host
    ///   restarted does not get a fresh budget for free.
    ///
    /// ### Errors
    /// - [`SupervisorError::AlreadySupervised`] if an entry already exists —
    ///   a caller contract violation; stop first.
    /// - [`SupervisorError::Launch`] if the worker could not be created.
    pub async fn start(
        self: &Arc<Self>,
        owner: OwnerId,
        config: &WorkerConfig,
        manual: bool,
    ) -> Result<(), SupervisorError> {
        if self.registry.contains(owner).await {
            return Err(SupervisorError::AlreadySupervised { owner });
        }

        if manual {
            self.ledger.reset(owner).await;
        }

        let worker = self
            .launcher
            .launch(owner, config)
            .await
            .map_err(|source| SupervisorError::Launch { owner, source })?;

        let token = CancellationToken::new();
        let join = self.spawn_monitor(owner, token.clone());
        let entry = Entry {
            worker,
            cancel: token,
            join,
        };

        if let Err(entry) = self.registry.insert(owner, entry).await {
            // Lost a start/start race after the early check; the other
            // caller owns supervision now.
            entry.cancel.cancel();
            entry.worker.stop().await;
            let _ = entry.join.await;
            return Err(SupervisorError::AlreadySupervised { owner });
        }

        self.store
            .set_status(owner, WorkerStatus::Running, "worker started")
            .await;
        self.bus
            .publish(Event::now(EventKind::WorkerLaunched).with_owner(owner));
        Ok(())
    }

    /// Stops supervising `owner`: cancels monitoring (including an
    /// in-flight restart backoff), stops the worker, clears the ledger, and
    /// writes status `stopped`.
    ///
    /// Idempotent: stopping an owner that is not supervised is a no-op,
    /// reported via [`EventKind::StopIgnored`] since it usually points at a
    /// caller bug.
    ///
    /// Returns only after the owner is no longer supervised.
    pub async fn stop(&self, owner: OwnerId) {
        let Some(entry) = self.registry.remove(owner).await else {
            self.bus.publish(
                Event::now(EventKind::StopIgnored)
                    .with_owner(owner)
                    .with_reason("not supervised"),
            );
            return;
        };

        entry.cancel.cancel();
        if entry.join.await.is_err() {
            self.bus.publish(
                Event::now(EventKind::MonitorPanicked)
                    .with_owner(owner)
                    .with_reason("monitor task panicked"),
            );
        }

        entry.worker.stop().await;
        self.ledger.clear(owner).await;
        self.store
            .set_status(owner, WorkerStatus::Stopped, "stopped on request")
            .await;
        self.bus
            .publish(Event::now(EventKind::WorkerStopped).with_owner(owner));
    }

    /// Stops every supervised worker, bounded by the configured grace
    /// window.
    ///
    /// Owners whose monitor task does not wind down in time are abandoned
    /// and reported via [`SupervisorError::GraceExceeded`].
    pub async fn shutdown(&self) -> Result<(), SupervisorError> {
        self.bus.publish(Event::now(EventKind::ShutdownRequested));

        let entries = self.registry.drain().await;
        for (_, entry) in &entries {
            entry.cancel.cancel();
        }

        let deadline = time::Instant::now() + self.cfg.grace;
        let mut stuck = Vec::new();
        for (owner, entry) in entries {
            let Entry { worker, join, .. } = entry;
            let teardown = async {
                let joined = join.await;
                worker.stop().await;
                joined
            };
            match time::timeout_at(deadline, teardown).await {
                Ok(joined) => {
                    if joined.is_err() {
                        self.bus.publish(
                            Event::now(EventKind::MonitorPanicked)
                                .with_owner(owner)
                                .with_reason("monitor task panicked"),
                        );
                    }
                    self.ledger.clear(owner).await;
                    self.store
                        .set_status(owner, WorkerStatus::Stopped, "supervisor shutdown")
                        .await;
                    self.bus
                        .publish(Event::now(EventKind::WorkerStopped).with_owner(owner));
                }
                Err(_) => stuck.push(owner),
            }
        }

        if stuck.is_empty() {
            self.bus.publish(Event::now(EventKind::AllStopped));
            Ok(())
        } else {
            Err(SupervisorError::GraceExceeded {
                grace: self.cfg.grace,
                stuck,
            })
        }
    }

    /// Returns true if `owner` currently has a supervised worker.
    pub async fn is_supervised(&self, owner: OwnerId) -> bool {
        self.registry.contains(owner).await
    }

    /// Returns the sorted list of currently supervised owners.
    pub async fn supervised_owners(&self) -> Vec<OwnerId> {
        self.registry.owners().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time;

    use crate::core::config::SupervisorConfig;
    use crate::core::supervisor::Supervisor;
    use crate::error::{SupervisorError, WorkerError};
    use crate::events::EventKind;
    use crate::persist::{StatusStore, WorkerConfig, WorkerStatus};
    use crate::workers::{Launch, OwnerId, Worker, WorkerRef};

    struct ScriptedWorker {
        owner: OwnerId,
        running: AtomicBool,
        probe_fails: AtomicBool,
        stops: AtomicU32,
    }

    impl ScriptedWorker {
        fn new(owner: OwnerId, alive: bool) -> Arc<Self> {
            Arc::new(Self {
                owner,
                running: AtomicBool::new(alive),
                probe_fails: AtomicBool::new(false),
                stops: AtomicU32::new(0),
            })
        }

        fn kill(&self) {
            self.running.store(false, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Worker for ScriptedWorker {
        fn owner(&self) -> OwnerId {
            self.owner
        }

        async fn is_running(&self) -> Result<bool, WorkerError> {
            if self.probe_fails.load(Ordering::SeqCst) {
                return Err(WorkerError::Probe {
                    reason: "session unobservable".into(),
                });
            }
            Ok(self.running.load(Ordering::SeqCst))
        }

        async fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
            self.running.store(false, Ordering::SeqCst);
        }
    }

    /// Launcher whose workers are born alive or dead per script, with an
    /// optional run of launches that fail outright.
    struct ScriptedLaunch {
        born_alive: bool,
        fail_next: AtomicU32,
        launched: AtomicU32,
        workers: Mutex<Vec<Arc<ScriptedWorker>>>,
    }

    impl ScriptedLaunch {
        fn new(born_alive: bool) -> Arc<Self> {
            Arc::new(Self {
                born_alive,
                fail_next: AtomicU32::new(0),
                launched: AtomicU32::new(0),
                workers: Mutex::new(Vec::new()),
            })
        }

        fn launched(&self) -> u32 {
            self.launched.load(Ordering::SeqCst)
        }

        fn fail_next(&self, n: u32) {
            self.fail_next.store(n, Ordering::SeqCst);
        }

        fn worker(&self, i: usize) -> Arc<ScriptedWorker> {
            Arc::clone(&self.workers.lock().unwrap()[i])
        }
    }

    #[async_trait]
    impl Launch for ScriptedLaunch {
        async fn launch(
            &self,
            owner: OwnerId,
            _config: &WorkerConfig,
        ) -> Result<WorkerRef, WorkerError> {
            self.launched.fetch_add(1, Ordering::SeqCst);
            if self
                .fail_next
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(WorkerError::Spawn {
                    reason: "session refused to start".into(),
                });
            }
            let worker = ScriptedWorker::new(owner, self.born_alive);
            self.workers.lock().unwrap().push(Arc::clone(&worker));
            Ok(worker)
        }
    }

    struct MemoryStore {
        statuses: Mutex<Vec<(OwnerId, WorkerStatus, String)>>,
        config_missing: AtomicBool,
    }

    impl MemoryStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                statuses: Mutex::new(Vec::new()),
                config_missing: AtomicBool::new(false),
            })
        }

        fn statuses(&self, owner: OwnerId) -> Vec<(WorkerStatus, String)> {
            self.statuses
                .lock()
                .unwrap()
                .iter()
                .filter(|(o, _, _)| *o == owner)
                .map(|(_, s, m)| (*s, m.clone()))
                .collect()
        }
    }

    #[async_trait]
    impl StatusStore for MemoryStore {
        async fn set_status(&self, owner: OwnerId, status: WorkerStatus, message: &str) {
            self.statuses
                .lock()
                .unwrap()
                .push((owner, status, message.to_string()));
        }

        async fn get_config(&self, owner: OwnerId) -> Result<WorkerConfig, WorkerError> {
            if self.config_missing.load(Ordering::SeqCst) {
                return Err(WorkerError::Config {
                    reason: format!("no configuration for owner {owner}"),
                });
            }
            Ok(WorkerConfig::new("scripted-token"))
        }
    }

    struct Rig {
        sup: Arc<Supervisor>,
        launch: Arc<ScriptedLaunch>,
        store: Arc<MemoryStore>,
    }

    fn rig(born_alive: bool) -> Rig {
        let launch = ScriptedLaunch::new(born_alive);
        let store = MemoryStore::new();
        let sup = Supervisor::builder(
            SupervisorConfig::default(),
            Arc::clone(&store) as Arc<dyn StatusStore>,
            Arc::clone(&launch) as Arc<dyn Launch>,
        )
        .build();
        Rig { sup, launch, store }
    }

    fn config() -> WorkerConfig {
        WorkerConfig::new("scripted-token")
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_rejected() {
        let rig = rig(true);
        let owner = OwnerId(1);

        rig.sup.start(owner, &config(), true).await.unwrap();
        let err = rig.sup.start(owner, &config(), true).await.unwrap_err();
        assert!(matches!(
            err,
            SupervisorError::AlreadySupervised { owner: o } if o == owner
        ));
        // the rejected start never reached the launcher
        assert_eq!(rig.launch.launched(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_start_resets_ledger() {
        let rig = rig(true);
        let owner = OwnerId(2);

        for _ in 0..3 {
            rig.sup.ledger.increment(owner).await;
        }
        rig.sup.start(owner, &config(), true).await.unwrap();
        assert_eq!(rig.sup.ledger.get(owner).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resumed_start_preserves_ledger() {
        let rig = rig(true);
        let owner = OwnerId(21);

        rig.sup.ledger.increment(owner).await;
        rig.sup.ledger.increment(owner).await;
        rig.sup.start(owner, &config(), false).await.unwrap();
        assert_eq!(rig.sup.ledger.get(owner).await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_launch_failure_surfaces_to_caller() {
        let rig = rig(true);
        let owner = OwnerId(22);
        rig.launch.fail_next(1);

        let err = rig.sup.start(owner, &config(), true).await.unwrap_err();
        assert!(matches!(err, SupervisorError::Launch { .. }));
        assert!(!rig.sup.is_supervised(owner).await);
        assert!(rig.store.statuses(owner).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let rig = rig(false); // every launched worker is born dead
        let owner = OwnerId(3);
        let mut rx = rig.sup.subscribe();

        rig.sup.start(owner, &config(), true).await.unwrap();
        time::sleep(Duration::from_secs(700)).await;

        // initial launch + exactly 5 restart attempts
        assert_eq!(rig.launch.launched(), 6);
        assert!(!rig.sup.is_supervised(owner).await);
        assert!(!rig.sup.ledger.contains(owner).await);

        let statuses = rig.store.statuses(owner);
        let (last, message) = statuses.last().unwrap();
        assert_eq!(*last, WorkerStatus::Error);
        assert!(message.contains("5 failed restart attempts"), "{message}");

        // the full backoff table was walked, in order
        let mut delays = Vec::new();
        let mut exhausted = false;
        loop {
            match rx.try_recv() {
                Ok(ev) => match ev.kind {
                    EventKind::BackoffScheduled => delays.push(ev.delay_ms.unwrap()),
                    EventKind::RestartsExhausted => exhausted = true,
                    _ => {}
                },
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("event stream broke: {e}"),
            }
        }
        assert_eq!(delays, vec![5_000, 10_000, 30_000, 60_000, 300_000]);
        assert!(exhausted);

        // no 6th attempt, ever
        time::sleep(Duration::from_secs(10_000)).await;
        assert_eq!(rig.launch.launched(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crash_then_recovery_status_sequence() {
        let rig = rig(true);
        let owner = OwnerId(42);

        rig.sup.start(owner, &config(), true).await.unwrap();
        rig.launch.worker(0).kill();
        // poll at 30s detects the crash; 5s backoff; relaunch at 35s
        time::sleep(Duration::from_secs(40)).await;

        let statuses = rig.store.statuses(owner);
        let kinds: Vec<WorkerStatus> = statuses.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            kinds,
            vec![
                WorkerStatus::Running,
                WorkerStatus::Restarting,
                WorkerStatus::Running
            ]
        );
        assert!(statuses[1].1.contains("attempt 1/5"), "{}", statuses[1].1);
        assert_eq!(rig.sup.ledger.get(owner).await, 1);
        assert!(rig.sup.is_supervised(owner).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_then_immediate_stop_never_enters_crash_cycle() {
        let rig = rig(true);
        let owner = OwnerId(7);
        let mut rx = rig.sup.subscribe();

        rig.sup.start(owner, &config(), true).await.unwrap();
        rig.sup.stop(owner).await;

        assert!(!rig.sup.is_supervised(owner).await);
        assert!(!rig.sup.ledger.contains(owner).await);

        // the monitor must have exited without ever reporting a crash
        time::sleep(Duration::from_secs(120)).await;
        loop {
            match rx.try_recv() {
                Ok(ev) => assert_ne!(ev.kind, EventKind::CrashDetected),
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("event stream broke: {e}"),
            }
        }

        let kinds: Vec<WorkerStatus> = rig
            .store
            .statuses(owner)
            .iter()
            .map(|(s, _)| *s)
            .collect();
        assert_eq!(kinds, vec![WorkerStatus::Running, WorkerStatus::Stopped]);
        assert_eq!(rig.launch.launched(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_backoff_cancels_pending_restart() {
        let rig = rig(false); // relaunched workers are born dead
        let owner = OwnerId(9);

        rig.sup.start(owner, &config(), true).await.unwrap();
        // crash 1 at t=30 (wait 5s, relaunch at 35); crash 2 at t=65 with a
        // 10s wait; stop right in the middle of that wait
        time::sleep(Duration::from_secs(70)).await;
        rig.sup.stop(owner).await;

        assert!(!rig.sup.is_supervised(owner).await);
        assert!(!rig.sup.ledger.contains(owner).await);

        let launched = rig.launch.launched();
        let status_count = rig.store.statuses(owner).len();
        assert_eq!(
            rig.store.statuses(owner).last().unwrap().0,
            WorkerStatus::Stopped
        );

        // the pending restart must never complete: no further launches, no
        // further status writes (in particular no `running` resurrection)
        time::sleep(Duration::from_secs(2_000)).await;
        assert_eq!(rig.launch.launched(), launched);
        assert_eq!(rig.store.statuses(owner).len(), status_count);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_error_is_treated_as_crash() {
        let rig = rig(true);
        let owner = OwnerId(11);
        let mut rx = rig.sup.subscribe();

        rig.sup.start(owner, &config(), true).await.unwrap();
        rig.launch.worker(0).probe_fails.store(true, Ordering::SeqCst);
        time::sleep(Duration::from_secs(40)).await;

        let mut crash_reason = None;
        loop {
            match rx.try_recv() {
                Ok(ev) if ev.kind == EventKind::CrashDetected => {
                    crash_reason = ev.reason.clone();
                }
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("event stream broke: {e}"),
            }
        }
        assert!(crash_reason.unwrap().contains("session unobservable"));

        // recovered through the ordinary restart cycle
        let kinds: Vec<WorkerStatus> = rig
            .store
            .statuses(owner)
            .iter()
            .map(|(s, _)| *s)
            .collect();
        assert_eq!(
            kinds,
            vec![
                WorkerStatus::Running,
                WorkerStatus::Restarting,
                WorkerStatus::Running
            ]
        );
        assert_eq!(rig.sup.ledger.get(owner).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_relaunch_consumes_a_fresh_attempt() {
        let rig = rig(true);
        let owner = OwnerId(13);
        let mut rx = rig.sup.subscribe();

        rig.sup.start(owner, &config(), true).await.unwrap();
        rig.launch.fail_next(1);
        rig.launch.worker(0).kill();
        // crash at 30; attempt 1 launch fails at 35; attempt 2 waits 10s
        // and succeeds at 45
        time::sleep(Duration::from_secs(50)).await;

        let statuses = rig.store.statuses(owner);
        let kinds: Vec<WorkerStatus> = statuses.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            kinds,
            vec![
                WorkerStatus::Running,
                WorkerStatus::Restarting,
                WorkerStatus::Restarting,
                WorkerStatus::Running
            ]
        );
        assert!(statuses[1].1.contains("attempt 1/5"));
        assert!(statuses[2].1.contains("attempt 2/5"));
        assert_eq!(rig.sup.ledger.get(owner).await, 2);

        let mut delays = Vec::new();
        let mut failed = 0;
        loop {
            match rx.try_recv() {
                Ok(ev) => match ev.kind {
                    EventKind::BackoffScheduled => delays.push(ev.delay_ms.unwrap()),
                    EventKind::RestartFailed => failed += 1,
                    _ => {}
                },
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("event stream broke: {e}"),
            }
        }
        assert_eq!(delays, vec![5_000, 10_000]);
        assert_eq!(failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_config_folds_into_retry_cycle() {
        let rig = rig(true);
        let owner = OwnerId(14);

        rig.sup.start(owner, &config(), true).await.unwrap();
        rig.store.config_missing.store(true, Ordering::SeqCst);
        rig.launch.worker(0).kill();
        // crash at 30; attempts 1 (t=35) and 2 (t=45) fail on config; make
        // config available again before attempt 3 (t=75)
        time::sleep(Duration::from_secs(50)).await;
        rig.store.config_missing.store(false, Ordering::SeqCst);
        time::sleep(Duration::from_secs(40)).await;

        let (last, message) = rig.store.statuses(owner).last().unwrap().clone();
        assert_eq!(last, WorkerStatus::Running);
        assert!(message.contains("attempt 3/5"), "{message}");
        assert_eq!(rig.sup.ledger.get(owner).await, 3);
        // only the initial launch and the one successful relaunch reached
        // the launcher; config failures never did
        assert_eq!(rig.launch.launched(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_unsupervised_owner_is_loud_noop() {
        let rig = rig(true);
        let owner = OwnerId(99);
        let mut rx = rig.sup.subscribe();

        rig.sup.stop(owner).await;
        rig.sup.stop(owner).await;

        assert!(rig.store.statuses(owner).is_empty());
        let mut ignored = 0;
        loop {
            match rx.try_recv() {
                Ok(ev) if ev.kind == EventKind::StopIgnored => ignored += 1,
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("event stream broke: {e}"),
            }
        }
        assert_eq!(ignored, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_every_owner() {
        let rig = rig(true);
        let owners = [OwnerId(1), OwnerId(2), OwnerId(3)];
        let mut rx = rig.sup.subscribe();

        for owner in owners {
            rig.sup.start(owner, &config(), true).await.unwrap();
        }
        assert_eq!(rig.sup.supervised_owners().await, owners.to_vec());

        rig.sup.shutdown().await.unwrap();

        assert!(rig.sup.supervised_owners().await.is_empty());
        for owner in owners {
            assert_eq!(
                rig.store.statuses(owner).last().unwrap().0,
                WorkerStatus::Stopped
            );
        }
        for i in 0..owners.len() {
            assert!(rig.launch.worker(i).stops.load(Ordering::SeqCst) >= 1);
        }

        let mut all_stopped = false;
        loop {
            match rx.try_recv() {
                Ok(ev) if ev.kind == EventKind::AllStopped => all_stopped = true,
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(e) => panic!("event stream broke: {e}"),
            }
        }
        assert!(all_stopped);
    }
}
