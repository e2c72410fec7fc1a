//! End-to-end walkthrough with in-memory collaborators: start a worker,
//! kill it, watch the supervisor bring it back, then stop it.
//!
//! Run with: `cargo run --example supervise`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use botvisor::{
    Event, Launch, OwnerId, StatusStore, Subscribe, Supervisor, SupervisorConfig, Worker,
    WorkerConfig, WorkerError, WorkerRef, WorkerStatus,
};

/// Worker whose liveness is a flag the demo can flip.
struct DemoWorker {
    owner: OwnerId,
    running: AtomicBool,
}

#[async_trait]
impl Worker for DemoWorker {
    fn owner(&self) -> OwnerId {
        self.owner
    }

    async fn is_running(&self) -> Result<bool, WorkerError> {
        Ok(self.running.load(Ordering::SeqCst))
    }

    async fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Launcher that hands out [`DemoWorker`]s and remembers the latest one.
#[derive(Default)]
struct DemoLaunch {
    latest: Mutex<Option<Arc<DemoWorker>>>,
}

impl DemoLaunch {
    fn kill_latest(&self) {
        if let Some(worker) = self.latest.lock().unwrap().as_ref() {
            worker.running.store(false, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl Launch for DemoLaunch {
    async fn launch(&self, owner: OwnerId, _config: &WorkerConfig) -> Result<WorkerRef, WorkerError> {
        let worker = Arc::new(DemoWorker {
            owner,
            running: AtomicBool::new(true),
        });
        *self.latest.lock().unwrap() = Some(Arc::clone(&worker));
        println!("-- launcher: new session for owner {owner}");
        Ok(worker)
    }
}

/// Store that prints status writes instead of persisting them.
struct PrintStore;

#[async_trait]
impl StatusStore for PrintStore {
    async fn set_status(&self, owner: OwnerId, status: WorkerStatus, message: &str) {
        println!("-- status[{owner}] {status}: {message}");
    }

    async fn get_config(&self, _owner: OwnerId) -> Result<WorkerConfig, WorkerError> {
        Ok(WorkerConfig::new("demo-token"))
    }
}

/// Subscriber printing every runtime event.
struct PrintEvents;

#[async_trait]
impl Subscribe for PrintEvents {
    async fn on_event(&self, ev: &Event) {
        println!(
            "-- event #{} {:?} owner={:?} attempt={:?} delay_ms={:?}",
            ev.seq, ev.kind, ev.owner, ev.attempt, ev.delay_ms
        );
    }

    fn name(&self) -> &'static str {
        "print"
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = SupervisorConfig::default();
    cfg.poll_interval = Duration::from_secs(1);

    let launcher = Arc::new(DemoLaunch::default());
    let sup = Supervisor::builder(cfg, Arc::new(PrintStore), Arc::clone(&launcher) as _)
        .with_subscribers(vec![Arc::new(PrintEvents)])
        .build();

    let owner = OwnerId(42);
    sup.start(owner, &WorkerConfig::new("demo-token"), true).await?;

    println!("== worker up; killing it in 2s");
    tokio::time::sleep(Duration::from_secs(2)).await;
    launcher.kill_latest();

    // next poll detects the crash; first backoff is 5s, then a relaunch
    println!("== waiting for the supervisor to notice and recover");
    tokio::time::sleep(Duration::from_secs(10)).await;

    println!("== stopping");
    sup.stop(owner).await;
    Ok(())
}
