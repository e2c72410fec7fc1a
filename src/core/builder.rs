//! Builder wiring for the supervisor runtime.

use std::sync::Arc;

use crate::core::config::SupervisorConfig;
use crate::core::supervisor::Supervisor;
use crate::events::Bus;
use crate::persist::StatusStore;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::workers::Launch;

/// Builder for constructing a [`Supervisor`] with optional observability.
///
/// The store and launcher collaborators are required; subscribers are not.
pub struct SupervisorBuilder {
    cfg: SupervisorConfig,
    store: Arc<dyn StatusStore>,
    launcher: Arc<dyn Launch>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration and collaborators.
    pub fn new(
        cfg: SupervisorConfig,
        store: Arc<dyn StatusStore>,
        launcher: Arc<dyn Launch>,
    ) -> Self {
        Self {
            cfg,
            store,
            launcher,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (crash detection, restarts,
    /// exhaustion) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds and returns the supervisor.
    ///
    /// Must be called from within a tokio runtime: the subscriber workers
    /// and the bus listener are spawned here.
    pub fn build(self) -> Arc<Supervisor> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers));

        let sup = Arc::new(Supervisor::new_internal(
            self.cfg,
            bus,
            subs,
            self.store,
            self.launcher,
        ));
        sup.spawn_subscriber_listener();
        sup
    }
}
