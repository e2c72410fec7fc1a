//! # Global runtime configuration.
//!
//! Provides [`SupervisorConfig`], centralized settings for the supervisor
//! runtime. The restart backoff table and attempt cap are deliberately
//! **not** here — they are fixed constants on
//! [`RestartPolicy`](crate::RestartPolicy), identical for every owner.

use std::time::Duration;

/// Global configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `poll_interval`: how often each monitor task probes its worker's
///   liveness. Shorter intervals detect crashes faster at the cost of more
///   probe traffic.
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus).
///   Slow subscribers that fall further behind observe `Lagged` and skip
///   older items.
/// - `grace`: maximum time [`Supervisor::shutdown`](crate::Supervisor::shutdown)
///   waits for all monitors and workers to wind down before reporting the
///   stragglers.
#[derive(Clone, Debug)]
pub struct SupervisorConfig {
    /// Interval between liveness probes of each supervised worker.
    pub poll_interval: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Maximum time to wait for graceful shutdown before giving up on
    /// stragglers.
    pub grace: Duration,
}

impl SupervisorConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SupervisorConfig {
    /// Default configuration:
    ///
    /// - `poll_interval = 30s` (crash detection latency vs. probe load)
    /// - `bus_capacity = 1024` (good baseline)
    /// - `grace = 60s` (reasonable graceful shutdown window)
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            bus_capacity: 1024,
            grace: Duration::from_secs(60),
        }
    }
}
