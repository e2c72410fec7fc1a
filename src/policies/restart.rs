//! # Restart policy: bounded attempts with a fixed backoff table.
//!
//! [`RestartPolicy`] is a pure mapping from an attempt index to a wait
//! duration, plus a [`Verdict`] on whether another attempt is allowed at
//! all. The table is fixed rather than derived from a growth factor: the
//! wait steps were chosen for interactive recovery (seconds at first,
//! minutes once the failure looks persistent).
//!
//! ```text
//! attempt  0    1     2     3     4    5+
//! wait     5s   10s   30s   60s   300s 300s (clamped to last entry)
//! ```
//!
//! No jitter is applied: waits are per-owner and never synchronized across
//! owners, so there is no herd to spread.
//!
//! The attempt cap is a fixed constant, not per-owner configuration.

use std::time::Duration;

/// Decision for one prospective restart attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Attempt again after the given wait.
    Retry(Duration),
    /// The attempt budget is spent; stop restarting until a manual start.
    GiveUp,
}

/// Pure attempt-index → wait-duration mapping with a fixed attempt cap.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use botvisor::{RestartPolicy, Verdict};
///
/// assert_eq!(RestartPolicy::delay_for(0), Duration::from_secs(5));
/// assert_eq!(RestartPolicy::delay_for(9), Duration::from_secs(300));
/// assert_eq!(RestartPolicy::verdict(5), Verdict::GiveUp);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RestartPolicy;

impl RestartPolicy {
    /// Consecutive automatic restarts allowed before giving up.
    pub const MAX_ATTEMPTS: u32 = 5;

    /// Wait before restart attempt `n`, indexed from 0.
    pub const BACKOFF: [Duration; 5] = [
        Duration::from_secs(5),
        Duration::from_secs(10),
        Duration::from_secs(30),
        Duration::from_secs(60),
        Duration::from_secs(300),
    ];

    /// Returns the wait duration for the given attempt index (0-based).
    ///
    /// Indexes past the table return the last entry.
    pub fn delay_for(attempt: u32) -> Duration {
        let last = Self::BACKOFF.len() - 1;
        Self::BACKOFF[(attempt as usize).min(last)]
    }

    /// Decides whether another restart is allowed after `attempts`
    /// consecutive failures, and how long to wait first.
    pub fn verdict(attempts: u32) -> Verdict {
        if attempts >= Self::MAX_ATTEMPTS {
            Verdict::GiveUp
        } else {
            Verdict::Retry(Self::delay_for(attempts))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(RestartPolicy::delay_for(0), Duration::from_secs(5));
        assert_eq!(RestartPolicy::delay_for(1), Duration::from_secs(10));
        assert_eq!(RestartPolicy::delay_for(2), Duration::from_secs(30));
        assert_eq!(RestartPolicy::delay_for(3), Duration::from_secs(60));
        assert_eq!(RestartPolicy::delay_for(4), Duration::from_secs(300));
    }

    #[test]
    fn test_index_clamps_to_last_entry() {
        for attempt in 0..=6u32 {
            let expected = RestartPolicy::BACKOFF[(attempt as usize).min(4)];
            assert_eq!(
                RestartPolicy::delay_for(attempt),
                expected,
                "attempt {} should wait {:?}",
                attempt,
                expected
            );
        }
        assert_eq!(RestartPolicy::delay_for(u32::MAX), Duration::from_secs(300));
    }

    #[test]
    fn test_verdict_retries_below_cap() {
        for attempts in 0..RestartPolicy::MAX_ATTEMPTS {
            assert_eq!(
                RestartPolicy::verdict(attempts),
                Verdict::Retry(RestartPolicy::delay_for(attempts))
            );
        }
    }

    #[test]
    fn test_verdict_gives_up_at_cap() {
        assert_eq!(RestartPolicy::verdict(5), Verdict::GiveUp);
        assert_eq!(RestartPolicy::verdict(6), Verdict::GiveUp);
    }
}
