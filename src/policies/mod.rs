//! Restart policy.
//!
//! This module holds the knobs that control **if** a crashed worker is
//! restarted and **how long** to wait first.
//!
//! ## Contents
//! - [`RestartPolicy`] fixed backoff table + attempt cap
//! - [`Verdict`] retry-with-delay vs. give-up decision
//!
//! ## Quick wiring
//! ```text
//! crash handler:
//!     RestartPolicy::verdict(ledger value n)
//!         ├─ Retry(delay) ─► status "restarting", cancellable sleep, relaunch
//!         └─ GiveUp       ─► status "error", deregister owner
//! ```

mod restart;

pub use restart::{RestartPolicy, Verdict};
