//! Event subscribers for the botvisor runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`]
//! fan-out, and a built-in stdout logger behind the `logging` feature.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   monitors / crash handler ── publish(Event) ──► Bus
//!                                                   │
//!                                    subscriber listener (in Supervisor)
//!                                                   │
//!                                          SubscriberSet::emit(&Event)
//!                                        ┌──────────┼──────────┐
//!                                        ▼          ▼          ▼
//!                                    LogWriter   Metrics    Custom ...
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
