//! # Dispatcher
//!
//! Turns admitted triggers into capture -> upload -> notify cycles and keeps
//! the sensor poll loop alive around them.
//!
//! ## Architecture
//!
//! ```text
//! MonitorLoop (poll task)
//!     |  sample -> gate.admit
//!     v
//! CycleDispatcher::spawn_cycle  --> tokio task: capture -> upload -> notify
//!     |                                   |
//!     |                                   v
//!     +---- TriggerWindow released on every cycle exit path
//! ```
//!
//! At most one cycle runs at a time. The loop never awaits a cycle; polling
//! continues while the cycle task runs in the background.

pub mod cycle;
pub mod metrics;
pub mod monitor;

pub use cycle::CycleDispatcher;
pub use metrics::{CycleMetrics, CycleMetricsSnapshot};
pub use monitor::{MonitorConfig, MonitorLoop};
