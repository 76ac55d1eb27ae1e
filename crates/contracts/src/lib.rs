//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Trigger admission and cooldown use monotonic `std::time::Instant`
//! - Human-facing timestamps (snapshot names, notification body) use wall-clock time

mod artifact;
mod blueprint;
mod error;
mod outcome;
mod pin;
mod provider;
mod sensor_port;

pub use artifact::*;
pub use blueprint::*;
pub use error::*;
pub use outcome::CycleOutcome;
pub use pin::{PinId, PinLevel, SensorReading};
pub use provider::*;
pub use sensor_port::SensorInputPort;
