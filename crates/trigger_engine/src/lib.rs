//! # Trigger Engine
//!
//! Admission logic for the trigger-to-notification pipeline: samples the two
//! digital inputs, and decides per poll whether a new dispatch cycle may
//! start.
//!
//! The engine owns no I/O beyond the `SensorInputPort` reads and spawns no
//! tasks; it is a pure decision layer the dispatcher builds on.

mod gate;
mod sampler;
mod window;

pub use gate::DebounceGate;
pub use sampler::SensorSampler;
pub use window::TriggerWindow;
