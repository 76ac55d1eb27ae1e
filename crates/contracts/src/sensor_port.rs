//! SensorInputPort trait - digital input abstraction
//!
//! Defines a unified interface for raw pin-level reads, decoupling the
//! sampling loop from concrete hardware access. Supports unified handling of
//! real GPIO ports and mock ports.

use crate::{MonitorError, PinId, PinLevel};

/// Digital input port trait
///
/// A pure, non-blocking read of the instantaneous pin level. No debouncing of
/// electrical noise is performed here; that is left to hardware pull
/// configuration.
///
/// # Errors
/// Fails only on hardware-level errors. Callers treat a failed read as
/// "condition not met" for that poll.
pub trait SensorInputPort: Send + Sync {
    /// Read the current level of one pin.
    fn read(&self, pin: PinId) -> Result<PinLevel, MonitorError>;
}
