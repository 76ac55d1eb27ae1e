//! Digital input primitives: pin identifiers, levels, and per-poll readings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BCM pin number of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(u8);

impl PinId {
    /// Create a new PinId from a BCM pin number.
    #[inline]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Get the raw BCM pin number.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for PinId {
    #[inline]
    fn from(number: u8) -> Self {
        Self(number)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instantaneous logic level of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinLevel {
    High,
    Low,
}

impl PinLevel {
    /// True if the input reads logical LOW (the sensor's "active" convention).
    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

/// Levels of both monitored inputs sampled at one instant.
///
/// Ephemeral: produced per poll, consumed by the gate, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    /// Level of input A
    pub input_a: PinLevel,
    /// Level of input B
    pub input_b: PinLevel,
}

impl SensorReading {
    /// Create a reading from both input levels.
    pub const fn new(input_a: PinLevel, input_b: PinLevel) -> Self {
        Self { input_a, input_b }
    }

    /// The qualifying trigger condition: both inputs LOW.
    #[inline]
    pub const fn both_low(&self) -> bool {
        self.input_a.is_low() && self.input_b.is_low()
    }
}
