//! DebounceGate - decides whether a sampled reading starts a dispatch cycle

use std::sync::Arc;
use std::time::{Duration, Instant};

use contracts::SensorReading;
use tracing::trace;

use crate::TriggerWindow;

/// Admission gate in front of the cycle dispatcher.
///
/// Admits a trigger only if the qualifying condition holds (both inputs LOW),
/// no cycle is currently in flight, and the cooldown since the last admitted
/// trigger has elapsed. Returning `false` is routine, not an error.
pub struct DebounceGate {
    window: Arc<TriggerWindow>,
    cooldown: Duration,
}

impl DebounceGate {
    /// Create a gate over the shared trigger window.
    pub fn new(window: Arc<TriggerWindow>, cooldown: Duration) -> Self {
        Self { window, cooldown }
    }

    /// Decide whether the reading observed at `now` starts a new cycle.
    ///
    /// On admission the window's in-flight flag is already set and the
    /// trigger time recorded when this returns, so the caller only has to
    /// start the cycle.
    pub fn admit(&self, reading: SensorReading, now: Instant) -> bool {
        if !reading.both_low() {
            return false;
        }

        let admitted = self.window.try_admit(now, self.cooldown);
        if !admitted {
            trace!(
                in_flight = self.window.is_in_flight(),
                "trigger condition met but not admitted"
            );
        }
        admitted
    }

    /// Configured cooldown period.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}
