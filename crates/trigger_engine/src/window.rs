//! TriggerWindow - single-slot admission state
//!
//! Exactly one TriggerWindow exists for the process lifetime. It holds the
//! timestamp of the last admitted trigger and the "cycle in flight" flag,
//! mutated only under a single mutex so admission checks are mutually
//! exclusive with cycle completion.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Shared admission state for the debounce gate and the cycle dispatcher.
#[derive(Debug, Default)]
pub struct TriggerWindow {
    state: Mutex<WindowState>,
}

#[derive(Debug, Default)]
struct WindowState {
    last_admitted: Option<Instant>,
    in_flight: bool,
}

impl TriggerWindow {
    /// Create a fresh window: no cycle in flight, no prior trigger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to admit a trigger observed at `now`.
    ///
    /// Admits only if no cycle is in flight and more than `cooldown` has
    /// elapsed since the last admission. On admission the in-flight flag is
    /// set and the trigger time recorded atomically, before returning, so a
    /// second poll cannot also admit before the cycle starts.
    pub fn try_admit(&self, now: Instant, cooldown: Duration) -> bool {
        let mut state = self.lock();

        if state.in_flight {
            return false;
        }

        if let Some(last) = state.last_admitted {
            // Strict: elapsed time must exceed the cooldown
            if now.saturating_duration_since(last) <= cooldown {
                return false;
            }
        }

        state.in_flight = true;
        state.last_admitted = Some(now);
        true
    }

    /// Clear the in-flight flag.
    ///
    /// Called exactly once on every exit path of a dispatch cycle, and by the
    /// monitor loop's error recovery (disarming re-arms admission). Releasing
    /// an already-idle window is a no-op.
    pub fn release(&self) {
        self.lock().in_flight = false;
    }

    /// True while a dispatch cycle is running.
    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// Timestamp of the last admitted trigger, if any.
    pub fn last_admitted(&self) -> Option<Instant> {
        self.lock().last_admitted
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WindowState> {
        // A poisoned lock only means some holder panicked mid-update; the
        // two-field state is still coherent, so keep going.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
