//! Metric recording helpers
//!
//! Thin wrappers around the `metrics` macros so call sites stay one-liners
//! and metric names live in a single place. All metrics carry the
//! `tripshot_` prefix.

use std::time::Duration;

use metrics::{counter, histogram};

/// A trigger was admitted and a dispatch cycle started.
pub fn record_trigger_admitted() {
    counter!("tripshot_triggers_admitted_total").increment(1);
}

/// The trigger condition held but the gate rejected it.
///
/// `reason` is one of `"in_flight"` or `"cooldown"`.
pub fn record_trigger_rejected(reason: &'static str) {
    counter!("tripshot_triggers_rejected_total", "reason" => reason).increment(1);
}

/// A sensor read failed; the poll was skipped.
pub fn record_sensor_read_error() {
    counter!("tripshot_sensor_read_errors_total").increment(1);
}

/// The monitor loop hit a non-read error and backed off.
pub fn record_loop_error() {
    counter!("tripshot_loop_errors_total").increment(1);
}

/// A dispatch cycle finished.
///
/// `outcome` is the cycle outcome label (`"success"`, `"capture_failed"`,
/// `"upload_failed"`, `"notify_failed"`).
pub fn record_cycle_outcome(outcome: &'static str, duration: Duration) {
    counter!("tripshot_cycles_total", "outcome" => outcome).increment(1);
    histogram!("tripshot_cycle_duration_seconds", "outcome" => outcome)
        .record(duration.as_secs_f64());
}
