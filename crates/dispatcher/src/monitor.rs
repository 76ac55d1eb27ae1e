//! MonitorLoop - the forever poll/admit/dispatch loop

use std::sync::Arc;
use std::time::{Duration, Instant};

use contracts::{CaptureProvider, NotifyProvider, StorageProvider, TriggerConfig};
use tracing::{debug, error, info};
use trigger_engine::{DebounceGate, SensorSampler, TriggerWindow};

use crate::cycle::CycleDispatcher;
use crate::metrics::CycleMetrics;

/// Timing knobs of the monitor loop.
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    pub cooldown: Duration,
    pub poll_interval: Duration,
    /// Pause after a non-read loop error before polling resumes.
    pub error_backoff: Duration,
}

impl From<&TriggerConfig> for MonitorConfig {
    fn from(trigger: &TriggerConfig) -> Self {
        Self {
            cooldown: trigger.cooldown(),
            poll_interval: trigger.poll_interval(),
            error_backoff: trigger.error_backoff(),
        }
    }
}

/// Samples the inputs at a fixed interval and dispatches admitted triggers.
///
/// The loop itself never terminates; the caller decides the lifetime by
/// selecting against a shutdown signal or aborting the task. Error policy:
///
/// - sensor read failure: the poll is skipped, nothing else changes
/// - any other failure: the window is disarmed, the loop sleeps
///   `error_backoff`, then resumes polling
pub struct MonitorLoop<C, S, N> {
    sampler: SensorSampler,
    gate: DebounceGate,
    dispatcher: CycleDispatcher<C, S, N>,
    window: Arc<TriggerWindow>,
    metrics: Arc<CycleMetrics>,
    config: MonitorConfig,
}

impl<C, S, N> MonitorLoop<C, S, N>
where
    C: CaptureProvider + Send + Sync + 'static,
    S: StorageProvider + Send + Sync + 'static,
    N: NotifyProvider + Send + Sync + 'static,
{
    pub fn new(
        sampler: SensorSampler,
        window: Arc<TriggerWindow>,
        dispatcher: CycleDispatcher<C, S, N>,
        metrics: Arc<CycleMetrics>,
        config: MonitorConfig,
    ) -> Self {
        let gate = DebounceGate::new(Arc::clone(&window), config.cooldown);
        Self {
            sampler,
            gate,
            dispatcher,
            window,
            metrics,
            config,
        }
    }

    /// Run until the surrounding task is cancelled.
    pub async fn run(self) {
        info!(
            cooldown_ms = self.config.cooldown.as_millis() as u64,
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "monitor loop armed"
        );

        loop {
            self.metrics.record_poll();

            match self.sampler.sample() {
                Ok(reading) => {
                    if self.gate.admit(reading, Instant::now()) {
                        self.metrics.record_admission();
                        observability::record_trigger_admitted();
                        info!("trigger admitted");
                        // Detached: polling continues while the cycle runs.
                        let _handle = self.dispatcher.spawn_cycle();
                    } else if reading.both_low() {
                        self.metrics.record_rejection();
                        let reason = if self.window.is_in_flight() {
                            "in_flight"
                        } else {
                            "cooldown"
                        };
                        observability::record_trigger_rejected(reason);
                    }
                }
                Err(err) if err.is_transient_read() => {
                    self.metrics.record_sensor_read_error();
                    observability::record_sensor_read_error();
                    debug!(error = %err, "sensor read failed, poll skipped");
                }
                Err(err) => {
                    self.metrics.record_loop_error();
                    observability::record_loop_error();
                    error!(
                        error = %err,
                        backoff_secs = self.config.error_backoff.as_secs(),
                        "monitor loop error, disarming and backing off"
                    );
                    self.window.release();
                    tokio::time::sleep(self.config.error_backoff).await;
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
