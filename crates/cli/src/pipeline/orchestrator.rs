//! Monitor orchestrator - wires hardware, providers, and the poll loop.
//!
//! Hardware and credential setup is retried with a fixed backoff: the service
//! typically starts at boot, before the camera stack and network are ready.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{MonitorBlueprint, MonitorError, SensorInputPort};
use dispatcher::{CycleDispatcher, CycleMetrics, MonitorConfig, MonitorLoop};
use providers::{GcsStorage, LibcameraCapture, SysfsGpio, TwilioMessenger};
use tracing::{info, warn};
use trigger_engine::{SensorSampler, TriggerWindow};

use super::MonitorStats;

const SETUP_BACKOFF: Duration = Duration::from_secs(5);

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The monitor blueprint configuration
    pub blueprint: MonitorBlueprint,

    /// Stop after this long (None = run until interrupted)
    pub duration: Option<Duration>,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,

    /// Give up setup after this many attempts (None = retry forever)
    pub max_setup_attempts: Option<u32>,
}

/// Builds a ready-to-run [`MonitorRuntime`] from configuration.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Set up hardware and providers, retrying on setup failure.
    pub async fn prepare(self) -> Result<MonitorRuntime> {
        let blueprint = self.config.blueprint;

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let (gpio, camera) = {
            let mut attempt = 0u32;
            loop {
                attempt += 1;
                match setup_hardware(&blueprint) {
                    Ok(pair) => break pair,
                    Err(e) => {
                        if let Some(max) = self.config.max_setup_attempts {
                            if attempt >= max {
                                return Err(e).with_context(|| {
                                    format!("Hardware setup failed after {attempt} attempts")
                                });
                            }
                        }
                        warn!(
                            error = %e,
                            attempt,
                            backoff_secs = SETUP_BACKOFF.as_secs(),
                            "Hardware setup failed, retrying"
                        );
                        tokio::time::sleep(SETUP_BACKOFF).await;
                    }
                }
            }
        };

        info!(
            input_a = blueprint.pins.input_a,
            input_b = blueprint.pins.input_b,
            "Hardware ready"
        );

        let storage = GcsStorage::new(&blueprint.storage);
        let messenger = TwilioMessenger::new(&blueprint.notify);

        let gpio = Arc::new(gpio);
        let window = Arc::new(TriggerWindow::new());
        let metrics = Arc::new(CycleMetrics::new());

        let port: Arc<dyn SensorInputPort> = gpio.clone();
        let sampler = SensorSampler::new(port, blueprint.pins.pin_a(), blueprint.pins.pin_b());
        let cycle_dispatcher = CycleDispatcher::new(
            Arc::new(camera),
            Arc::new(storage),
            Arc::new(messenger),
            Arc::clone(&window),
            Arc::clone(&metrics),
        );
        let monitor = MonitorLoop::new(
            sampler,
            window,
            cycle_dispatcher,
            Arc::clone(&metrics),
            MonitorConfig::from(&blueprint.trigger),
        );

        Ok(MonitorRuntime {
            monitor,
            gpio,
            metrics,
            duration: self.config.duration,
        })
    }
}

/// The pieces that can fail transiently at startup: GPIO export and the
/// snapshot directory.
fn setup_hardware(
    blueprint: &MonitorBlueprint,
) -> Result<(SysfsGpio, LibcameraCapture), MonitorError> {
    let gpio = SysfsGpio::export(&[blueprint.pins.pin_a(), blueprint.pins.pin_b()])?;
    let camera = LibcameraCapture::new(&blueprint.camera)?;
    Ok((gpio, camera))
}

/// A fully wired monitor, ready to poll.
pub struct MonitorRuntime {
    monitor: MonitorLoop<LibcameraCapture, GcsStorage, TwilioMessenger>,
    gpio: Arc<SysfsGpio>,
    metrics: Arc<CycleMetrics>,
    duration: Option<Duration>,
}

impl MonitorRuntime {
    /// Shared GPIO port, for releasing pins after shutdown.
    pub fn gpio(&self) -> Arc<SysfsGpio> {
        Arc::clone(&self.gpio)
    }

    /// Shared counters, for reporting after an interrupted run.
    pub fn metrics(&self) -> Arc<CycleMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the monitor loop, bounded by the configured duration if any.
    pub async fn run(self) -> MonitorStats {
        let started = Instant::now();
        let metrics = Arc::clone(&self.metrics);

        match self.duration {
            Some(limit) => {
                if tokio::time::timeout(limit, self.monitor.run()).await.is_err() {
                    info!(limit_secs = limit.as_secs(), "Duration limit reached");
                }
            }
            None => self.monitor.run().await,
        }

        MonitorStats::new(metrics.snapshot(), started.elapsed())
    }
}
