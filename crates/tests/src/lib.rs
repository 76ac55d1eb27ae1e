//! # Integration Tests
//!
//! End-to-end tests over the full monitor pipeline with in-memory providers.
//!
//! Covers:
//! - Trigger to notification flow (poll -> gate -> capture -> upload -> notify)
//! - Failure short-circuiting and recovery across cycles
//! - Cooldown behavior under a scripted trigger sequence
//! - Configuration to runtime wiring

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use contracts::{PinId, PinLevel};
    use dispatcher::{CycleDispatcher, CycleMetrics, MonitorConfig, MonitorLoop};
    use providers::mock::{MockCapture, MockInputPort, MockNotify, MockStorage};
    use trigger_engine::{SensorSampler, TriggerWindow};

    const PIN_A: PinId = PinId::new(18);
    const PIN_B: PinId = PinId::new(23);

    struct Harness {
        port: Arc<MockInputPort>,
        capture: Arc<MockCapture>,
        storage: Arc<MockStorage>,
        notify: Arc<MockNotify>,
        metrics: Arc<CycleMetrics>,
        monitor: MonitorLoop<MockCapture, MockStorage, MockNotify>,
    }

    fn harness(config: MonitorConfig) -> Harness {
        let port = Arc::new(MockInputPort::new());
        let capture = Arc::new(MockCapture::new());
        let storage = Arc::new(MockStorage::default());
        let notify = Arc::new(MockNotify::new());

        let window = Arc::new(TriggerWindow::new());
        let metrics = Arc::new(CycleMetrics::new());
        let port_handle: Arc<dyn contracts::SensorInputPort> = port.clone();
        let sampler = SensorSampler::new(port_handle, PIN_A, PIN_B);
        let cycle_dispatcher = CycleDispatcher::new(
            Arc::clone(&capture),
            Arc::clone(&storage),
            Arc::clone(&notify),
            Arc::clone(&window),
            Arc::clone(&metrics),
        );
        let monitor = MonitorLoop::new(
            sampler,
            window,
            cycle_dispatcher,
            Arc::clone(&metrics),
            config,
        );

        Harness {
            port,
            capture,
            storage,
            notify,
            metrics,
            monitor,
        }
    }

    fn fast_config() -> MonitorConfig {
        MonitorConfig {
            cooldown: Duration::from_millis(30),
            poll_interval: Duration::from_millis(2),
            error_backoff: Duration::from_millis(50),
        }
    }

    async fn run_for(monitor: MonitorLoop<MockCapture, MockStorage, MockNotify>, dur: Duration) {
        let task = tokio::spawn(monitor.run());
        tokio::time::sleep(dur).await;
        task.abort();
        let _ = task.await;
        // Let in-flight cycle tasks drain
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_trigger_to_notification_flow() {
        let h = harness(fast_config());
        h.port.set_level(PIN_A, PinLevel::Low);
        h.port.set_level(PIN_B, PinLevel::Low);

        run_for(h.monitor, Duration::from_millis(200)).await;

        let captures = h.capture.calls();
        assert!(captures >= 2, "expected repeated cycles, got {captures}");

        let sent = h.notify.sent();
        assert_eq!(sent.len() as u64, h.storage.calls());
        for (url, timestamp) in &sent {
            assert!(
                url.starts_with("https://cdn.example/mock_snapshot_"),
                "{url}"
            );
            assert!(url.ends_with(".jpg"), "{url}");
            // "%Y-%m-%d %H:%M:%S"
            assert_eq!(timestamp.len(), 19, "{timestamp}");
        }
    }

    #[tokio::test]
    async fn test_single_low_pin_never_triggers() {
        let h = harness(fast_config());
        h.port.set_level(PIN_A, PinLevel::Low);
        // PIN_B stays HIGH

        run_for(h.monitor, Duration::from_millis(60)).await;

        assert_eq!(h.capture.calls(), 0);
        assert_eq!(h.metrics.snapshot().admissions, 0);
        assert!(h.metrics.snapshot().polls > 0);
    }

    #[tokio::test]
    async fn test_capture_failure_short_circuits_and_recovers() {
        let h = harness(fast_config());
        h.port.set_level(PIN_A, PinLevel::Low);
        h.port.set_level(PIN_B, PinLevel::Low);
        h.capture.set_fail(true);

        let capture = Arc::clone(&h.capture);
        let task = tokio::spawn(h.monitor.run());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(capture.calls() >= 1);
        assert_eq!(h.storage.calls(), 0, "upload must not run after capture failure");
        assert!(h.notify.sent().is_empty());

        // Recovery: cycles succeed again once the camera comes back
        capture.set_fail(false);
        tokio::time::sleep(Duration::from_millis(100)).await;
        task.abort();
        let _ = task.await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(h.storage.calls() >= 1, "expected successful cycle after recovery");
        assert!(!h.notify.sent().is_empty());

        let snapshot = h.metrics.snapshot();
        assert!(snapshot.capture_failures >= 1);
        assert!(snapshot.cycles_succeeded >= 1);
    }

    #[tokio::test]
    async fn test_upload_failure_skips_notify() {
        let h = harness(fast_config());
        h.port.set_level(PIN_A, PinLevel::Low);
        h.port.set_level(PIN_B, PinLevel::Low);
        h.storage.set_fail(true);

        run_for(h.monitor, Duration::from_millis(100)).await;

        assert!(h.capture.calls() >= 1);
        assert!(h.storage.calls() >= 1);
        assert!(h.notify.sent().is_empty());
        assert!(h.metrics.snapshot().upload_failures >= 1);
    }

    #[tokio::test]
    async fn test_read_failures_only_skip_polls() {
        let h = harness(fast_config());
        h.port.set_level(PIN_A, PinLevel::Low);
        h.port.set_level(PIN_B, PinLevel::Low);
        h.port.fail_reads(true);

        let port = Arc::clone(&h.port);
        let task = tokio::spawn(h.monitor.run());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(h.capture.calls(), 0);

        // Reads come back; triggers flow again without restart
        port.fail_reads(false);
        tokio::time::sleep(Duration::from_millis(100)).await;
        task.abort();
        let _ = task.await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        let snapshot = h.metrics.snapshot();
        assert!(snapshot.sensor_read_errors > 0);
        assert_eq!(snapshot.loop_errors, 0);
        assert!(h.capture.calls() >= 1);
    }
}

#[cfg(test)]
mod cooldown_tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use contracts::{PinLevel, SensorReading};
    use trigger_engine::{DebounceGate, TriggerWindow};

    const COOLDOWN: Duration = Duration::from_secs(1);

    fn both_low() -> SensorReading {
        SensorReading::new(PinLevel::Low, PinLevel::Low)
    }

    /// The canonical trigger sequence: admit, hold through the cooldown,
    /// re-admit once it has strictly elapsed.
    #[test]
    fn test_scripted_trigger_sequence() {
        let window = Arc::new(TriggerWindow::new());
        let gate = DebounceGate::new(Arc::clone(&window), COOLDOWN);
        let t0 = Instant::now();

        // t=0: condition met, admitted
        assert!(gate.admit(both_low(), t0));
        window.release();

        // Condition still held at t=0.4s and t=0.9s: rejected by cooldown
        assert!(!gate.admit(both_low(), t0 + Duration::from_millis(400)));
        assert!(!gate.admit(both_low(), t0 + Duration::from_millis(900)));

        // Exactly at the cooldown boundary: still rejected
        assert!(!gate.admit(both_low(), t0 + COOLDOWN));

        // Past the boundary: admitted again
        assert!(gate.admit(both_low(), t0 + COOLDOWN + Duration::from_millis(1)));
    }

    /// A long-running cycle blocks re-admission even after the cooldown.
    #[test]
    fn test_in_flight_cycle_blocks_admission_past_cooldown() {
        let window = Arc::new(TriggerWindow::new());
        let gate = DebounceGate::new(Arc::clone(&window), COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.admit(both_low(), t0));
        // Cycle still running 3 cooldowns later
        assert!(!gate.admit(both_low(), t0 + COOLDOWN * 3));

        window.release();
        assert!(gate.admit(both_low(), t0 + COOLDOWN * 3));
    }
}

#[cfg(test)]
mod config_tests {
    use std::time::Duration;

    use config_loader::{ConfigFormat, ConfigLoader};
    use dispatcher::MonitorConfig;

    const SAMPLE_TOML: &str = r#"
[pins]
input_a = 18
input_b = 23

[trigger]
cooldown_secs = 2.5
poll_interval_ms = 5

[camera]
image_dir = "/home/pi/camera_snapshots"

[storage]
bucket = "redlight-snapshots"
base_url = "https://storage.example.com/redlight-snapshots"

[notify]
account_sid = "AC0000"
from = "whatsapp:+10000000000"
to = "whatsapp:+19999999999"
"#;

    #[test]
    fn test_blueprint_to_monitor_config() {
        let blueprint = ConfigLoader::load_from_str(SAMPLE_TOML, ConfigFormat::Toml).unwrap();
        let config = MonitorConfig::from(&blueprint.trigger);

        assert_eq!(config.cooldown, Duration::from_secs_f64(2.5));
        assert_eq!(config.poll_interval, Duration::from_millis(5));
        assert_eq!(config.error_backoff, Duration::from_secs(5));
    }

    #[test]
    fn test_defaults_fill_omitted_sections() {
        let blueprint = ConfigLoader::load_from_str(SAMPLE_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(blueprint.camera.width, 1296);
        assert_eq!(blueprint.camera.shutter_us, 10_000);
        assert_eq!(blueprint.storage.token_env, "STORAGE_ACCESS_TOKEN");
        assert_eq!(blueprint.notify.auth_token_env, "TWILIO_AUTH_TOKEN");
        assert!(blueprint.notify.template.starts_with("Alert!"));
    }
}
