//! Run statistics and summary reporting.

use std::time::Duration;

use dispatcher::CycleMetricsSnapshot;

/// Statistics from a monitor run
#[derive(Debug, Clone, Default)]
pub struct MonitorStats {
    /// Counter snapshot taken at the end of the run
    pub snapshot: CycleMetricsSnapshot,

    /// Total duration of the run
    pub duration: Duration,
}

impl MonitorStats {
    pub fn new(snapshot: CycleMetricsSnapshot, duration: Duration) -> Self {
        Self { snapshot, duration }
    }

    /// Average polls per second over the run
    pub fn poll_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.snapshot.polls as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Share of completed cycles that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let completed = self.snapshot.cycles_completed();
        if completed > 0 {
            (self.snapshot.cycles_succeeded as f64 / completed as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        let s = &self.snapshot;

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Monitor Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Polls: {}", s.polls);
        println!("   ├─ Poll rate: {:.0}/s", self.poll_rate());
        println!("   ├─ Triggers admitted: {}", s.admissions);
        println!("   └─ Triggers rejected: {}", s.rejections);

        println!("\n📈 Cycles");
        println!("   ├─ Succeeded: {}", s.cycles_succeeded);
        println!("   ├─ Capture failures: {}", s.capture_failures);
        println!("   ├─ Upload failures: {}", s.upload_failures);
        println!("   ├─ Notify failures: {}", s.notify_failures);
        println!("   └─ Success rate: {:.1}%", self.success_rate());

        if s.sensor_read_errors > 0 || s.loop_errors > 0 {
            println!("\n⚠️  Errors");
            println!("   ├─ Sensor read errors: {}", s.sensor_read_errors);
            println!("   └─ Loop errors: {}", s.loop_errors);
        }

        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let snapshot = CycleMetricsSnapshot {
            polls: 1000,
            admissions: 4,
            cycles_succeeded: 3,
            capture_failures: 1,
            ..Default::default()
        };
        let stats = MonitorStats::new(snapshot, Duration::from_secs(10));
        assert!((stats.poll_rate() - 100.0).abs() < f64::EPSILON);
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rates_with_zero_activity() {
        let stats = MonitorStats::default();
        assert_eq!(stats.poll_rate(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }
}
