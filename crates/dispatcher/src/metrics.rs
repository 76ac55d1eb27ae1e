//! In-process counters for the monitor loop and dispatch cycles
//!
//! These back the end-of-run summary; the Prometheus export in the
//! observability crate is recorded separately at the call sites.

use std::sync::atomic::{AtomicU64, Ordering};

use contracts::CycleOutcome;

/// Lock-free counters shared between the poll loop and cycle tasks.
#[derive(Debug, Default)]
pub struct CycleMetrics {
    polls: AtomicU64,
    admissions: AtomicU64,
    rejections: AtomicU64,
    sensor_read_errors: AtomicU64,
    loop_errors: AtomicU64,
    cycles_succeeded: AtomicU64,
    capture_failures: AtomicU64,
    upload_failures: AtomicU64,
    notify_failures: AtomicU64,
}

impl CycleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_poll(&self) {
        self.polls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_admission(&self) {
        self.admissions.fetch_add(1, Ordering::Relaxed);
    }

    /// Trigger condition held, but the gate said no.
    pub fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sensor_read_error(&self) {
        self.sensor_read_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_loop_error(&self) {
        self.loop_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: &CycleOutcome) {
        let counter = match outcome {
            CycleOutcome::Success(_) => &self.cycles_succeeded,
            CycleOutcome::CaptureFailed => &self.capture_failures,
            CycleOutcome::UploadFailed => &self.upload_failures,
            CycleOutcome::NotifyFailed => &self.notify_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Consistent-enough snapshot for reporting; individual loads are relaxed.
    pub fn snapshot(&self) -> CycleMetricsSnapshot {
        CycleMetricsSnapshot {
            polls: self.polls.load(Ordering::Relaxed),
            admissions: self.admissions.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
            sensor_read_errors: self.sensor_read_errors.load(Ordering::Relaxed),
            loop_errors: self.loop_errors.load(Ordering::Relaxed),
            cycles_succeeded: self.cycles_succeeded.load(Ordering::Relaxed),
            capture_failures: self.capture_failures.load(Ordering::Relaxed),
            upload_failures: self.upload_failures.load(Ordering::Relaxed),
            notify_failures: self.notify_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`CycleMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleMetricsSnapshot {
    pub polls: u64,
    pub admissions: u64,
    pub rejections: u64,
    pub sensor_read_errors: u64,
    pub loop_errors: u64,
    pub cycles_succeeded: u64,
    pub capture_failures: u64,
    pub upload_failures: u64,
    pub notify_failures: u64,
}

impl CycleMetricsSnapshot {
    /// Cycles that ran to any terminal outcome.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_succeeded + self.cycles_failed()
    }

    pub fn cycles_failed(&self) -> u64 {
        self.capture_failures + self.upload_failures + self.notify_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::PublicReference;

    #[test]
    fn test_record_outcome_buckets() {
        let metrics = CycleMetrics::new();
        metrics.record_outcome(&CycleOutcome::Success(PublicReference::new(
            "https://cdn.example/x.jpg",
        )));
        metrics.record_outcome(&CycleOutcome::CaptureFailed);
        metrics.record_outcome(&CycleOutcome::UploadFailed);
        metrics.record_outcome(&CycleOutcome::NotifyFailed);
        metrics.record_outcome(&CycleOutcome::NotifyFailed);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.cycles_succeeded, 1);
        assert_eq!(snapshot.capture_failures, 1);
        assert_eq!(snapshot.upload_failures, 1);
        assert_eq!(snapshot.notify_failures, 2);
        assert_eq!(snapshot.cycles_completed(), 5);
        assert_eq!(snapshot.cycles_failed(), 4);
    }

    #[test]
    fn test_loop_counters() {
        let metrics = CycleMetrics::new();
        for _ in 0..10 {
            metrics.record_poll();
        }
        metrics.record_admission();
        metrics.record_rejection();
        metrics.record_sensor_read_error();
        metrics.record_loop_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.polls, 10);
        assert_eq!(snapshot.admissions, 1);
        assert_eq!(snapshot.rejections, 1);
        assert_eq!(snapshot.sensor_read_errors, 1);
        assert_eq!(snapshot.loop_errors, 1);
    }
}
