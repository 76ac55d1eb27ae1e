//! CycleDispatcher - runs capture -> upload -> notify as one background task

use std::sync::Arc;
use std::time::Instant;

use contracts::{CaptureProvider, CycleOutcome, NotifyProvider, StorageProvider};
use tokio::task::JoinHandle;
use tracing::{error, info};
use trigger_engine::TriggerWindow;

use crate::metrics::CycleMetrics;

/// Spawns dispatch cycles over a fixed set of providers.
///
/// One dispatcher exists per monitor loop; providers are shared, never
/// rebuilt per cycle. Admission control lives in the gate, not here: callers
/// must only spawn after the trigger window admitted them.
pub struct CycleDispatcher<C, S, N> {
    capture: Arc<C>,
    storage: Arc<S>,
    notify: Arc<N>,
    window: Arc<TriggerWindow>,
    metrics: Arc<CycleMetrics>,
}

impl<C, S, N> CycleDispatcher<C, S, N>
where
    C: CaptureProvider + Send + Sync + 'static,
    S: StorageProvider + Send + Sync + 'static,
    N: NotifyProvider + Send + Sync + 'static,
{
    pub fn new(
        capture: Arc<C>,
        storage: Arc<S>,
        notify: Arc<N>,
        window: Arc<TriggerWindow>,
        metrics: Arc<CycleMetrics>,
    ) -> Self {
        Self {
            capture,
            storage,
            notify,
            window,
            metrics,
        }
    }

    /// Start one dispatch cycle in the background.
    ///
    /// The returned handle is detachable; the poll loop never awaits it. The
    /// trigger window is released on every exit path, including a panic in a
    /// provider, via a drop guard inside the task.
    pub fn spawn_cycle(&self) -> JoinHandle<CycleOutcome> {
        let capture = Arc::clone(&self.capture);
        let storage = Arc::clone(&self.storage);
        let notify = Arc::clone(&self.notify);
        let window = Arc::clone(&self.window);
        let metrics = Arc::clone(&self.metrics);

        tokio::spawn(async move {
            let _guard = InFlightGuard { window };
            let started = Instant::now();

            let outcome = run_cycle(&*capture, &*storage, &*notify).await;

            metrics.record_outcome(&outcome);
            observability::record_cycle_outcome(outcome.label(), started.elapsed());
            info!(
                outcome = outcome.label(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "dispatch cycle finished"
            );
            outcome
        })
    }
}

/// Releases the trigger window when the cycle task ends, however it ends.
struct InFlightGuard {
    window: Arc<TriggerWindow>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.window.release();
    }
}

/// One capture -> upload -> notify sequence.
///
/// Each failing step short-circuits the rest; the error is logged here and
/// folded into the outcome, never propagated to the poll loop.
async fn run_cycle<C, S, N>(capture: &C, storage: &S, notify: &N) -> CycleOutcome
where
    C: CaptureProvider,
    S: StorageProvider,
    N: NotifyProvider,
{
    // Trigger time, not completion time, goes into the notification.
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let artifact = match capture.capture().await {
        Ok(artifact) => artifact,
        Err(err) => {
            error!(error = %err, "image capture failed");
            return CycleOutcome::CaptureFailed;
        }
    };
    info!(path = %artifact, "image captured");

    let reference = match storage.upload(&artifact).await {
        Ok(reference) => reference,
        Err(err) => {
            error!(error = %err, path = %artifact, "upload failed");
            return CycleOutcome::UploadFailed;
        }
    };
    info!(url = %reference, "image uploaded");

    if let Err(err) = notify.notify(&reference, &timestamp).await {
        error!(error = %err, url = %reference, "notification failed");
        return CycleOutcome::NotifyFailed;
    }
    info!(url = %reference, "notification sent");

    CycleOutcome::Success(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{CaptureArtifact, MonitorError, PublicReference};
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockCapture {
        fail: AtomicBool,
        calls: AtomicU64,
    }

    impl CaptureProvider for MockCapture {
        async fn capture(&self) -> Result<CaptureArtifact, MonitorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(MonitorError::capture("mock capture failure"));
            }
            Ok(CaptureArtifact::new("/tmp/snapshot_20260101_120000.jpg"))
        }
    }

    #[derive(Default)]
    struct MockStorage {
        fail: AtomicBool,
        calls: AtomicU64,
    }

    impl StorageProvider for MockStorage {
        async fn upload(
            &self,
            artifact: &CaptureArtifact,
        ) -> Result<PublicReference, MonitorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(MonitorError::upload("mock upload failure"));
            }
            let name = artifact.file_name().unwrap_or("unknown.jpg");
            Ok(PublicReference::new(format!("https://cdn.example/{name}")))
        }
    }

    #[derive(Default)]
    struct MockNotify {
        fail: AtomicBool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl NotifyProvider for MockNotify {
        async fn notify(
            &self,
            reference: &PublicReference,
            timestamp: &str,
        ) -> Result<(), MonitorError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(MonitorError::notify("mock notify failure"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((reference.to_string(), timestamp.to_string()));
            Ok(())
        }
    }

    fn dispatcher(
        capture: Arc<MockCapture>,
        storage: Arc<MockStorage>,
        notify: Arc<MockNotify>,
    ) -> (
        CycleDispatcher<MockCapture, MockStorage, MockNotify>,
        Arc<TriggerWindow>,
    ) {
        let window = Arc::new(TriggerWindow::new());
        let dispatcher = CycleDispatcher::new(
            capture,
            storage,
            notify,
            Arc::clone(&window),
            Arc::new(CycleMetrics::new()),
        );
        (dispatcher, window)
    }

    #[tokio::test]
    async fn test_successful_cycle_releases_window() {
        let capture = Arc::new(MockCapture::default());
        let storage = Arc::new(MockStorage::default());
        let notify = Arc::new(MockNotify::default());
        let (dispatcher, window) =
            dispatcher(Arc::clone(&capture), Arc::clone(&storage), Arc::clone(&notify));

        assert!(window.try_admit(Instant::now(), std::time::Duration::ZERO));
        let outcome = dispatcher.spawn_cycle().await.unwrap();

        assert!(outcome.is_success());
        assert!(!window.is_in_flight());
        let sent = notify.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "https://cdn.example/snapshot_20260101_120000.jpg");
    }

    #[tokio::test]
    async fn test_capture_failure_short_circuits() {
        let capture = Arc::new(MockCapture::default());
        capture.fail.store(true, Ordering::SeqCst);
        let storage = Arc::new(MockStorage::default());
        let notify = Arc::new(MockNotify::default());
        let (dispatcher, window) =
            dispatcher(Arc::clone(&capture), Arc::clone(&storage), Arc::clone(&notify));

        assert!(window.try_admit(Instant::now(), std::time::Duration::ZERO));
        let outcome = dispatcher.spawn_cycle().await.unwrap();

        assert_eq!(outcome, CycleOutcome::CaptureFailed);
        assert_eq!(storage.calls.load(Ordering::SeqCst), 0);
        assert!(notify.sent.lock().unwrap().is_empty());
        assert!(!window.is_in_flight());
    }

    #[tokio::test]
    async fn test_upload_failure_skips_notify() {
        let capture = Arc::new(MockCapture::default());
        let storage = Arc::new(MockStorage::default());
        storage.fail.store(true, Ordering::SeqCst);
        let notify = Arc::new(MockNotify::default());
        let (dispatcher, window) =
            dispatcher(Arc::clone(&capture), Arc::clone(&storage), Arc::clone(&notify));

        assert!(window.try_admit(Instant::now(), std::time::Duration::ZERO));
        let outcome = dispatcher.spawn_cycle().await.unwrap();

        assert_eq!(outcome, CycleOutcome::UploadFailed);
        assert_eq!(capture.calls.load(Ordering::SeqCst), 1);
        assert!(notify.sent.lock().unwrap().is_empty());
        assert!(!window.is_in_flight());
    }

    #[tokio::test]
    async fn test_notify_failure_still_releases() {
        let capture = Arc::new(MockCapture::default());
        let storage = Arc::new(MockStorage::default());
        let notify = Arc::new(MockNotify::default());
        notify.fail.store(true, Ordering::SeqCst);
        let (dispatcher, window) =
            dispatcher(Arc::clone(&capture), Arc::clone(&storage), Arc::clone(&notify));

        assert!(window.try_admit(Instant::now(), std::time::Duration::ZERO));
        let outcome = dispatcher.spawn_cycle().await.unwrap();

        assert_eq!(outcome, CycleOutcome::NotifyFailed);
        assert!(!window.is_in_flight());
    }
}
