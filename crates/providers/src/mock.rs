//! In-memory provider stand-ins for integration tests and dry runs

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use contracts::{
    CaptureArtifact, CaptureProvider, MonitorError, NotifyProvider, PinId, PinLevel,
    PublicReference, SensorInputPort, StorageProvider,
};

/// Scriptable input port; unset pins read HIGH (the idle level).
#[derive(Default)]
pub struct MockInputPort {
    levels: Mutex<HashMap<PinId, PinLevel>>,
    fail_reads: AtomicBool,
}

impl MockInputPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&self, pin: PinId, level: PinLevel) {
        lock(&self.levels).insert(pin, level);
    }

    /// Drive every known pin plus the given ones to `level`.
    pub fn set_all(&self, pins: &[PinId], level: PinLevel) {
        let mut levels = lock(&self.levels);
        for &pin in pins {
            levels.insert(pin, level);
        }
        for value in levels.values_mut() {
            *value = level;
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl SensorInputPort for MockInputPort {
    fn read(&self, pin: PinId) -> Result<PinLevel, MonitorError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(MonitorError::sensor_read(pin, "mock read failure"));
        }
        Ok(lock(&self.levels).get(&pin).copied().unwrap_or(PinLevel::High))
    }
}

/// Capture stand-in producing sequentially numbered artifact paths.
#[derive(Default)]
pub struct MockCapture {
    fail: AtomicBool,
    calls: AtomicU64,
}

impl MockCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CaptureProvider for MockCapture {
    async fn capture(&self) -> Result<CaptureArtifact, MonitorError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MonitorError::capture("mock capture failure"));
        }
        Ok(CaptureArtifact::new(format!("/tmp/mock_snapshot_{n}.jpg")))
    }
}

/// Storage stand-in mapping file names onto a fixed base URL.
pub struct MockStorage {
    base_url: String,
    fail: AtomicBool,
    calls: AtomicU64,
}

impl MockStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fail: AtomicBool::new(false),
            calls: AtomicU64::new(0),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new("https://cdn.example")
    }
}

impl StorageProvider for MockStorage {
    async fn upload(&self, artifact: &CaptureArtifact) -> Result<PublicReference, MonitorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MonitorError::upload("mock upload failure"));
        }
        let name = artifact
            .file_name()
            .ok_or_else(|| MonitorError::upload("artifact path has no file name"))?;
        Ok(PublicReference::new(format!(
            "{}/{name}",
            self.base_url.trim_end_matches('/')
        )))
    }
}

/// Notify stand-in recording every (url, timestamp) pair it was asked to send.
#[derive(Default)]
pub struct MockNotify {
    fail: AtomicBool,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockNotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        lock(&self.sent).clone()
    }
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
        lock(&self.sent).push((reference.to_string(), timestamp.to_string()));
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
