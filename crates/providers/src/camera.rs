//! LibcameraCapture - stills through the `libcamera-still` CLI
//!
//! Exposure is fixed (shutter, gain, white balance) so consecutive snapshots
//! are comparable; `--immediate` skips the preview/AE settle phase, keeping
//! capture latency low after a trigger.

use std::path::PathBuf;
use std::process::Stdio;

use contracts::{CameraConfig, CaptureArtifact, CaptureProvider, MonitorError};
use tokio::process::Command;
use tracing::debug;

const DEFAULT_COMMAND: &str = "libcamera-still";

/// Capture provider shelling out to `libcamera-still`.
pub struct LibcameraCapture {
    command: String,
    image_dir: PathBuf,
    width: u32,
    height: u32,
    shutter_us: u32,
    gain: f64,
    awb_red: f64,
    awb_blue: f64,
}

impl LibcameraCapture {
    /// Build the provider and ensure the snapshot directory exists.
    ///
    /// # Errors
    /// Returns `MonitorError::Setup` when the snapshot directory cannot be
    /// created.
    pub fn new(config: &CameraConfig) -> Result<Self, MonitorError> {
        let image_dir = PathBuf::from(&config.image_dir);
        std::fs::create_dir_all(&image_dir).map_err(|e| {
            MonitorError::setup(format!(
                "cannot create snapshot directory {}: {e}",
                image_dir.display()
            ))
        })?;

        Ok(Self {
            command: DEFAULT_COMMAND.to_string(),
            image_dir,
            width: config.width,
            height: config.height,
            shutter_us: config.shutter_us,
            gain: config.gain,
            awb_red: config.awb_red,
            awb_blue: config.awb_blue,
        })
    }

    /// Override the capture binary (e.g. `rpicam-still` on newer OS images).
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    fn snapshot_path(&self) -> PathBuf {
        let name = chrono::Local::now()
            .format("snapshot_%Y%m%d_%H%M%S.jpg")
            .to_string();
        self.image_dir.join(name)
    }
}

impl CaptureProvider for LibcameraCapture {
    async fn capture(&self) -> Result<CaptureArtifact, MonitorError> {
        let path = self.snapshot_path();
        debug!(path = %path.display(), "invoking capture command");

        let output = Command::new(&self.command)
            .arg("-o")
            .arg(&path)
            .args(["--width", &self.width.to_string()])
            .args(["--height", &self.height.to_string()])
            .arg("--nopreview")
            .arg("--immediate")
            .args(["--shutter", &self.shutter_us.to_string()])
            .args(["--gain", &self.gain.to_string()])
            .args(["--awbgains", &format!("{},{}", self.awb_red, self.awb_blue)])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| MonitorError::capture(format!("failed to run {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MonitorError::capture(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(CaptureArtifact::new(path))
    }
}
