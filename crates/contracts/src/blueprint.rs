//! MonitorBlueprint - Config Loader output
//!
//! Describes the complete monitor configuration: watched pins, trigger
//! timing, camera parameters, storage bucket, and notification routing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::PinId;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete monitor configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Watched digital inputs
    pub pins: PinsConfig,

    /// Trigger timing: cooldown, poll cadence, error backoff
    #[serde(default)]
    pub trigger: TriggerConfig,

    /// Camera parameters and snapshot directory
    pub camera: CameraConfig,

    /// Remote storage destination
    pub storage: StorageConfig,

    /// Notification routing
    pub notify: NotifyConfig,
}

/// The two monitored inputs (BCM pin numbers)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinsConfig {
    /// First input (e.g. traffic light sense)
    pub input_a: u8,

    /// Second input (e.g. vehicle presence sensor)
    pub input_b: u8,
}

impl PinsConfig {
    /// Pin identifier of input A.
    pub fn pin_a(&self) -> PinId {
        PinId::new(self.input_a)
    }

    /// Pin identifier of input B.
    pub fn pin_b(&self) -> PinId {
        PinId::new(self.input_b)
    }
}

/// Trigger timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Minimum elapsed time between two admitted triggers (seconds)
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f64,

    /// Delay between polls (milliseconds); keeps the loop from saturating a core
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Pause before resuming after an unexpected loop error (seconds)
    #[serde(default = "default_backoff_secs")]
    pub error_backoff_secs: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            error_backoff_secs: default_backoff_secs(),
        }
    }
}

impl TriggerConfig {
    /// Cooldown as a `Duration`.
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_secs)
    }

    /// Poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Error backoff as a `Duration`.
    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }
}

fn default_cooldown_secs() -> f64 {
    1.0
}

fn default_poll_interval_ms() -> u64 {
    1
}

fn default_backoff_secs() -> u64 {
    5
}

/// Camera parameters passed to the capture provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Exposure time in microseconds
    #[serde(default = "default_shutter_us")]
    pub shutter_us: u32,

    /// Analogue gain
    #[serde(default = "default_gain")]
    pub gain: f64,

    /// White-balance red gain
    #[serde(default = "default_awb_gain")]
    pub awb_red: f64,

    /// White-balance blue gain
    #[serde(default = "default_awb_gain")]
    pub awb_blue: f64,

    /// Directory snapshots are written to
    pub image_dir: String,
}

fn default_width() -> u32 {
    1296
}

fn default_height() -> u32 {
    972
}

fn default_shutter_us() -> u32 {
    10_000
}

fn default_gain() -> f64 {
    5.0
}

fn default_awb_gain() -> f64 {
    1.5
}

/// Remote storage destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name uploads go to
    pub bucket: String,

    /// Public base URL the uploaded object is reachable under
    pub base_url: String,

    /// Environment variable holding the access token
    #[serde(default = "default_storage_token_env")]
    pub token_env: String,
}

fn default_storage_token_env() -> String {
    "STORAGE_ACCESS_TOKEN".to_string()
}

/// Notification routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Messaging account identifier
    pub account_sid: String,

    /// Sender address (e.g. "whatsapp:+1415...")
    pub from: String,

    /// The single preconfigured recipient
    pub to: String,

    /// Fixed message template; the timestamp is appended at send time
    #[serde(default = "default_template")]
    pub template: String,

    /// Environment variable holding the messaging auth token
    #[serde(default = "default_notify_token_env")]
    pub auth_token_env: String,
}

fn default_template() -> String {
    "Alert! Someone passed a red light! @ ".to_string()
}

fn default_notify_token_env() -> String {
    "TWILIO_AUTH_TOKEN".to_string()
}
