//! Layered error definitions
//!
//! Categorized by source: sensor / provider / config / setup

use thiserror::Error;

use crate::PinId;

/// Unified error type
#[derive(Debug, Error)]
pub enum MonitorError {
    // ===== Sensor Errors =====
    /// Transient hardware-level read failure; the poll that saw it is skipped
    #[error("sensor read error on pin {pin}: {message}")]
    SensorRead { pin: PinId, message: String },

    // ===== Provider Errors =====
    /// Image acquisition failure
    #[error("capture error: {message}")]
    Capture { message: String },

    /// Remote storage upload failure
    #[error("upload error: {message}")]
    Upload { message: String },

    /// Notification delivery failure
    #[error("notify error: {message}")]
    Notify { message: String },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Lifecycle Errors =====
    /// Hardware or credential initialization failure; setup is retried with backoff
    #[error("setup error: {message}")]
    Setup { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl MonitorError {
    /// Create a sensor read error
    pub fn sensor_read(pin: PinId, message: impl Into<String>) -> Self {
        Self::SensorRead {
            pin,
            message: message.into(),
        }
    }

    /// Create a capture error
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }

    /// Create an upload error
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    /// Create a notify error
    pub fn notify(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
        }
    }

    /// Create a configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a setup error
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
        }
    }

    /// True for transient sensor read failures, which skip a single poll
    /// instead of triggering the monitor loop's backoff path.
    pub fn is_transient_read(&self) -> bool {
        matches!(self, Self::SensorRead { .. })
    }
}
