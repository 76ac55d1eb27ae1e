//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Hardware initialization error
    #[error("Hardware setup failed: {message}")]
    HardwareSetup { message: String },

    /// Monitor execution error
    #[error("Monitor execution failed: {message}")]
    MonitorExecution { message: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    #[allow(dead_code)]
    pub fn hardware_setup(message: impl Into<String>) -> Self {
        Self::HardwareSetup {
            message: message.into(),
        }
    }

    #[allow(dead_code)]
    pub fn monitor_execution(message: impl Into<String>) -> Self {
        Self::MonitorExecution {
            message: message.into(),
        }
    }
}
