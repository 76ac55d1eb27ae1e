//! SysfsGpio - digital inputs through the sysfs GPIO interface
//!
//! Pins are exported and configured as inputs once at startup; each poll is a
//! plain file read of `gpioN/value`. The sensors pull the line up, so an idle
//! input reads "1" and an active one reads "0".

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use contracts::{MonitorError, PinId, PinLevel, SensorInputPort};
use tracing::{debug, warn};

const SYSFS_GPIO_BASE: &str = "/sys/class/gpio";

/// Sensor input port backed by `/sys/class/gpio`.
#[derive(Debug)]
pub struct SysfsGpio {
    base: PathBuf,
    exported: Vec<PinId>,
}

impl SysfsGpio {
    /// Export the given pins and configure them as inputs.
    ///
    /// # Errors
    /// Returns `MonitorError::Setup` when a pin cannot be exported or set to
    /// input direction. Callers retry setup with backoff.
    pub fn export(pins: &[PinId]) -> Result<Self, MonitorError> {
        Self::export_at(SYSFS_GPIO_BASE, pins)
    }

    /// Same as [`export`](Self::export) against an alternate sysfs root.
    pub fn export_at(base: impl Into<PathBuf>, pins: &[PinId]) -> Result<Self, MonitorError> {
        let base = base.into();
        let mut gpio = Self {
            base,
            exported: Vec::with_capacity(pins.len()),
        };

        for &pin in pins {
            gpio.export_pin(pin)?;
            gpio.exported.push(pin);
        }
        Ok(gpio)
    }

    fn export_pin(&self, pin: PinId) -> Result<(), MonitorError> {
        let pin_dir = self.pin_dir(pin);

        if !pin_dir.exists() {
            // The kernel materializes gpioN/ in response to this write.
            write_sysfs(&self.base.join("export"), &pin.number().to_string()).map_err(|e| {
                MonitorError::setup(format!("failed to export gpio {pin}: {e}"))
            })?;
        }
        if !pin_dir.exists() {
            return Err(MonitorError::setup(format!(
                "gpio {pin} did not appear under {}",
                self.base.display()
            )));
        }

        write_sysfs(&pin_dir.join("direction"), "in").map_err(|e| {
            MonitorError::setup(format!("failed to set gpio {pin} direction: {e}"))
        })?;

        debug!(pin = %pin, "gpio exported as input");
        Ok(())
    }

    /// Unexport all pins this port exported. Failures are logged, not
    /// propagated; called on shutdown.
    pub fn release(&self) {
        for &pin in &self.exported {
            if let Err(e) = write_sysfs(&self.base.join("unexport"), &pin.number().to_string()) {
                warn!(pin = %pin, error = %e, "failed to unexport gpio");
            }
        }
    }

    fn pin_dir(&self, pin: PinId) -> PathBuf {
        self.base.join(format!("gpio{}", pin.number()))
    }
}

fn write_sysfs(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new().write(true).create(true).open(path)?;
    file.write_all(value.as_bytes())
}

impl SensorInputPort for SysfsGpio {
    fn read(&self, pin: PinId) -> Result<PinLevel, MonitorError> {
        let path = self.pin_dir(pin).join("value");
        let raw = fs::read_to_string(&path)
            .map_err(|e| MonitorError::sensor_read(pin, e.to_string()))?;

        match raw.trim() {
            "0" => Ok(PinLevel::Low),
            "1" => Ok(PinLevel::High),
            other => Err(MonitorError::sensor_read(
                pin,
                format!("unexpected value {other:?}"),
            )),
        }
    }
}
