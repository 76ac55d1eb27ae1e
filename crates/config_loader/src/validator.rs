//! Configuration validation
//!
//! Rules:
//! - the two pins are distinct
//! - cooldown > 0, poll interval > 0
//! - camera resolution non-zero, gain > 0
//! - image_dir non-empty
//! - storage bucket and base_url non-empty
//! - notification routing fields non-empty

use contracts::{MonitorBlueprint, MonitorError};

/// Validate a MonitorBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &MonitorBlueprint) -> Result<(), MonitorError> {
    validate_pins(blueprint)?;
    validate_trigger(blueprint)?;
    validate_camera(blueprint)?;
    validate_storage(blueprint)?;
    validate_notify(blueprint)?;
    Ok(())
}

/// Validate pin assignment
fn validate_pins(blueprint: &MonitorBlueprint) -> Result<(), MonitorError> {
    if blueprint.pins.input_a == blueprint.pins.input_b {
        return Err(MonitorError::config_validation(
            "pins",
            format!(
                "input_a and input_b must be distinct, both are {}",
                blueprint.pins.input_a
            ),
        ));
    }
    Ok(())
}

/// Validate trigger timing
fn validate_trigger(blueprint: &MonitorBlueprint) -> Result<(), MonitorError> {
    let trigger = &blueprint.trigger;

    if !(trigger.cooldown_secs > 0.0) || !trigger.cooldown_secs.is_finite() {
        return Err(MonitorError::config_validation(
            "trigger.cooldown_secs",
            format!("cooldown must be > 0, got {}", trigger.cooldown_secs),
        ));
    }

    if trigger.poll_interval_ms == 0 {
        return Err(MonitorError::config_validation(
            "trigger.poll_interval_ms",
            "poll interval must be > 0",
        ));
    }

    Ok(())
}

/// Validate camera parameters
fn validate_camera(blueprint: &MonitorBlueprint) -> Result<(), MonitorError> {
    let camera = &blueprint.camera;

    if camera.width == 0 || camera.height == 0 {
        return Err(MonitorError::config_validation(
            "camera.width / camera.height",
            format!(
                "resolution must be non-zero, got {}x{}",
                camera.width, camera.height
            ),
        ));
    }

    if !(camera.gain > 0.0) {
        return Err(MonitorError::config_validation(
            "camera.gain",
            format!("gain must be > 0, got {}", camera.gain),
        ));
    }

    if camera.image_dir.is_empty() {
        return Err(MonitorError::config_validation(
            "camera.image_dir",
            "image directory cannot be empty",
        ));
    }

    Ok(())
}

/// Validate storage destination
fn validate_storage(blueprint: &MonitorBlueprint) -> Result<(), MonitorError> {
    let storage = &blueprint.storage;

    if storage.bucket.is_empty() {
        return Err(MonitorError::config_validation(
            "storage.bucket",
            "bucket cannot be empty",
        ));
    }

    if storage.base_url.is_empty() {
        return Err(MonitorError::config_validation(
            "storage.base_url",
            "base URL cannot be empty",
        ));
    }

    Ok(())
}

/// Validate notification routing
fn validate_notify(blueprint: &MonitorBlueprint) -> Result<(), MonitorError> {
    let notify = &blueprint.notify;

    for (field, value) in [
        ("notify.account_sid", &notify.account_sid),
        ("notify.from", &notify.from),
        ("notify.to", &notify.to),
        ("notify.template", &notify.template),
    ] {
        if value.is_empty() {
            return Err(MonitorError::config_validation(
                field,
                "field cannot be empty",
            ));
        }
    }

    Ok(())
}
