//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    pins: String,
    cooldown_secs: f64,
    resolution: String,
    bucket: String,
    recipient: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    pins: format!("{}, {}", blueprint.pins.input_a, blueprint.pins.input_b),
                    cooldown_secs: blueprint.trigger.cooldown_secs,
                    resolution: format!("{}x{}", blueprint.camera.width, blueprint.camera.height),
                    bucket: blueprint.storage.bucket.clone(),
                    recipient: blueprint.notify.to.clone(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::MonitorBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    // Check credentials without failing; the run command degrades gracefully
    if std::env::var(&blueprint.storage.token_env).is_err() {
        warnings.push(format!(
            "{} is not set - uploads will be unauthenticated",
            blueprint.storage.token_env
        ));
    }
    if std::env::var(&blueprint.notify.auth_token_env).is_err() {
        warnings.push(format!(
            "{} is not set - notifications will be rejected",
            blueprint.notify.auth_token_env
        ));
    }

    // Timing sanity
    if blueprint.trigger.cooldown_secs < 0.1 {
        warnings.push(format!(
            "cooldown of {}s is very short - expect rapid-fire cycles",
            blueprint.trigger.cooldown_secs
        ));
    }
    if blueprint.trigger.poll_interval_ms > 100 {
        warnings.push(format!(
            "poll interval of {}ms may miss short trigger pulses",
            blueprint.trigger.poll_interval_ms
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Pins: {}", summary.pins);
            println!("  Cooldown: {}s", summary.cooldown_secs);
            println!("  Resolution: {}", summary.resolution);
            println!("  Bucket: {}", summary.bucket);
            println!("  Recipient: {}", summary.recipient);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
