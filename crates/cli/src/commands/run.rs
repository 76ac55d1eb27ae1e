//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{MonitorStats, Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_monitor(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    // Load and parse configuration
    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(cooldown) = args.cooldown {
        info!(cooldown_secs = cooldown, "Overriding trigger cooldown from CLI");
        blueprint.trigger.cooldown_secs = cooldown;
    }

    info!(
        input_a = blueprint.pins.input_a,
        input_b = blueprint.pins.input_b,
        cooldown_secs = blueprint.trigger.cooldown_secs,
        bucket = %blueprint.storage.bucket,
        to = %blueprint.notify.to,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        blueprint,
        duration: if args.duration == 0 {
            None
        } else {
            Some(Duration::from_secs(args.duration))
        },
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
        max_setup_attempts: None,
    };

    // Prepare hardware and providers (retried with backoff on failure)
    let pipeline = Pipeline::new(pipeline_config);
    let runtime = pipeline.prepare().await?;

    let gpio = runtime.gpio();
    let metrics = runtime.metrics();

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting monitor...");
    let started = Instant::now();

    // Run monitor with shutdown signal
    tokio::select! {
        stats = runtime.run() => {
            info!(
                polls = stats.snapshot.polls,
                admissions = stats.snapshot.admissions,
                cycles_succeeded = stats.snapshot.cycles_succeeded,
                duration_secs = stats.duration.as_secs_f64(),
                "Monitor completed"
            );
            stats.print_summary();
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping monitor...");
            let stats = MonitorStats::new(metrics.snapshot(), started.elapsed());
            stats.print_summary();
        }
    }

    gpio.release();
    info!("tripshot finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::MonitorBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Inputs:");
    println!("  Input A: BCM pin {}", blueprint.pins.input_a);
    println!("  Input B: BCM pin {}", blueprint.pins.input_b);

    println!("\nTrigger:");
    println!("  Cooldown: {}s", blueprint.trigger.cooldown_secs);
    println!("  Poll interval: {}ms", blueprint.trigger.poll_interval_ms);
    println!("  Error backoff: {}s", blueprint.trigger.error_backoff_secs);

    println!("\nCamera:");
    println!(
        "  Resolution: {}x{}",
        blueprint.camera.width, blueprint.camera.height
    );
    println!("  Shutter: {}us", blueprint.camera.shutter_us);
    println!("  Snapshot dir: {}", blueprint.camera.image_dir);

    println!("\nStorage:");
    println!("  Bucket: {}", blueprint.storage.bucket);
    println!("  Base URL: {}", blueprint.storage.base_url);

    println!("\nNotify:");
    println!("  From: {}", blueprint.notify.from);
    println!("  To: {}", blueprint.notify.to);

    println!();
}
