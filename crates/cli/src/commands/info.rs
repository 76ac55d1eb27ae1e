//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    pins: PinsInfo,
    trigger: TriggerInfo,
    camera: CameraInfo,
    storage: StorageInfo,
    notify: NotifyInfo,
}

#[derive(Serialize)]
struct PinsInfo {
    input_a: u8,
    input_b: u8,
}

#[derive(Serialize)]
struct TriggerInfo {
    cooldown_secs: f64,
    poll_interval_ms: u64,
    error_backoff_secs: u64,
}

#[derive(Serialize)]
struct CameraInfo {
    resolution: String,
    shutter_us: u32,
    gain: f64,
    awb_gains: String,
    image_dir: String,
}

#[derive(Serialize)]
struct StorageInfo {
    bucket: String,
    base_url: String,
    token_env: String,
}

#[derive(Serialize)]
struct NotifyInfo {
    from: String,
    to: String,
    template: String,
    auth_token_env: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::MonitorBlueprint) -> ConfigInfo {
    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        pins: PinsInfo {
            input_a: blueprint.pins.input_a,
            input_b: blueprint.pins.input_b,
        },
        trigger: TriggerInfo {
            cooldown_secs: blueprint.trigger.cooldown_secs,
            poll_interval_ms: blueprint.trigger.poll_interval_ms,
            error_backoff_secs: blueprint.trigger.error_backoff_secs,
        },
        camera: CameraInfo {
            resolution: format!("{}x{}", blueprint.camera.width, blueprint.camera.height),
            shutter_us: blueprint.camera.shutter_us,
            gain: blueprint.camera.gain,
            awb_gains: format!("{},{}", blueprint.camera.awb_red, blueprint.camera.awb_blue),
            image_dir: blueprint.camera.image_dir.clone(),
        },
        storage: StorageInfo {
            bucket: blueprint.storage.bucket.clone(),
            base_url: blueprint.storage.base_url.clone(),
            token_env: blueprint.storage.token_env.clone(),
        },
        notify: NotifyInfo {
            from: blueprint.notify.from.clone(),
            to: blueprint.notify.to.clone(),
            template: blueprint.notify.template.clone(),
            auth_token_env: blueprint.notify.auth_token_env.clone(),
        },
    }
}

fn print_config_info(blueprint: &contracts::MonitorBlueprint) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  tripshot Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📍 Inputs");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Input A: BCM pin {}", blueprint.pins.input_a);
    println!("   └─ Input B: BCM pin {}", blueprint.pins.input_b);

    println!("\n⏱  Trigger");
    println!("   ├─ Cooldown: {}s", blueprint.trigger.cooldown_secs);
    println!(
        "   ├─ Poll interval: {}ms",
        blueprint.trigger.poll_interval_ms
    );
    println!(
        "   └─ Error backoff: {}s",
        blueprint.trigger.error_backoff_secs
    );

    println!("\n📷 Camera");
    println!(
        "   ├─ Resolution: {}x{}",
        blueprint.camera.width, blueprint.camera.height
    );
    println!("   ├─ Shutter: {}us", blueprint.camera.shutter_us);
    println!("   ├─ Gain: {}", blueprint.camera.gain);
    println!(
        "   ├─ AWB gains: {},{}",
        blueprint.camera.awb_red, blueprint.camera.awb_blue
    );
    println!("   └─ Snapshot dir: {}", blueprint.camera.image_dir);

    println!("\n📤 Storage");
    println!("   ├─ Bucket: {}", blueprint.storage.bucket);
    println!("   ├─ Base URL: {}", blueprint.storage.base_url);
    println!("   └─ Token env: {}", blueprint.storage.token_env);

    println!("\n💬 Notify");
    println!("   ├─ From: {}", blueprint.notify.from);
    println!("   ├─ To: {}", blueprint.notify.to);
    println!("   ├─ Template: {:?}", blueprint.notify.template);
    println!("   └─ Auth env: {}", blueprint.notify.auth_token_env);

    println!();
}
