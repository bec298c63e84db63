//! # solix-bridge
//!
//! Composition root that wires the adapters together and runs the bridge.
//!
//! Two modes:
//! - `demo` (default) — runs the full entry lifecycle against a simulated
//!   station: setup, a few telemetry frames, teardown. Useful to see the
//!   sensor fan-out without hardware.
//! - `probe` — uses the real btleplug scanner to report how many Bluetooth
//!   adapters the host has and whether the configured address is currently
//!   visible.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod store;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use solix_adapter_ble::HostScanner;
use solix_adapter_virtual::{VirtualDevice, VirtualStation};
use solix_app::entry::{EntryConfig, SolixEntry};
use solix_app::ports::DeviceScanner as _;
use solix_domain::telemetry::{AttributeKey, TelemetryValue};
use solix_domain::time::now;

use crate::config::Config;
use crate::store::TracingStateStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "demo".to_string());
    match mode.as_str() {
        "demo" => run_demo(&config).await?,
        "probe" => run_probe(&config).await,
        other => {
            eprintln!("unknown mode `{other}` — expected `demo` or `probe`");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Run the full entry lifecycle against a simulated station.
async fn run_demo(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let station = VirtualStation::new(&config.device.name, &config.device.address);
    preload(&station);

    let scanner = station.scanner();
    let entry_config = EntryConfig {
        address: config.device.address.clone(),
    };

    let entry =
        SolixEntry::<VirtualDevice, _>::setup(&scanner, TracingStateStore, &entry_config).await?;
    tracing::info!(
        address = %entry.address(),
        sensors = entry.sensor_count(),
        "bridge running against virtual station"
    );

    for frame in 0_i16..5 {
        tokio::time::sleep(Duration::from_secs(1)).await;

        station.set(
            AttributeKey::BatteryPercentage,
            TelemetryValue::Int(i64::from(76 - frame)),
        );
        station.set(
            AttributeKey::AcPowerOut,
            TelemetryValue::Float(f64::from(180 + 5 * frame)),
        );
        station.set(AttributeKey::Light, TelemetryValue::Status(frame % 4));
        station.notify();
    }

    entry.teardown().await;
    Ok(())
}

/// A plausible first telemetry frame.
fn preload(station: &VirtualStation) {
    let in_two_hours = now() + chrono::Duration::hours(2);

    station.set(AttributeKey::AcTimer, TelemetryValue::Timestamp(in_two_hours));
    station.set(AttributeKey::HoursRemaining, TelemetryValue::Float(12.5));
    station.set(AttributeKey::DaysRemaining, TelemetryValue::Float(0.5));
    station.set(AttributeKey::AcPowerIn, TelemetryValue::Float(0.0));
    station.set(AttributeKey::AcPowerOut, TelemetryValue::Float(180.0));
    station.set(AttributeKey::SolarPowerIn, TelemetryValue::Float(95.0));
    station.set(AttributeKey::PowerIn, TelemetryValue::Float(95.0));
    station.set(AttributeKey::PowerOut, TelemetryValue::Float(180.0));
    station.set(AttributeKey::BatteryPercentage, TelemetryValue::Int(76));
    station.set(AttributeKey::SolarPort, TelemetryValue::Status(2));
    station.set(AttributeKey::UsbPortC1, TelemetryValue::Status(1));
    station.set(AttributeKey::UsbPortC2, TelemetryValue::Status(0));
    station.set(AttributeKey::DcPort, TelemetryValue::Status(0));
    station.set(AttributeKey::Light, TelemetryValue::Status(0));
}

/// Report scanner count and device visibility using the real BLE stack.
async fn run_probe(config: &Config) {
    let scanner = HostScanner::new(config.ble.clone());
    let address = config.device.address.to_uppercase();

    let count = scanner.scanner_count(true).await;
    tracing::info!(count, "count of BLE scanners");

    if count == 0 {
        tracing::warn!("no Bluetooth scanners are available to search for the device");
        return;
    }

    if scanner.device_from_address(&address, true).await.is_some() {
        tracing::info!(%address, "device is currently visible");
    } else {
        tracing::warn!(%address, "device was not found");
    }
}
