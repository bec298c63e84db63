//! # solix-adapter-ble
//!
//! BLE implementation of the device-scanner port, backed by btleplug.
//!
//! ## How it works
//!
//! Resolution first checks the peripherals every Bluetooth adapter already
//! knows about, then falls back to one bounded active scan. Scanner count
//! is the number of Bluetooth adapters on the host. Errors never cross the
//! port boundary: they are logged and degrade to "not visible" / "no
//! scanners", which the entry sequencer reports as the matching not-ready
//! condition.
//!
//! ## Dependency rule
//!
//! Depends on `solix-app` (port traits) only.

mod config;
mod error;
mod scanner;

pub use config::BleConfig;
pub use error::BleError;
pub use scanner::HostScanner;
