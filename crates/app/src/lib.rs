//! # solix-app
//!
//! Application layer — the entry lifecycle and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement (driven/outbound ports):
//!   - `DeviceScanner` — the host's BLE discovery service
//!   - `DeviceDriver` — the external Solix driver contract
//!   - `StateStore` — the hub's entity registry and state-update sink
//! - Provide the **setup/connection sequencer**: resolve an address to a
//!   handle, connect, verify telemetry, register the sensor catalog
//! - Provide **sensor entities**: pure projections of one attribute each,
//!   with a notification-forwarder task per sensor
//! - Provide **teardown**: unsubscribe every sensor, unregister, disconnect
//!
//! ## Dependency rule
//! Depends on `solix-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod entry;
pub mod ports;
pub mod sensor;
