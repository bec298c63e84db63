//! BLE adapter error types.
//!
//! These never cross the scanner-port boundary — the port contract is
//! `handle | none`, so every error degrades to "not visible" after being
//! logged.

/// Errors specific to the BLE adapter.
#[derive(Debug, thiserror::Error)]
pub enum BleError {
    /// The configured address is not a valid Bluetooth address.
    #[error("invalid Bluetooth address")]
    InvalidAddress(#[from] btleplug::api::ParseBDAddrError),

    /// A btleplug adapter or scan operation failed.
    #[error("BLE operation failed")]
    Ble(#[from] btleplug::Error),
}
