//! BLE scanner configuration.

use serde::Deserialize;

/// Configuration for the btleplug-backed scanner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BleConfig {
    /// How long the fallback active scan may run before the device is
    /// reported as not visible, in seconds.
    pub scan_timeout_secs: u16,
}

impl Default for BleConfig {
    fn default() -> Self {
        Self {
            scan_timeout_secs: 10,
        }
    }
}
