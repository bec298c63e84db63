//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `solix-bridge.toml` in the working directory. Every field has
//! a sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use solix_adapter_ble::BleConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The station this bridge entry is for.
    pub device: DeviceConfig,
    /// BLE scanner settings.
    pub ble: BleConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// The configured station.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Bluetooth address — the entry's unique identifier.
    pub address: String,
    /// Display name used by the demo station.
    pub name: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `solix-bridge.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("solix-bridge.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    // Takes the lookup as a closure so tests don't mutate process-global
    // environment state.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SOLIX_ADDRESS") {
            self.device.address = val;
        }
        if let Some(val) = var("SOLIX_DEVICE_NAME") {
            self.device.name = val;
        }
        if let Some(val) = var("SOLIX_SCAN_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.ble.scan_timeout_secs = secs;
            }
        }
        // SOLIX_LOG first, RUST_LOG last so it wins when both are set.
        if let Some(val) = var("SOLIX_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "device address must not be empty".to_string(),
            ));
        }
        if self.ble.scan_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "scan timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            address: "AA:BB:CC:DD:EE:FF".to_string(),
            name: "Solix C1000".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "solix_bridge=info,solix=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
