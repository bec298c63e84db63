//! Common error types used across the workspace.

/// Why an entry could not be set up.
///
/// Every variant describes a transient condition — BLE visibility comes and
/// goes — so the host is expected to retry setup later rather than give up.
/// The variants exist for observability (message text), not control flow.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// No Bluetooth scanner is present on the host at all.
    #[error("no Bluetooth scanners are available to search for the device")]
    NoScanners,

    /// Scanners exist but none of them currently sees the device.
    #[error("the device was not found")]
    DeviceNotFound,

    /// The device was resolved but the connection attempt failed.
    #[error("device found but unable to connect")]
    ConnectFailed,

    /// Connected, but the device has not started producing telemetry.
    #[error("device connected but unable to subscribe to telemetry")]
    TelemetryNotFlowing,
}

impl SetupError {
    /// Whether the host should retry setup later.
    ///
    /// Always `true` at this layer: retry policy belongs to the host's
    /// entry-retry mechanism, not to the bridge.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        true
    }
}

/// Errors surfaced by the hub's state store.
///
/// The bridge never branches on these — steady-state store failures are
/// logged and forwarding continues.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The state store rejected a registration, update, or removal.
    #[error("state store error")]
    StateStore(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_mention_scanners_when_none_are_available() {
        assert!(SetupError::NoScanners.to_string().contains("scanners"));
    }

    #[test]
    fn should_mention_not_found_when_device_is_invisible() {
        assert!(SetupError::DeviceNotFound.to_string().contains("not found"));
    }

    #[test]
    fn should_mention_connect_when_connection_fails() {
        assert!(SetupError::ConnectFailed.to_string().contains("connect"));
    }

    #[test]
    fn should_mention_telemetry_when_device_is_not_ready() {
        assert!(
            SetupError::TelemetryNotFlowing
                .to_string()
                .contains("telemetry")
        );
    }

    #[test]
    fn should_treat_every_setup_failure_as_retryable() {
        assert!(SetupError::NoScanners.is_retryable());
        assert!(SetupError::DeviceNotFound.is_retryable());
        assert!(SetupError::ConnectFailed.is_retryable());
        assert!(SetupError::TelemetryNotFlowing.is_retryable());
    }

    #[test]
    fn should_display_state_store_error() {
        let err = HubError::StateStore("boom".into());
        assert_eq!(err.to_string(), "state store error");
    }
}
