//! btleplug-backed implementation of the device-scanner port.

use std::time::Duration;

use btleplug::api::{BDAddr, Central as _, CentralEvent, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, Peripheral};
use tokio_stream::StreamExt as _;

use solix_app::ports::DeviceScanner;

use crate::config::BleConfig;
use crate::error::BleError;

/// Scanner that resolves station addresses through the host's Bluetooth
/// adapters.
pub struct HostScanner {
    config: BleConfig,
}

impl HostScanner {
    /// Create a scanner with the given configuration.
    #[must_use]
    pub fn new(config: BleConfig) -> Self {
        Self { config }
    }

    /// Resolve an address: known peripherals first, then one bounded active
    /// scan on the first adapter.
    ///
    /// # Errors
    ///
    /// Returns [`BleError`] when the address is malformed or a btleplug
    /// operation fails.
    async fn resolve(&self, address: &str) -> Result<Option<Peripheral>, BleError> {
        let target: BDAddr = address.parse()?;

        let manager = Manager::new().await?;
        let adapters = manager.adapters().await?;

        for central in &adapters {
            if let Some(peripheral) = known_peripheral(central, target).await? {
                tracing::debug!(%target, "device already known to adapter");
                return Ok(Some(peripheral));
            }
        }

        let Some(central) = adapters.first() else {
            return Ok(None);
        };

        self.scan_for(central, target).await
    }

    /// Run one active scan, watching discovery events until the target
    /// address shows up or the timeout elapses.
    async fn scan_for(
        &self,
        central: &Adapter,
        target: BDAddr,
    ) -> Result<Option<Peripheral>, BleError> {
        let mut events = central.events().await?;

        central.start_scan(ScanFilter::default()).await?;
        tracing::debug!(%target, timeout_secs = self.config.scan_timeout_secs, "BLE scan started");

        let deadline =
            tokio::time::Instant::now() + Duration::from_secs(self.config.scan_timeout_secs.into());
        let mut found = None;

        while tokio::time::Instant::now() < deadline {
            let remaining = deadline - tokio::time::Instant::now();
            match tokio::time::timeout(remaining, events.next()).await {
                Ok(Some(
                    CentralEvent::DeviceDiscovered(id) | CentralEvent::DeviceUpdated(id),
                )) => {
                    if let Ok(peripheral) = central.peripheral(&id).await {
                        if peripheral.address() == target {
                            found = Some(peripheral);
                            break;
                        }
                    }
                }
                Ok(Some(_)) => {}
                Ok(None) | Err(_) => break,
            }
        }

        central.stop_scan().await?;
        Ok(found)
    }
}

/// Look for the target among the peripherals an adapter has already seen.
async fn known_peripheral(
    central: &Adapter,
    target: BDAddr,
) -> Result<Option<Peripheral>, BleError> {
    let peripherals = central.peripherals().await?;
    Ok(peripherals
        .into_iter()
        .find(|peripheral| peripheral.address() == target))
}

impl DeviceScanner for HostScanner {
    type Handle = Peripheral;

    async fn device_from_address(&self, address: &str, _connectable: bool) -> Option<Peripheral> {
        match self.resolve(address).await {
            Ok(found) => {
                if found.is_none() {
                    tracing::debug!(%address, "device not currently visible");
                }
                found
            }
            Err(err) => {
                tracing::warn!(%err, %address, "BLE resolution failed");
                None
            }
        }
    }

    async fn scanner_count(&self, _connectable: bool) -> usize {
        let adapters = async {
            let manager = Manager::new().await?;
            manager.adapters().await
        };
        match adapters.await {
            Ok(adapters) => adapters.len(),
            Err(err) => {
                tracing::warn!(%err, "failed to enumerate Bluetooth adapters");
                0
            }
        }
    }
}
