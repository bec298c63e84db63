//! Device-scanner port — the host's BLE discovery service.

use std::future::Future;

/// Resolves device addresses to connectable transport handles.
///
/// BLE visibility is inherently transient: a `None` from
/// [`device_from_address`](Self::device_from_address) means "not currently
/// visible", never "gone for good". [`scanner_count`](Self::scanner_count)
/// distinguishes the infrastructure problem (no scanners at all) from the
/// transient one.
pub trait DeviceScanner: Send + Sync {
    /// Transport handle a resolved device is reached through.
    type Handle: Send + 'static;

    /// Resolve an address to a handle, or `None` if no scanner currently
    /// sees the device.
    fn device_from_address(
        &self,
        address: &str,
        connectable: bool,
    ) -> impl Future<Output = Option<Self::Handle>> + Send;

    /// Number of scanners able to search for devices.
    fn scanner_count(&self, connectable: bool) -> impl Future<Output = usize> + Send;
}
