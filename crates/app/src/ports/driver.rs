//! Device-driver port — the external Solix driver contract.
//!
//! The actual BLE communication, GATT subscription, and telemetry decoding
//! live inside the driver. This port only fixes the call/return contract
//! the bridge relies on.

use std::future::Future;

use tokio::sync::broadcast;

use solix_domain::telemetry::{AttributeKey, TelemetryValue};

/// A connected (or connectable) Solix power station.
///
/// One driver instance is exclusively owned by one entry; sensor entities
/// hold non-owning `Arc` references and only ever read from it.
pub trait DeviceDriver: Send + Sync + 'static {
    /// Transport handle the driver is constructed from.
    type Handle: Send + 'static;

    /// Wrap a resolved transport handle. Does not connect.
    fn from_handle(handle: Self::Handle) -> Self;

    /// Bluetooth address (MAC) of the device.
    fn address(&self) -> String;

    /// Device name as advertised over BLE.
    fn name(&self) -> String;

    /// Whether the device has begun producing telemetry.
    fn is_available(&self) -> bool;

    /// Attempt to connect. Returns `false` on failure — connection failures
    /// are transient at this layer, not errors.
    fn connect(&self) -> impl Future<Output = bool> + Send;

    /// Disconnect unconditionally. Implicitly stops further notifications.
    fn disconnect(&self) -> impl Future<Output = ()> + Send;

    /// Read one telemetry attribute. `None` until a frame carrying the
    /// attribute has been decoded.
    fn telemetry(&self, key: AttributeKey) -> Option<TelemetryValue>;

    /// Subscribe to change notifications. The driver fires one notification
    /// per decoded telemetry frame; dropping the receiver unsubscribes.
    fn notifications(&self) -> broadcast::Receiver<()>;
}
