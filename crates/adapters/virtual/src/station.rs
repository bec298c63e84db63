//! The simulated station and its scanner/driver port implementations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use solix_app::ports::{DeviceDriver, DeviceScanner};
use solix_domain::telemetry::{AttributeKey, TelemetryValue};

/// Capacity of the notification channel. Forwarders re-read current state,
/// so lagged receivers lose nothing.
const NOTIFY_CAPACITY: usize = 16;

struct Inner {
    name: String,
    address: String,
    values: RwLock<HashMap<AttributeKey, TelemetryValue>>,
    available: AtomicBool,
    connectable: AtomicBool,
    connected: AtomicBool,
    notify: broadcast::Sender<()>,
}

/// A simulated Solix power station.
///
/// The station is the "physical" side of the simulation: feed it telemetry
/// with [`set`](Self::set), fire a change notification with
/// [`notify`](Self::notify), and inject failures with
/// [`set_connectable`](Self::set_connectable) /
/// [`set_available`](Self::set_available).
pub struct VirtualStation {
    inner: Arc<Inner>,
}

impl VirtualStation {
    /// Create a station with no telemetry yet (not available until the
    /// first [`set`](Self::set)).
    #[must_use]
    pub fn new(name: &str, address: &str) -> Self {
        let (notify, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                name: name.to_string(),
                address: address.to_uppercase(),
                values: RwLock::new(HashMap::new()),
                available: AtomicBool::new(false),
                connectable: AtomicBool::new(true),
                connected: AtomicBool::new(false),
                notify,
            }),
        }
    }

    /// The station's Bluetooth address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.inner.address
    }

    /// A transport handle for this station, as a scanner would resolve it.
    #[must_use]
    pub fn handle(&self) -> VirtualHandle {
        VirtualHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    /// A scanner that sees exactly this station.
    #[must_use]
    pub fn scanner(&self) -> VirtualScanner {
        VirtualScanner {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Set one telemetry attribute. The first set marks the station
    /// available (telemetry is flowing). Does not notify — batch several
    /// sets into one frame, then call [`notify`](Self::notify).
    pub fn set(&self, key: AttributeKey, value: TelemetryValue) {
        self.inner
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key, value);
        self.inner.available.store(true, Ordering::SeqCst);
    }

    /// Drop one telemetry attribute, as if a frame stopped carrying it.
    pub fn clear(&self, key: AttributeKey) {
        self.inner
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&key);
    }

    /// Fire one change notification, as the driver does after decoding a
    /// telemetry frame.
    pub fn notify(&self) {
        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.inner.notify.send(());
    }

    /// Failure injection: whether `connect()` succeeds.
    pub fn set_connectable(&self, connectable: bool) {
        self.inner.connectable.store(connectable, Ordering::SeqCst);
    }

    /// Failure injection: force the availability flag.
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    /// Whether a driver is currently connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }
}

/// Transport handle to a [`VirtualStation`].
pub struct VirtualHandle {
    inner: Arc<Inner>,
}

/// Driver-port implementation backed by a [`VirtualStation`].
pub struct VirtualDevice {
    inner: Arc<Inner>,
}

impl DeviceDriver for VirtualDevice {
    type Handle = VirtualHandle;

    fn from_handle(handle: VirtualHandle) -> Self {
        Self {
            inner: handle.inner,
        }
    }

    fn address(&self) -> String {
        self.inner.address.clone()
    }

    fn name(&self) -> String {
        self.inner.name.clone()
    }

    fn is_available(&self) -> bool {
        self.inner.available.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> bool {
        if self.inner.connectable.load(Ordering::SeqCst) {
            self.inner.connected.store(true, Ordering::SeqCst);
            tracing::debug!(address = %self.inner.address, "virtual station connected");
            true
        } else {
            tracing::debug!(address = %self.inner.address, "virtual station refused connection");
            false
        }
    }

    async fn disconnect(&self) {
        self.inner.connected.store(false, Ordering::SeqCst);
        tracing::debug!(address = %self.inner.address, "virtual station disconnected");
    }

    fn telemetry(&self, key: AttributeKey) -> Option<TelemetryValue> {
        self.inner
            .values
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&key)
            .copied()
    }

    fn notifications(&self) -> broadcast::Receiver<()> {
        self.inner.notify.subscribe()
    }
}

/// Scanner-port implementation that sees exactly one station.
pub struct VirtualScanner {
    inner: Arc<Inner>,
}

impl DeviceScanner for VirtualScanner {
    type Handle = VirtualHandle;

    async fn device_from_address(
        &self,
        address: &str,
        _connectable: bool,
    ) -> Option<VirtualHandle> {
        if address.eq_ignore_ascii_case(&self.inner.address) {
            Some(VirtualHandle {
                inner: Arc::clone(&self.inner),
            })
        } else {
            None
        }
    }

    async fn scanner_count(&self, _connectable: bool) -> usize {
        1
    }
}
