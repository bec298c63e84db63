//! Entry lifecycle — the setup/connection sequencer and teardown.
//!
//! Setup is strictly sequential and has no retry policy of its own: every
//! failure is reported as a retryable [`SetupError`] and the host's
//! entry-retry mechanism decides when to try again.

use std::sync::Arc;

use serde::Deserialize;

use solix_domain::error::SetupError;
use solix_domain::sensor::SENSOR_SPECS;

use crate::ports::{DeviceDriver, DeviceScanner, StateStore};
use crate::sensor::{SensorEntity, SensorHandle};

/// Entries only ever resolve connectable transports.
const CONNECTABLE: bool = true;

/// Configuration of one entry. The address is the entry's unique identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryConfig {
    /// Bluetooth address (MAC) of the station.
    pub address: String,
}

/// One configured bridge entry: the exclusively-owned device driver plus
/// its activated sensor entities.
pub struct SolixEntry<D, C> {
    device: Arc<D>,
    sensors: Vec<SensorHandle>,
    store: C,
}

impl<D, C> SolixEntry<D, C>
where
    D: DeviceDriver,
    C: StateStore + Clone + 'static,
{
    /// Set up the entry: resolve the address, connect, verify telemetry is
    /// flowing, then register and activate the full sensor catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] — always retryable — when no scanner is
    /// present, the device is not currently visible, the connection attempt
    /// fails, or the device has not started producing telemetry.
    pub async fn setup<S>(scanner: &S, store: C, config: &EntryConfig) -> Result<Self, SetupError>
    where
        S: DeviceScanner<Handle = D::Handle>,
    {
        let address = config.address.to_uppercase();

        let Some(handle) = scanner.device_from_address(&address, CONNECTABLE).await else {
            let count = scanner.scanner_count(CONNECTABLE).await;
            tracing::debug!(count, "count of BLE scanners");

            if count == 0 {
                return Err(SetupError::NoScanners);
            }
            return Err(SetupError::DeviceNotFound);
        };

        let device = D::from_handle(handle);

        if !device.connect().await {
            return Err(SetupError::ConnectFailed);
        }
        if !device.is_available() {
            return Err(SetupError::TelemetryNotFlowing);
        }

        let device = Arc::new(device);
        let mut sensors = Vec::with_capacity(SENSOR_SPECS.len());

        for spec in SENSOR_SPECS {
            let entity = SensorEntity::new(spec, Arc::clone(&device));
            if let Err(err) = store.register(entity.description()).await {
                tracing::warn!(%err, sensor = spec.name, "failed to register sensor entity");
            }
            sensors.push(entity.activate(store.clone()));
        }

        tracing::info!(
            address = %device.address(),
            sensors = sensors.len(),
            "entry setup complete"
        );

        Ok(Self {
            device,
            sensors,
            store,
        })
    }

    /// Number of activated sensor entities.
    #[must_use]
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Address of the device this entry owns.
    #[must_use]
    pub fn address(&self) -> String {
        self.device.address()
    }

    /// Tear the entry down: deactivate every sensor (guaranteed
    /// unsubscribe), unregister the entities, then disconnect.
    ///
    /// Teardown is unconditional — store failures are logged, never
    /// propagated, and the disconnect always runs.
    pub async fn teardown(self) {
        for sensor in &self.sensors {
            sensor.deactivate();
            if let Err(err) = self.store.unregister(sensor.unique_id()).await {
                tracing::warn!(
                    %err,
                    unique_id = sensor.unique_id(),
                    "failed to unregister sensor entity"
                );
            }
        }

        self.device.disconnect().await;
        tracing::info!(address = %self.device.address(), "entry torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use tokio::sync::broadcast;

    use solix_domain::error::HubError;
    use solix_domain::sensor::{EntityDescription, StateUpdate, StateValue};
    use solix_domain::telemetry::{AttributeKey, TelemetryValue};

    const ADDRESS: &str = "AA:BB:CC:DD:EE:FF";

    /// State shared between the fake handle, the fake device, and the test.
    struct Shared {
        connectable: AtomicBool,
        available: AtomicBool,
        connected: AtomicBool,
        values: Mutex<HashMap<AttributeKey, TelemetryValue>>,
        notify: broadcast::Sender<()>,
    }

    impl Default for Shared {
        fn default() -> Self {
            let (notify, _) = broadcast::channel(16);
            Self {
                connectable: AtomicBool::new(true),
                available: AtomicBool::new(true),
                connected: AtomicBool::new(false),
                values: Mutex::new(HashMap::new()),
                notify,
            }
        }
    }

    struct FakeHandle(Arc<Shared>);

    struct FakeDevice(Arc<Shared>);

    impl DeviceDriver for FakeDevice {
        type Handle = FakeHandle;

        fn from_handle(handle: FakeHandle) -> Self {
            Self(handle.0)
        }

        fn address(&self) -> String {
            ADDRESS.to_string()
        }

        fn name(&self) -> String {
            "Solix C1000".to_string()
        }

        fn is_available(&self) -> bool {
            self.0.available.load(Ordering::SeqCst)
        }

        async fn connect(&self) -> bool {
            if self.0.connectable.load(Ordering::SeqCst) {
                self.0.connected.store(true, Ordering::SeqCst);
                true
            } else {
                false
            }
        }

        async fn disconnect(&self) {
            self.0.connected.store(false, Ordering::SeqCst);
        }

        fn telemetry(&self, key: AttributeKey) -> Option<TelemetryValue> {
            self.0.values.lock().unwrap().get(&key).copied()
        }

        fn notifications(&self) -> broadcast::Receiver<()> {
            self.0.notify.subscribe()
        }
    }

    struct FakeScanner {
        station: Option<Arc<Shared>>,
        scanners: usize,
        requested: Mutex<Option<String>>,
    }

    impl FakeScanner {
        fn visible(station: &Arc<Shared>) -> Self {
            Self {
                station: Some(Arc::clone(station)),
                scanners: 1,
                requested: Mutex::new(None),
            }
        }

        fn invisible(scanners: usize) -> Self {
            Self {
                station: None,
                scanners,
                requested: Mutex::new(None),
            }
        }
    }

    impl DeviceScanner for FakeScanner {
        type Handle = FakeHandle;

        async fn device_from_address(&self, address: &str, _connectable: bool) -> Option<FakeHandle> {
            *self.requested.lock().unwrap() = Some(address.to_string());
            self.station.as_ref().map(|s| FakeHandle(Arc::clone(s)))
        }

        async fn scanner_count(&self, _connectable: bool) -> usize {
            self.scanners
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStore {
        registered: Arc<Mutex<Vec<EntityDescription>>>,
        updates: Arc<Mutex<Vec<StateUpdate>>>,
        unregistered: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingStore {
        fn update_count(&self) -> usize {
            self.updates.lock().unwrap().len()
        }
    }

    impl StateStore for RecordingStore {
        async fn register(&self, description: EntityDescription) -> Result<(), HubError> {
            self.registered.lock().unwrap().push(description);
            Ok(())
        }

        async fn publish_state(&self, update: StateUpdate) -> Result<(), HubError> {
            self.updates.lock().unwrap().push(update);
            Ok(())
        }

        async fn unregister(&self, unique_id: &str) -> Result<(), HubError> {
            self.unregistered.lock().unwrap().push(unique_id.to_string());
            Ok(())
        }
    }

    fn config() -> EntryConfig {
        EntryConfig {
            address: ADDRESS.to_string(),
        }
    }

    /// Poll until `predicate` holds, or panic after one second.
    async fn wait_until(predicate: impl Fn() -> bool) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        while !predicate() {
            assert!(
                tokio::time::Instant::now() < deadline,
                "condition not met within deadline"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn should_report_no_scanners_when_none_are_present() {
        let scanner = FakeScanner::invisible(0);
        let result =
            SolixEntry::<FakeDevice, _>::setup(&scanner, RecordingStore::default(), &config())
                .await;

        let err = result.err().expect("setup must fail");
        assert!(matches!(err, SetupError::NoScanners));
        assert!(err.to_string().contains("scanners"));
    }

    #[tokio::test]
    async fn should_report_not_found_when_device_is_invisible() {
        let scanner = FakeScanner::invisible(1);
        let result =
            SolixEntry::<FakeDevice, _>::setup(&scanner, RecordingStore::default(), &config())
                .await;

        let err = result.err().expect("setup must fail");
        assert!(matches!(err, SetupError::DeviceNotFound));
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn should_report_connect_failed_when_connection_is_refused() {
        let station = Arc::new(Shared::default());
        station.connectable.store(false, Ordering::SeqCst);

        let scanner = FakeScanner::visible(&station);
        let result =
            SolixEntry::<FakeDevice, _>::setup(&scanner, RecordingStore::default(), &config())
                .await;

        assert!(matches!(result.err(), Some(SetupError::ConnectFailed)));
    }

    #[tokio::test]
    async fn should_report_telemetry_not_flowing_when_device_is_unavailable() {
        let station = Arc::new(Shared::default());
        station.available.store(false, Ordering::SeqCst);

        let scanner = FakeScanner::visible(&station);
        let result =
            SolixEntry::<FakeDevice, _>::setup(&scanner, RecordingStore::default(), &config())
                .await;

        assert!(matches!(result.err(), Some(SetupError::TelemetryNotFlowing)));
    }

    #[tokio::test]
    async fn should_register_exactly_twenty_four_sensors_on_success() {
        let station = Arc::new(Shared::default());
        let scanner = FakeScanner::visible(&station);
        let store = RecordingStore::default();

        let entry = SolixEntry::<FakeDevice, _>::setup(&scanner, store.clone(), &config())
            .await
            .expect("setup must succeed");

        assert_eq!(entry.sensor_count(), 24);
        assert_eq!(store.registered.lock().unwrap().len(), 24);

        // Every sensor publishes its initial state on activation.
        let store2 = store.clone();
        wait_until(move || store2.update_count() >= 24).await;
    }

    #[tokio::test]
    async fn should_uppercase_address_before_resolution() {
        let scanner = FakeScanner::invisible(1);
        let lowercase = EntryConfig {
            address: ADDRESS.to_lowercase(),
        };
        let _ = SolixEntry::<FakeDevice, _>::setup(&scanner, RecordingStore::default(), &lowercase)
            .await;

        assert_eq!(scanner.requested.lock().unwrap().as_deref(), Some(ADDRESS));
    }

    #[tokio::test]
    async fn should_forward_notifications_into_state_updates() {
        let station = Arc::new(Shared::default());
        let scanner = FakeScanner::visible(&station);
        let store = RecordingStore::default();

        let _entry = SolixEntry::<FakeDevice, _>::setup(&scanner, store.clone(), &config())
            .await
            .expect("setup must succeed");

        let store2 = store.clone();
        wait_until(move || store2.update_count() >= 24).await;

        station
            .values
            .lock()
            .unwrap()
            .insert(AttributeKey::Light, TelemetryValue::Status(2));
        station.notify.send(()).expect("sensors are subscribed");

        let store2 = store.clone();
        wait_until(move || {
            store2.updates.lock().unwrap().iter().any(|update| {
                update.unique_id.ends_with("Status Light")
                    && update.value == Some(StateValue::Text("Medium"))
            })
        })
        .await;
    }

    #[tokio::test]
    async fn should_stop_forwarding_after_teardown() {
        let station = Arc::new(Shared::default());
        let scanner = FakeScanner::visible(&station);
        let store = RecordingStore::default();

        let entry = SolixEntry::<FakeDevice, _>::setup(&scanner, store.clone(), &config())
            .await
            .expect("setup must succeed");

        let store2 = store.clone();
        wait_until(move || store2.update_count() >= 24).await;

        entry.teardown().await;

        assert_eq!(store.unregistered.lock().unwrap().len(), 24);
        assert!(!station.connected.load(Ordering::SeqCst));

        // A notification after teardown must reach no removed sensor.
        let before = store.update_count();
        let _ = station.notify.send(());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.update_count(), before);
    }
}
