//! Sensor entities — one pure projection per telemetry attribute.
//!
//! A sensor never computes derived or aggregated values: its state is
//! always a direct read of one driver attribute, projected through
//! [`solix_domain::sensor::project`]. Each sensor owns one forwarder task
//! that re-reads and re-publishes on every device notification; aborting
//! the task is the guaranteed unsubscribe on every removal path.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use solix_domain::sensor::{DeviceInfo, EntityDescription, SensorSpec, StateUpdate, project};

use crate::ports::{DeviceDriver, StateStore};

/// A read-only sensor entity bound to one telemetry attribute.
pub struct SensorEntity<D> {
    spec: &'static SensorSpec,
    device: Arc<D>,
    unique_id: String,
}

impl<D: DeviceDriver> SensorEntity<D> {
    /// Bind a catalog entry to a device. Does not subscribe.
    #[must_use]
    pub fn new(spec: &'static SensorSpec, device: Arc<D>) -> Self {
        let unique_id = spec.unique_id(&device.address());
        Self {
            spec,
            device,
            unique_id,
        }
    }

    /// Registration record for the hub.
    #[must_use]
    pub fn description(&self) -> EntityDescription {
        EntityDescription::new(
            self.spec,
            DeviceInfo {
                name: self.device.name(),
                bluetooth_address: self.device.address(),
            },
        )
    }

    /// Re-derive the published state from the device: availability mirrors
    /// the driver's flag, the value is the projection of one attribute.
    #[must_use]
    pub fn snapshot(&self) -> StateUpdate {
        StateUpdate {
            unique_id: self.unique_id.clone(),
            available: self.device.is_available(),
            value: project(self.spec, self.device.telemetry(self.spec.key)),
        }
    }

    /// Activate the sensor: subscribe to device notifications and spawn the
    /// forwarder task. The initial state is published immediately.
    pub(crate) fn activate<C>(self, store: C) -> SensorHandle
    where
        C: StateStore + 'static,
    {
        // Subscribe before the initial publish so no frame between the two
        // is lost.
        let notifications = self.device.notifications();
        let unique_id = self.unique_id.clone();
        let task = tokio::spawn(forward(self, notifications, store));
        SensorHandle { unique_id, task }
    }
}

/// Handle to one activated sensor's forwarder task.
pub struct SensorHandle {
    unique_id: String,
    task: JoinHandle<()>,
}

impl SensorHandle {
    /// Unique id of the sensor this handle controls.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Deactivate the sensor. Aborting the task drops the notification
    /// receiver, which is the unsubscribe.
    pub(crate) fn deactivate(&self) {
        self.task.abort();
    }
}

/// Forwarder loop: publish once on activation, then once per notification.
async fn forward<D, C>(
    entity: SensorEntity<D>,
    mut notifications: broadcast::Receiver<()>,
    store: C,
) where
    D: DeviceDriver,
    C: StateStore,
{
    publish_snapshot(&entity, &store).await;

    loop {
        match notifications.recv().await {
            Ok(()) => {
                tracing::debug!(sensor = entity.spec.name, "state notification from device");
                publish_snapshot(&entity, &store).await;
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                // The snapshot reads current state, so missed notifications
                // collapse into one publish.
                tracing::debug!(sensor = entity.spec.name, missed, "notifications lagged");
                publish_snapshot(&entity, &store).await;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn publish_snapshot<D, C>(entity: &SensorEntity<D>, store: &C)
where
    D: DeviceDriver,
    C: StateStore,
{
    if let Err(err) = store.publish_state(entity.snapshot()).await {
        tracing::warn!(%err, sensor = entity.spec.name, "failed to publish sensor state");
    }
}
