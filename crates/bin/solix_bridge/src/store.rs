//! Tracing-backed state store.
//!
//! Stands in for a real hub: registrations and state updates are written to
//! the log instead of an entity registry.

use solix_app::ports::StateStore;
use solix_domain::error::HubError;
use solix_domain::sensor::{EntityDescription, StateUpdate};

/// State store that logs everything it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStateStore;

impl StateStore for TracingStateStore {
    async fn register(&self, description: EntityDescription) -> Result<(), HubError> {
        tracing::info!(
            unique_id = %description.unique_id,
            name = description.name,
            unit = ?description.unit,
            device_class = ?description.device_class,
            "entity registered"
        );
        Ok(())
    }

    async fn publish_state(&self, update: StateUpdate) -> Result<(), HubError> {
        tracing::info!(
            unique_id = %update.unique_id,
            available = update.available,
            value = ?update.value,
            "state update"
        );
        Ok(())
    }

    async fn unregister(&self, unique_id: &str) -> Result<(), HubError> {
        tracing::info!(unique_id, "entity unregistered");
        Ok(())
    }
}
