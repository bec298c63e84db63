//! State-store port — the hub's entity registry and state-update sink.

use std::future::Future;

use solix_domain::error::HubError;
use solix_domain::sensor::{EntityDescription, StateUpdate};

/// Where registered entities and their state updates go.
///
/// Implementations are cheaply cloneable — each sensor's forwarder task
/// owns a clone.
pub trait StateStore: Send + Sync {
    /// Register one sensor entity.
    fn register(
        &self,
        description: EntityDescription,
    ) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Publish a new state for a registered entity.
    fn publish_state(&self, update: StateUpdate)
    -> impl Future<Output = Result<(), HubError>> + Send;

    /// Remove a previously registered entity.
    fn unregister(&self, unique_id: &str) -> impl Future<Output = Result<(), HubError>> + Send;
}
