//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world: the host's BLE discovery service, the external device driver, and
//! the hub's state store. They are defined here so that both the lifecycle
//! layer and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod driver;
pub mod scanner;
pub mod state;

pub use driver::DeviceDriver;
pub use scanner::DeviceScanner;
pub use state::StateStore;
