//! # solix-adapter-virtual
//!
//! Virtual/demo adapter — a simulated Solix station for testing and
//! demonstration purposes.
//!
//! [`VirtualStation`] plays the physical device: tests and demos feed it
//! telemetry and fire notifications. [`VirtualScanner`] resolves exactly
//! that station's address, and [`VirtualDevice`] implements the driver port
//! against the shared station state.
//!
//! ## Dependency rule
//!
//! Depends on `solix-app` (port traits) and `solix-domain` only.

mod station;

pub use station::{VirtualDevice, VirtualHandle, VirtualScanner, VirtualStation};
