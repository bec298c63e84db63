//! # solix-domain
//!
//! Pure domain model for the Solix BLE telemetry bridge.
//!
//! ## Responsibilities
//! - Define the fixed set of **telemetry attributes** a Solix power station
//!   reports (timestamps, power readings, signed status codes)
//! - Define the **status-code tables** and the offset-by-one mapping from
//!   raw codes to human-readable labels
//! - Define the **sensor catalog**: the 24 sensor entities the bridge
//!   exposes, with names, units, device classes and enum options
//! - Provide the pure, side-effect-free **projection** from a raw telemetry
//!   value to the state value published to the hub
//! - Define error conventions and timestamp helpers
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod sensor;
pub mod status;
pub mod telemetry;
pub mod time;
