//! The sensor catalog and the projection from raw telemetry to hub state.
//!
//! Each sensor is a pure, read-only view of exactly one telemetry attribute.
//! The catalog is fixed: one entry per attribute the station reports, with
//! the display name, unit, device class and (for status sensors) the label
//! table used to render raw codes.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::status::{LIGHT_STATUS_LABELS, PORT_STATUS_LABELS, status_label};
use crate::telemetry::{AttributeKey, TelemetryValue};
use crate::time::as_local;

/// Semantic type tag the hub uses to render a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorDeviceClass {
    Timestamp,
    Power,
    Battery,
    Enum,
}

/// How the hub should treat a sensor's state history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStateClass {
    Measurement,
}

/// Static description of one sensor in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSpec {
    /// Display name, also part of the unique id.
    pub name: &'static str,
    /// Native unit of measurement, if any.
    pub unit: Option<&'static str>,
    /// The one telemetry attribute this sensor projects.
    pub key: AttributeKey,
    /// Semantic type tag, if any.
    pub device_class: Option<SensorDeviceClass>,
    /// Label table for status sensors.
    pub options: Option<&'static [&'static str]>,
}

impl SensorSpec {
    /// State class reported to the hub: measurements for everything except
    /// status sensors, which have no meaningful numeric history.
    #[must_use]
    pub const fn state_class(&self) -> Option<SensorStateClass> {
        if self.options.is_none() {
            Some(SensorStateClass::Measurement)
        } else {
            None
        }
    }

    /// Unique id of this sensor for a given device address.
    #[must_use]
    pub fn unique_id(&self, address: &str) -> String {
        format!("{address}-{}", self.name)
    }
}

const fn numeric(name: &'static str, unit: &'static str, key: AttributeKey) -> SensorSpec {
    SensorSpec {
        name,
        unit: Some(unit),
        key,
        device_class: None,
        options: None,
    }
}

const fn timestamp(name: &'static str, key: AttributeKey) -> SensorSpec {
    SensorSpec {
        name,
        unit: None,
        key,
        device_class: Some(SensorDeviceClass::Timestamp),
        options: None,
    }
}

const fn power(name: &'static str, key: AttributeKey) -> SensorSpec {
    SensorSpec {
        name,
        unit: Some("W"),
        key,
        device_class: Some(SensorDeviceClass::Power),
        options: None,
    }
}

const fn port_status(name: &'static str, key: AttributeKey) -> SensorSpec {
    SensorSpec {
        name,
        unit: None,
        key,
        device_class: Some(SensorDeviceClass::Enum),
        options: Some(PORT_STATUS_LABELS),
    }
}

/// The fixed catalog of sensors exposed per entry, one per telemetry
/// attribute. Order matches the station's documentation.
pub const SENSOR_SPECS: &[SensorSpec] = &[
    timestamp("AC Timer", AttributeKey::AcTimer),
    timestamp("DC Timer", AttributeKey::DcTimer),
    numeric("Remaining Hours", "hours", AttributeKey::HoursRemaining),
    numeric("Remaining Days", "days", AttributeKey::DaysRemaining),
    numeric("Remaining Time", "hours", AttributeKey::TimeRemaining),
    timestamp("Timestamp Remaining", AttributeKey::TimestampRemaining),
    power("AC Power In", AttributeKey::AcPowerIn),
    power("AC Power Out", AttributeKey::AcPowerOut),
    power("USB C1 Power", AttributeKey::UsbC1Power),
    power("USB C2 Power", AttributeKey::UsbC2Power),
    power("USB C3 Power", AttributeKey::UsbC3Power),
    power("USB A1 Power", AttributeKey::UsbA1Power),
    power("DC Power Out", AttributeKey::DcPowerOut),
    power("Solar Power In", AttributeKey::SolarPowerIn),
    power("Total Power In", AttributeKey::PowerIn),
    power("Total Power Out", AttributeKey::PowerOut),
    port_status("Status Solar", AttributeKey::SolarPort),
    SensorSpec {
        name: "Battery Percentage",
        unit: Some("%"),
        key: AttributeKey::BatteryPercentage,
        device_class: Some(SensorDeviceClass::Battery),
        options: None,
    },
    port_status("Status USB C1", AttributeKey::UsbPortC1),
    port_status("Status USB C2", AttributeKey::UsbPortC2),
    port_status("Status USB C3", AttributeKey::UsbPortC3),
    port_status("Status USB A1", AttributeKey::UsbPortA1),
    port_status("Status DC Out", AttributeKey::DcPort),
    SensorSpec {
        name: "Status Light",
        unit: None,
        key: AttributeKey::Light,
        device_class: Some(SensorDeviceClass::Enum),
        options: Some(LIGHT_STATUS_LABELS),
    },
];

/// A projected sensor state value as published to the hub.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Int(i64),
    Float(f64),
    Timestamp(DateTime<Local>),
    Text(&'static str),
}

/// Project a raw telemetry value to its published state value.
///
/// Pure and idempotent:
/// - absent values stay absent,
/// - timestamps are converted to local time,
/// - status codes are rendered through the sensor's label table
///   (raw `-1` maps to "Unknown"),
/// - everything else passes through unchanged.
#[must_use]
pub fn project(spec: &SensorSpec, raw: Option<TelemetryValue>) -> Option<StateValue> {
    let raw = raw?;
    let value = match (spec.device_class, raw) {
        (Some(SensorDeviceClass::Enum), TelemetryValue::Status(code)) => match spec.options {
            Some(labels) => StateValue::Text(status_label(labels, code)),
            // An enum sensor without a label table is a catalog bug; keep
            // the raw code visible instead of guessing a table.
            None => StateValue::Int(i64::from(code)),
        },
        (_, TelemetryValue::Timestamp(ts)) => StateValue::Timestamp(as_local(ts)),
        (_, TelemetryValue::Float(v)) => StateValue::Float(v),
        (_, TelemetryValue::Int(v)) => StateValue::Int(v),
        (_, TelemetryValue::Status(code)) => StateValue::Int(i64::from(code)),
    };
    Some(value)
}

/// The device a group of sensors belongs to, keyed by its Bluetooth address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Device name as advertised over BLE.
    pub name: String,
    /// Bluetooth connection identifier (MAC address).
    pub bluetooth_address: String,
}

/// Everything the hub needs to register one sensor entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDescription {
    pub name: &'static str,
    pub unique_id: String,
    pub unit: Option<&'static str>,
    pub device_class: Option<SensorDeviceClass>,
    pub options: Option<&'static [&'static str]>,
    pub state_class: Option<SensorStateClass>,
    pub device: DeviceInfo,
}

impl EntityDescription {
    /// Build the registration record for one catalog entry.
    #[must_use]
    pub fn new(spec: &SensorSpec, device: DeviceInfo) -> Self {
        Self {
            name: spec.name,
            unique_id: spec.unique_id(&device.bluetooth_address),
            unit: spec.unit,
            device_class: spec.device_class,
            options: spec.options,
            state_class: spec.state_class(),
            device,
        }
    }
}

/// One state update pushed to the hub's state store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateUpdate {
    pub unique_id: String,
    /// Mirrors the driver's `available` flag at time of read.
    pub available: bool,
    pub value: Option<StateValue>,
}
