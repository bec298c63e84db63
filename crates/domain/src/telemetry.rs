//! Telemetry attributes reported by a Solix power station.
//!
//! The driver decodes each telemetry frame into a fixed set of named
//! attributes. Any attribute may be absent until the first frame that
//! carries it has been decoded.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// The fixed set of telemetry attributes a station reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    AcTimer,
    DcTimer,
    HoursRemaining,
    DaysRemaining,
    TimeRemaining,
    TimestampRemaining,
    AcPowerIn,
    AcPowerOut,
    UsbC1Power,
    UsbC2Power,
    UsbC3Power,
    UsbA1Power,
    DcPowerOut,
    SolarPowerIn,
    PowerIn,
    PowerOut,
    SolarPort,
    BatteryPercentage,
    UsbPortC1,
    UsbPortC2,
    UsbPortC3,
    UsbPortA1,
    DcPort,
    Light,
}

impl AttributeKey {
    /// Snake-case attribute name, matching the driver's wire vocabulary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AcTimer => "ac_timer",
            Self::DcTimer => "dc_timer",
            Self::HoursRemaining => "hours_remaining",
            Self::DaysRemaining => "days_remaining",
            Self::TimeRemaining => "time_remaining",
            Self::TimestampRemaining => "timestamp_remaining",
            Self::AcPowerIn => "ac_power_in",
            Self::AcPowerOut => "ac_power_out",
            Self::UsbC1Power => "usb_c1_power",
            Self::UsbC2Power => "usb_c2_power",
            Self::UsbC3Power => "usb_c3_power",
            Self::UsbA1Power => "usb_a1_power",
            Self::DcPowerOut => "dc_power_out",
            Self::SolarPowerIn => "solar_power_in",
            Self::PowerIn => "power_in",
            Self::PowerOut => "power_out",
            Self::SolarPort => "solar_port",
            Self::BatteryPercentage => "battery_percentage",
            Self::UsbPortC1 => "usb_port_c1",
            Self::UsbPortC2 => "usb_port_c2",
            Self::UsbPortC3 => "usb_port_c3",
            Self::UsbPortA1 => "usb_port_a1",
            Self::DcPort => "dc_port",
            Self::Light => "light",
        }
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw telemetry value as produced by the device driver.
///
/// Timestamps are UTC; `Status` carries the station's small signed status
/// codes (see [`crate::status`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryValue {
    Timestamp(Timestamp),
    Float(f64),
    Int(i64),
    Status(i16),
}
