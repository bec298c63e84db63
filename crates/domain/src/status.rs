//! Status codes and their human-readable labels.
//!
//! The station reports port and light states as small signed integers. Each
//! label table reserves slot 0 for "Unknown" so that the raw sentinel `-1`
//! lands on it after applying [`STATUS_LABEL_OFFSET`] — an implicit contract
//! with the driver's status-code encoding.

/// Raw status code the station uses for "state unknown".
pub const UNKNOWN_STATUS_CODE: i16 = -1;

/// Offset applied to a raw status code to index into a label table.
///
/// Slot 0 of every table is the "Unknown" label, so a raw code of
/// [`UNKNOWN_STATUS_CODE`] maps to it.
pub const STATUS_LABEL_OFFSET: i16 = 1;

/// Labels for the AC/DC/USB/solar port status codes.
pub const PORT_STATUS_LABELS: &[&str] = &["Unknown", "Not connected", "Output", "Input"];

/// Labels for the light-bar status codes.
pub const LIGHT_STATUS_LABELS: &[&str] = &["Unknown", "Off", "Low", "Medium", "High"];

/// Map a raw status code to its label.
///
/// Codes outside the table range (the driver does not guarantee they cannot
/// occur) map to the "Unknown" slot rather than panicking.
#[must_use]
pub fn status_label(labels: &'static [&'static str], code: i16) -> &'static str {
    let slot = i32::from(code) + i32::from(STATUS_LABEL_OFFSET);
    match usize::try_from(slot) {
        Ok(slot) if slot < labels.len() => labels[slot],
        _ => labels[0],
    }
}
