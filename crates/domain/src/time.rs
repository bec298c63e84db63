//! Time and timestamp helpers.

use chrono::{DateTime, Local, Utc};

/// UTC timestamp as reported by the device driver.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Convert a device-reported UTC timestamp to the hub's local time.
///
/// Published timestamp states carry the local timezone so the hub can
/// render them without further conversion.
#[must_use]
pub fn as_local(ts: Timestamp) -> DateTime<Local> {
    ts.with_timezone(&Local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_preserve_the_instant_when_converting_to_local() {
        let ts = now();
        let local = as_local(ts);
        assert_eq!(local.timestamp_millis(), ts.timestamp_millis());
    }
}
