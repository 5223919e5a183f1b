//! Wall-clock helpers.
//!
//! Client timestamps are Unix seconds as floats (the device sends
//! `timeIntervalSince1970`), so defaults produced here use the same unit.

use chrono::{DateTime, Utc};

/// Current time as fractional Unix seconds.
pub fn unix_now() -> f64 {
    to_unix_seconds(Utc::now())
}

/// Convert a UTC instant to fractional Unix seconds (microsecond precision).
#[allow(clippy::cast_precision_loss)]
pub fn to_unix_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn converts_whole_and_fractional_seconds() {
        let at = Utc.timestamp_opt(1_700_000_000, 250_000_000).single();
        let secs = at.map(to_unix_seconds).unwrap_or_default();
        assert!((secs - 1_700_000_000.25).abs() < 1e-6);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(unix_now() > 1_577_836_800.0);
    }
}
