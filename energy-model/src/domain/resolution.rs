//! Fixed lookup tables keyed by the lower-cased resolution name.
//!
//! Keys are matched case-insensitively: `"Hourly"` and `"HOURLY"` both hit the
//! `hourly` entry. Names missing from a table fall through to the caller's
//! default (no length check, 60-minute interval).

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Interval used when a resolution is not in [`INTERVAL_MINUTES`].
pub const DEFAULT_INTERVAL_MINUTES: i64 = 60;

static EXPECTED_READINGS: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    HashMap::from([("15min", 96), ("30min", 48), ("hourly", 24), ("daily", 1)])
});

static INTERVAL_MINUTES: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([("15min", 15), ("30min", 30), ("hourly", 60), ("daily", 1440)])
});

/// Number of readings a day-record must carry for `resolution`, if known.
pub fn expected_readings(resolution: &str) -> Option<usize> {
    EXPECTED_READINGS
        .get(resolution.to_lowercase().as_str())
        .copied()
}

/// Minutes between consecutive readings for `resolution`.
pub fn interval_minutes(resolution: &str) -> i64 {
    INTERVAL_MINUTES
        .get(resolution.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_INTERVAL_MINUTES)
}
