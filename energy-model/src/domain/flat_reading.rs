use chrono::DateTime;
use chrono_tz::Tz;

/// One interval of an expanded day-record.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatReading {
    pub client_id: String,
    pub ext_dev_ref: String,
    pub timestamp: DateTime<Tz>,
    pub energy_kwh: i64,
    pub resolution: String,
}
