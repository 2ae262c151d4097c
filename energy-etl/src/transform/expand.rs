//! Explode validated day-records into one row per interval.

use std::iter;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use energy_model::{domain::interval_minutes, EnergyRecord, FlatReading};

/// Absolute instant of local midnight on `date` in `tz`.
///
/// An ambiguous midnight resolves to the later (standard-time) instant. A
/// midnight skipped by a DST gap is read with the offset in force before the gap.
pub fn localize_midnight(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, later) => later,
        LocalResult::None => {
            let before_gap = tz.offset_from_utc_datetime(&(naive - TimeDelta::days(1))).fix();
            let utc = naive - TimeDelta::seconds(i64::from(before_gap.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}

/// One row per reading, timestamped from local midnight in steps of the
/// resolution's interval.
pub fn expand(record: &EnergyRecord, tz: Tz) -> Vec<FlatReading> {
    let midnight = localize_midnight(record.date(), tz);
    let step = TimeDelta::minutes(interval_minutes(record.resolution()));

    let timestamps = iter::successors(Some(midnight), move |ts| Some(*ts + step));

    record
        .energy_consumption()
        .iter()
        .zip(timestamps)
        .map(|(&kwh, timestamp)| FlatReading {
            client_id: record.client_id().to_string(),
            ext_dev_ref: record.ext_dev_ref().to_string(),
            timestamp,
            energy_kwh: kwh,
            resolution: record.resolution().to_string(),
        })
        .collect()
}

pub fn expand_all(records: &[EnergyRecord], tz: Tz) -> Vec<FlatReading> {
    records.iter().flat_map(|r| expand(r, tz)).collect()
}
