//! Synthetic input: one day-record per resolution.

use std::path::Path;

use chrono::NaiveDate;
use energy_model::RawRecord;
use tokio::io::AsyncWriteExt;

pub fn sample_records(date: NaiveDate) -> Vec<RawRecord> {
    [
        ("client_hourly", "meter_001", 1, 24, "hourly"),
        ("client_15min", "meter_002", 2, 96, "15min"),
        ("client_30min", "meter_003", 3, 48, "30min"),
        ("client_daily", "meter_004", 4, 1, "daily"),
    ]
    .into_iter()
    .map(|(client_id, ext_dev_ref, value, count, resolution)| RawRecord {
        client_id: client_id.to_string(),
        date,
        ext_dev_ref: ext_dev_ref.to_string(),
        energy_consumption: vec![value; count],
        resolution: resolution.to_string(),
    })
    .collect()
}

/// Write `records` as NDJSON, replacing any existing file.
pub async fn write_ndjson(path: &Path, records: &[RawRecord]) -> anyhow::Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }

    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(out.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
