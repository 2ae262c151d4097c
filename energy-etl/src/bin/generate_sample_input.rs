use anyhow::{Context, Result};
use chrono::NaiveDate;
use energy_etl::{observability, sample};
use std::{env, path::PathBuf};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    observability::init_tracing();

    let path: PathBuf = env::args()
        .nth(1)
        .unwrap_or_else(|| "input_data.ndjson".to_string())
        .into();
    let date = NaiveDate::from_ymd_opt(2025, 7, 13).context("invalid sample date")?;

    let records = sample::sample_records(date);
    sample::write_ndjson(&path, &records).await?;

    tracing::info!(path = %path.display(), records = records.len(), "sample input written");
    Ok(())
}
