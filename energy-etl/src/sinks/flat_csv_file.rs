use std::{
    fs,
    path::{Path, PathBuf},
};

use energy_model::FlatReading;
use serde::Serialize;

use crate::pipeline::{PipelineError, Sink};

/// Writes the flattened table as CSV.
///
/// Columns: client_id, ext_dev_ref, timestamp (RFC 3339 with local offset),
/// energy_kWh, resolution. The table goes to a sibling `.tmp` file first and
/// is renamed over `path` once complete.
pub struct FlatCsvFileSink {
    path: PathBuf,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    client_id: &'a str,
    ext_dev_ref: &'a str,
    timestamp: String,
    #[serde(rename = "energy_kWh")]
    energy_kwh: i64,
    resolution: &'a str,
}

impl<'a> From<&'a FlatReading> for CsvRow<'a> {
    fn from(r: &'a FlatReading) -> Self {
        CsvRow {
            client_id: &r.client_id,
            ext_dev_ref: &r.ext_dev_ref,
            timestamp: r.timestamp.to_rfc3339(),
            energy_kwh: r.energy_kwh,
            resolution: &r.resolution,
        }
    }
}

impl FlatCsvFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn write_table(tmp: &Path, rows: &[FlatReading]) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_path(tmp)?;
        for row in rows {
            wtr.serialize(CsvRow::from(row))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Sink for FlatCsvFileSink {
    async fn write(&self, rows: &[FlatReading]) -> Result<(), PipelineError> {
        // Blocking writer; the table is written once per run.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Err(e) = Self::write_table(&tmp, rows) {
            let _ = fs::remove_file(&tmp);
            return Err(PipelineError::SinkUnwritable(format!(
                "failed to write {}: {e}",
                self.path.display()
            )));
        }

        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            PipelineError::SinkUnwritable(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "flattened table written");
        Ok(())
    }
}
