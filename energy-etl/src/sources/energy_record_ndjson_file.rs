use std::path::PathBuf;

use async_stream::try_stream;
use futures::Stream;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};

use crate::pipeline::{Envelope, PipelineError, Source};

/// NDJSON source of daily energy records.
///
/// Each non-blank line must be a JSON value. Lines are passed on untyped so
/// that field-level problems surface as per-row validation failures; only I/O
/// errors and lines that are not JSON at all abort the run.
pub struct EnergyRecordFileSource {
    path: PathBuf,
}

impl EnergyRecordFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl Source<serde_json::Value> for EnergyRecordFileSource {
    async fn stream(
        &self,
    ) -> std::pin::Pin<Box<dyn Stream<Item = Result<Envelope<serde_json::Value>, PipelineError>> + Send>>
    {
        let path = self.path.clone();
        let s = try_stream! {
            let file = File::open(&path).await.map_err(|e| {
                PipelineError::SourceUnreadable(format!("failed to open {}: {e}", path.display()))
            })?;
            let mut lines = BufReader::new(file).lines();
            let mut line_no = 0usize;

            while let Some(line) = lines.next_line().await.map_err(|e| {
                PipelineError::SourceUnreadable(format!("failed to read {}: {e}", path.display()))
            })? {
                line_no += 1;
                if line.trim().is_empty() {
                    continue;
                }

                let payload: serde_json::Value = serde_json::from_str(&line).map_err(|e| {
                    PipelineError::SourceUnreadable(format!("line {line_no} is not valid JSON: {e}"))
                })?;
                yield Envelope { payload, row: line_no };
            }
        };

        Box::pin(s)
    }
}
