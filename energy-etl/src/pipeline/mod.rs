use std::pin::Pin;

use chrono_tz::Tz;
use energy_model::FlatReading;
use futures::{Stream, StreamExt};

use crate::{observability, transform};

/// A raw row tagged with its 1-based position in the source.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub payload: T,
    pub row: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source unreadable: {0}")]
    SourceUnreadable(String),
    #[error("no valid records found ({rejected} of {read} rows rejected)")]
    AllRowsRejected { read: usize, rejected: usize },
    #[error("sink unwritable: {0}")]
    SinkUnwritable(String),
}

#[async_trait::async_trait]
pub trait Source<T>: Send + Sync {
    async fn stream(
        &self,
    ) -> Pin<Box<dyn Stream<Item = Result<Envelope<T>, PipelineError>> + Send>>;
}

/// Persists the whole flattened table in a single write.
#[async_trait::async_trait]
pub trait Sink: Send + Sync {
    async fn write(&self, rows: &[FlatReading]) -> Result<(), PipelineError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_rejected: usize,
    pub records_validated: usize,
    pub rows_written: usize,
}

pub struct Pipeline<S, K> {
    pub source: S,
    pub sink: K,
    pub timezone: Tz,
    pub sample_rows_per_client: usize,
}

impl<S, K> Pipeline<S, K>
where
    S: Source<serde_json::Value>,
    K: Sink,
{
    pub async fn run(self) -> Result<RunSummary, PipelineError> {
        let mut stream = self.source.stream().await;
        let mut rows = Vec::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(env) => rows.push(env),
                Err(e) => {
                    tracing::error!(error = %e, "failed to load source rows");
                    return Err(e);
                }
            }
        }

        let rows_read = rows.len();
        metrics::counter!("energy_etl_rows_read_total").increment(rows_read as u64);

        let records = transform::validate_rows(rows);
        let rows_rejected = rows_read - records.len();
        if records.is_empty() {
            let err = PipelineError::AllRowsRejected {
                read: rows_read,
                rejected: rows_rejected,
            };
            tracing::error!(error = %err, "no valid records found, nothing written");
            return Err(err);
        }

        let table = transform::expand_all(&records, self.timezone);
        if let Err(e) = self.sink.write(&table).await {
            tracing::error!(error = %e, "failed to persist flattened table");
            return Err(e);
        }
        metrics::counter!("energy_etl_rows_written_total").increment(table.len() as u64);

        observability::log_samples(&table, self.sample_rows_per_client);

        let summary = RunSummary {
            rows_read,
            rows_rejected,
            records_validated: records.len(),
            rows_written: table.len(),
        };
        tracing::info!(
            rows_read = summary.rows_read,
            rows_rejected = summary.rows_rejected,
            rows_written = summary.rows_written,
            "run complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    struct VecSource(Vec<Result<serde_json::Value, String>>);

    #[async_trait::async_trait]
    impl Source<serde_json::Value> for VecSource {
        async fn stream(
            &self,
        ) -> Pin<Box<dyn Stream<Item = Result<Envelope<serde_json::Value>, PipelineError>> + Send>>
        {
            let items: Vec<_> = self
                .0
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Ok(v) => Ok(Envelope { payload: v.clone(), row: i + 1 }),
                    Err(msg) => Err(PipelineError::SourceUnreadable(msg.clone())),
                })
                .collect();
            Box::pin(futures::stream::iter(items))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        writes: Arc<Mutex<Vec<Vec<FlatReading>>>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Sink for RecordingSink {
        async fn write(&self, rows: &[FlatReading]) -> Result<(), PipelineError> {
            if self.fail {
                return Err(PipelineError::SinkUnwritable("disk full".to_string()));
            }
            self.writes.lock().unwrap().push(rows.to_vec());
            Ok(())
        }
    }

    fn row(client: &str, readings: Vec<i64>, resolution: &str) -> serde_json::Value {
        json!({
            "client_id": client,
            "date": "2025-07-13",
            "ext_dev_ref": "m1",
            "energy_consumption": readings,
            "resolution": resolution,
        })
    }

    fn pipeline(source: VecSource, sink: RecordingSink) -> Pipeline<VecSource, RecordingSink> {
        Pipeline {
            source,
            sink,
            timezone: chrono_tz::Europe::Vilnius,
            sample_rows_per_client: 3,
        }
    }

    #[tokio::test]
    async fn valid_rows_are_flattened_and_rejects_dropped() {
        let sink = RecordingSink::default();
        let source = VecSource(vec![
            Ok(row("c1", vec![1; 24], "hourly")),
            Ok(row("c1", vec![5, 6, 7, 8], "hourly")),
            Ok(row("c2", vec![9], "daily")),
        ]);

        let summary = pipeline(source, sink.clone()).run().await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                rows_read: 3,
                rows_rejected: 1,
                records_validated: 2,
                rows_written: 25,
            }
        );

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].len(), 25);
        assert_eq!(writes[0][24].client_id, "c2");
        assert_eq!(writes[0][24].energy_kwh, 9);
    }

    #[tokio::test]
    async fn all_rows_rejected_skips_the_sink() {
        let sink = RecordingSink::default();
        let source = VecSource(vec![
            Ok(row("c1", vec![5, 6, 7, 8], "hourly")),
            Ok(json!({ "client_id": "c2" })),
        ]);

        let err = pipeline(source, sink.clone()).run().await.unwrap_err();
        assert!(matches!(err, PipelineError::AllRowsRejected { read: 2, rejected: 2 }));
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_source_is_all_rejected() {
        let sink = RecordingSink::default();
        let err = pipeline(VecSource(vec![]), sink.clone()).run().await.unwrap_err();
        assert!(matches!(err, PipelineError::AllRowsRejected { read: 0, rejected: 0 }));
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn source_failure_aborts_before_writing() {
        let sink = RecordingSink::default();
        let source = VecSource(vec![
            Ok(row("c1", vec![1], "daily")),
            Err("line 2 is not JSON".to_string()),
        ]);

        let err = pipeline(source, sink.clone()).run().await.unwrap_err();
        assert!(matches!(err, PipelineError::SourceUnreadable(_)));
        assert!(sink.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_is_propagated() {
        let sink = RecordingSink { fail: true, ..Default::default() };
        let source = VecSource(vec![Ok(row("c1", vec![1], "daily"))]);

        let err = pipeline(source, sink).run().await.unwrap_err();
        assert!(matches!(err, PipelineError::SinkUnwritable(_)));
    }
}
