use anyhow::Result;
use energy_etl::{
    config::AppConfig,
    observability,
    pipeline::Pipeline,
    sinks::FlatCsvFileSink,
    sources::EnergyRecordFileSource,
};
use std::env;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Usage: energy-etl [input.ndjson] [output.csv]
    let cfg = AppConfig::load()?.with_args(env::args().skip(1));
    let timezone = cfg.tz()?;

    tracing::info!(
        input = %cfg.input_path.display(),
        output = %cfg.output_path.display(),
        timezone = %timezone,
        "starting energy flattening run"
    );

    let pipeline = Pipeline {
        source: EnergyRecordFileSource::new(&cfg.input_path),
        sink: FlatCsvFileSink::new(&cfg.output_path),
        timezone,
        sample_rows_per_client: cfg.sample_rows_per_client,
    };

    pipeline.run().await?;

    Ok(())
}
