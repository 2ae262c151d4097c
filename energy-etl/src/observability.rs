use energy_model::FlatReading;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("energy_etl=info".parse().unwrap_or_else(|_| "info".parse().unwrap()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// First `per_client` rows of each distinct client, clients in order of first
/// appearance.
pub fn sample_rows(rows: &[FlatReading], per_client: usize) -> Vec<(&str, Vec<&FlatReading>)> {
    let mut samples: Vec<(&str, Vec<&FlatReading>)> = Vec::new();
    for row in rows {
        let idx = match samples.iter().position(|(client, _)| *client == row.client_id) {
            Some(idx) => idx,
            None => {
                samples.push((row.client_id.as_str(), Vec::new()));
                samples.len() - 1
            }
        };
        if samples[idx].1.len() < per_client {
            samples[idx].1.push(row);
        }
    }
    samples
}

pub fn log_samples(rows: &[FlatReading], per_client: usize) {
    for (client, sample) in sample_rows(rows, per_client) {
        let mut table = String::from("client_id ext_dev_ref timestamp energy_kWh resolution");
        for r in sample {
            table.push_str(&format!(
                "\n{} {} {} {} {}",
                r.client_id,
                r.ext_dev_ref,
                r.timestamp.to_rfc3339(),
                r.energy_kwh,
                r.resolution
            ));
        }
        tracing::info!(client = %client, "sample for {client}:\n{table}");
    }
}
