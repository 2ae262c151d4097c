use energy_model::{EnergyRecord, ValidationError};

use crate::pipeline::Envelope;

/// Validate a single source row, logging it when rejected.
pub fn validate_row(env: &Envelope<serde_json::Value>) -> Result<EnergyRecord, ValidationError> {
    EnergyRecord::from_row(&env.payload).inspect_err(|e| {
        metrics::counter!("validation_energy_record_rejected_total").increment(1);
        tracing::warn!(row = env.row, content = %env.payload, error = %e, "validation failed for row");
    })
}

/// Keep the rows that validate, in source order. Rejected rows are dropped.
pub fn validate_rows(rows: Vec<Envelope<serde_json::Value>>) -> Vec<EnergyRecord> {
    rows.iter().filter_map(|env| validate_row(env).ok()).collect()
}
