pub mod energy_record;
pub mod flat_reading;
pub mod resolution;

pub use energy_record::{EnergyRecord, RawRecord, ValidationError};
pub use flat_reading::FlatReading;
pub use resolution::{expected_readings, interval_minutes, DEFAULT_INTERVAL_MINUTES};
