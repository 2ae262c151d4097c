pub mod domain;

pub use domain::{EnergyRecord, FlatReading, RawRecord, ValidationError};
