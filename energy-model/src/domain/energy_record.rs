use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::resolution::expected_readings;

/// Calendar years a record date may fall in.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// One client/device/day row as it arrives from a source.
///
/// Field types are enforced by deserialization; the resolution/length contract
/// is not. Turn it into an [`EnergyRecord`] before using the readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub client_id: String,
    pub date: NaiveDate,
    pub ext_dev_ref: String,
    pub energy_consumption: Vec<i64>,
    pub resolution: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing fields, wrong primitive types, or an impossible calendar date.
    #[error("malformed row: {0}")]
    Malformed(String),
    #[error("expected {expected} values for resolution '{resolution}', got {actual}")]
    ShapeMismatch {
        resolution: String,
        expected: usize,
        actual: usize,
    },
}

/// A day of readings whose length agrees with its resolution.
///
/// Only constructible through validation, so holders may rely on
/// `energy_consumption().len() == expected_readings(resolution())` for every
/// known resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyRecord {
    client_id: String,
    date: NaiveDate,
    ext_dev_ref: String,
    energy_consumption: Vec<i64>,
    resolution: String,
}

impl EnergyRecord {
    /// Type-check an untyped row and validate it in one step.
    pub fn from_row(row: &serde_json::Value) -> Result<Self, ValidationError> {
        let raw = RawRecord::deserialize(row).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn ext_dev_ref(&self) -> &str {
        &self.ext_dev_ref
    }

    pub fn energy_consumption(&self) -> &[i64] {
        &self.energy_consumption
    }

    pub fn resolution(&self) -> &str {
        &self.resolution
    }
}

impl TryFrom<RawRecord> for EnergyRecord {
    type Error = ValidationError;

    /// Unknown resolutions skip the length check entirely.
    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        if !SUPPORTED_YEARS.contains(&raw.date.year()) {
            return Err(ValidationError::Malformed(format!(
                "date {} is outside years 1..=9999",
                raw.date
            )));
        }

        let actual = raw.energy_consumption.len();
        if let Some(expected) = expected_readings(&raw.resolution) {
            if actual != expected {
                return Err(ValidationError::ShapeMismatch {
                    resolution: raw.resolution,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            client_id: raw.client_id,
            date: raw.date,
            ext_dev_ref: raw.ext_dev_ref,
            energy_consumption: raw.energy_consumption,
            resolution: raw.resolution,
        })
    }
}
