use std::{fs, io, path::PathBuf};

use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "energy-etl.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// IANA zone that record dates are local to.
    pub timezone: String,
    pub sample_rows_per_client: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input_data.ndjson"),
            output_path: PathBuf::from("flattened_energy_data.csv"),
            timezone: "Europe/Vilnius".to_string(),
            sample_rows_per_client: 3,
        }
    }
}

impl AppConfig {
    /// Load from `ENERGY_ETL_CONFIG`, or `energy-etl.toml` when unset.
    ///
    /// A missing default file means built-in defaults; a missing file named
    /// explicitly through the environment is an error.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let (path, explicit) = match env::var("ENERGY_ETL_CONFIG") {
            Ok(p) => (p, true),
            Err(_) => (DEFAULT_CONFIG_PATH.to_string(), false),
        };
        let cfg = match fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml(&contents).with_context(|| format!("invalid config {path}"))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => Self::default(),
            Err(e) => return Err(e).with_context(|| format!("failed to read config {path}")),
        };
        cfg.tz()?;
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Apply positional `<input> [output]` overrides.
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        let mut args = args.into_iter();
        if let Some(input) = args.next() {
            self.input_path = input.into();
        }
        if let Some(output) = args.next() {
            self.output_path = output.into();
        }
        self
    }

    pub fn tz(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid timezone '{}': {e}", self.timezone))
    }
}
