pub mod energy_record_ndjson_file;

pub use energy_record_ndjson_file::EnergyRecordFileSource;
