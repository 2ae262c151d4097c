pub mod flat_csv_file;

pub use flat_csv_file::FlatCsvFileSink;
