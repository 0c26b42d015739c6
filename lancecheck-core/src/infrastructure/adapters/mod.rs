pub mod arrow_json;
pub mod lance_native;
pub mod lance_writer;
pub mod postgres;
pub mod type_labels;

pub use lance_native::{NativeLanceConnector, NativeLanceInterface};
pub use lance_writer::LanceDatasetSink;
pub use postgres::{PostgresConnector, PostgresInterface};
