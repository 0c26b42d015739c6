pub mod connector;
pub mod storage;

pub use connector::{ColumnSchema, PROBE_GREETING, QueryConnector, QueryInterface, TableStats};
pub use storage::DatasetSink;
