// lancecheck-core/src/ports/connector.rs

// What the harness needs from the query interface, without knowing how it's
// done: a PostgreSQL session with pglance, or an in-process Lance reader.

use crate::error::CheckError;
use async_trait::async_trait;
use serde_json::Value;

/// One row of `table_info(path)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

/// The single row of `table_stats(path)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub version: i64,
    pub num_rows: i64,
    pub num_columns: i32,
}

/// Greeting returned by the liveness probe.
pub const PROBE_GREETING: &str = "Hello, pglance";

#[async_trait]
pub trait QueryInterface: Send + Sync {
    /// Zero-argument liveness probe.
    async fn probe(&self) -> Result<String, CheckError>;

    /// Unordered column descriptions.
    async fn table_info(&self, path: &str) -> Result<Vec<ColumnSchema>, CheckError>;

    async fn table_stats(&self, path: &str) -> Result<TableStats, CheckError>;

    /// At most `limit` rows, each as one self-describing value, in storage
    /// order.
    async fn scan_rows(&self, path: &str, limit: u32) -> Result<Vec<Value>, CheckError>;

    /// Releases the session. Further calls fail.
    async fn close(&self) -> Result<(), CheckError>;

    fn engine_name(&self) -> &str;
}

/// Opens a query interface session.
#[async_trait]
pub trait QueryConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn QueryInterface>, CheckError>;
}
