// lancecheck-core/src/infrastructure/adapters/lance_native.rs
//
// In-process implementation of the pglance contract, reading datasets
// directly with the Lance crate. Serves as the reference backend when no
// PostgreSQL server is available.

use async_trait::async_trait;
use futures::TryStreamExt;
use lance::dataset::Dataset;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};

// Hexagonal imports
use crate::error::CheckError;
use crate::infrastructure::adapters::arrow_json::batch_to_rows;
use crate::infrastructure::adapters::type_labels::pg_type_label;
use crate::ports::connector::{
    ColumnSchema, PROBE_GREETING, QueryConnector, QueryInterface, TableStats,
};

#[derive(Debug, Default)]
pub struct NativeLanceInterface {
    closed: AtomicBool,
}

impl NativeLanceInterface {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), CheckError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(CheckError::InternalError("session already closed".into()));
        }
        Ok(())
    }

    async fn open(&self, path: &str) -> Result<Dataset, CheckError> {
        self.ensure_open()?;
        Ok(Dataset::open(path).await?)
    }
}

#[async_trait]
impl QueryInterface for NativeLanceInterface {
    async fn probe(&self) -> Result<String, CheckError> {
        self.ensure_open()?;
        Ok(PROBE_GREETING.to_string())
    }

    #[instrument(skip(self))]
    async fn table_info(&self, path: &str) -> Result<Vec<ColumnSchema>, CheckError> {
        let dataset = self.open(path).await?;
        let columns = dataset
            .schema()
            .fields
            .iter()
            .map(|field| ColumnSchema {
                name: field.name.clone(),
                data_type: pg_type_label(&field.data_type()).to_string(),
                is_nullable: field.nullable,
            })
            .collect();
        Ok(columns)
    }

    #[instrument(skip(self))]
    async fn table_stats(&self, path: &str) -> Result<TableStats, CheckError> {
        let dataset = self.open(path).await?;
        let num_rows = dataset.count_rows(None).await?;

        Ok(TableStats {
            version: to_i64(dataset.version().version)?,
            num_rows: to_i64(num_rows as u64)?,
            num_columns: i32::try_from(dataset.schema().fields.len()).map_err(|_| {
                CheckError::MalformedResult(format!("too many columns in {path}"))
            })?,
        })
    }

    #[instrument(skip(self))]
    async fn scan_rows(&self, path: &str, limit: u32) -> Result<Vec<Value>, CheckError> {
        let dataset = self.open(path).await?;
        let limit = limit as usize;

        let mut scanner = dataset.scan();
        scanner.limit(Some(limit as i64), None)?;
        let mut stream = Box::pin(scanner.try_into_stream().await?);

        let mut rows = Vec::new();
        while rows.len() < limit {
            let Some(batch) = stream.try_next().await? else {
                break;
            };
            rows.extend(batch_to_rows(&batch));
        }
        rows.truncate(limit);

        debug!(rows = rows.len(), "scan finished");
        Ok(rows)
    }

    async fn close(&self) -> Result<(), CheckError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "lance-native"
    }
}

fn to_i64(value: u64) -> Result<i64, CheckError> {
    i64::try_from(value)
        .map_err(|_| CheckError::MalformedResult(format!("value {value} overflows int8")))
}

#[derive(Debug, Default, Clone)]
pub struct NativeLanceConnector;

#[async_trait]
impl QueryConnector for NativeLanceConnector {
    async fn connect(&self) -> Result<Box<dyn QueryInterface>, CheckError> {
        Ok(Box::new(NativeLanceInterface::new()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::{DatasetId, definition};
    use crate::infrastructure::adapters::lance_writer::LanceDatasetSink;
    use crate::ports::storage::DatasetSink;
    use anyhow::Result;
    use serde_json::json;

    async fn write(dir: &std::path::Path, id: DatasetId) -> Result<String> {
        let path = dir.join(id.name());
        LanceDatasetSink::new()
            .write_overwrite(&path, &definition(id)?)
            .await?;
        Ok(path.to_string_lossy().into_owned())
    }

    #[tokio::test]
    async fn test_table_info_reports_pg_labels() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write(dir.path(), DatasetId::Vector).await?;
        let interface = NativeLanceInterface::new();

        let columns = interface.table_info(&path).await?;
        let embedding = columns
            .iter()
            .find(|c| c.name == "embedding")
            .ok_or_else(|| anyhow::anyhow!("Column 'embedding' not found"))?;
        assert_eq!(embedding.data_type, "float4[]");
        assert_eq!(columns.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_count_rows_and_columns() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write(dir.path(), DatasetId::Large).await?;

        let stats = NativeLanceInterface::new().table_stats(&path).await?;
        assert_eq!(stats.num_rows, 1000);
        assert_eq!(stats.num_columns, 4);
        assert!(stats.version >= 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_scan_is_bounded_by_limit_and_row_count() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let large = write(dir.path(), DatasetId::Large).await?;
        let complex = write(dir.path(), DatasetId::Complex).await?;
        let interface = NativeLanceInterface::new();

        assert_eq!(interface.scan_rows(&large, 10).await?.len(), 10);
        assert_eq!(interface.scan_rows(&complex, 50).await?.len(), 3);

        let sample = interface.scan_rows(&large, 1).await?;
        assert_eq!(sample.len(), 1);
        let first = &sample[0];
        assert_eq!(first["category"], json!("cat_0"));
        assert_eq!(first["flag"], json!(true));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_dataset_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("nope").to_string_lossy().into_owned();
        assert!(NativeLanceInterface::new().table_stats(&missing).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_closed_session_rejects_queries() -> Result<()> {
        let interface = NativeLanceInterface::new();
        assert_eq!(interface.probe().await?, PROBE_GREETING);
        interface.close().await?;
        assert!(interface.probe().await.is_err());
        Ok(())
    }
}
