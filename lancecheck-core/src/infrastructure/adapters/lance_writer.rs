// lancecheck-core/src/infrastructure/adapters/lance_writer.rs

use async_trait::async_trait;
use chrono::Datelike;
use lance::dataset::{Dataset, WriteMode, WriteParams};
use lance::deps::arrow_array::builder::{ListBuilder, StringBuilder};
use lance::deps::arrow_array::types::Int64Type;
use lance::deps::arrow_array::{
    ArrayRef, BooleanArray, Date32Array, FixedSizeListArray, Float32Array, Float64Array,
    Int64Array, ListArray, RecordBatch, RecordBatchIterator, StringArray, TimestampSecondArray,
};
use lance::deps::arrow_schema::{DataType, Field, Schema};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

// Hexagonal imports
use crate::domain::dataset::{ColumnValues, DatasetDefinition};
use crate::error::CheckError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::storage::DatasetSink;

// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Writes dataset definitions as Lance datasets on the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct LanceDatasetSink;

impl LanceDatasetSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatasetSink for LanceDatasetSink {
    #[instrument(skip(self, definition), fields(dataset = definition.name()))]
    async fn write_overwrite(
        &self,
        path: &Path,
        definition: &DatasetDefinition,
    ) -> Result<(), CheckError> {
        let uri = path
            .to_str()
            .ok_or_else(|| InfrastructureError::InvalidPath(format!("{:?}", path)))?;

        let batch = to_record_batch(definition)?;
        let schema = batch.schema();
        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        let params = WriteParams {
            mode: WriteMode::Overwrite,
            ..Default::default()
        };
        let dataset = Dataset::write(reader, uri, Some(params)).await?;

        info!(
            uri,
            version = dataset.version().version,
            rows = definition.row_count(),
            "Lance dataset written"
        );
        Ok(())
    }
}

/// Converts a definition into a single Arrow batch. Field types follow the
/// arrays, so schema and data cannot disagree.
pub fn to_record_batch(definition: &DatasetDefinition) -> Result<RecordBatch, InfrastructureError> {
    let mut fields = Vec::with_capacity(definition.columns().len());
    let mut arrays = Vec::with_capacity(definition.columns().len());

    for column in definition.columns() {
        let array = to_array(&column.values)?;
        fields.push(Field::new(
            column.name.as_str(),
            array.data_type().clone(),
            column.nullable,
        ));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, arrays)?)
}

fn to_array(values: &ColumnValues) -> Result<ArrayRef, InfrastructureError> {
    let array: ArrayRef = match values {
        ColumnValues::Int64(v) => Arc::new(Int64Array::from(v.clone())),
        ColumnValues::Float64(v) => Arc::new(Float64Array::from(v.clone())),
        ColumnValues::Utf8(v) | ColumnValues::EncodedRecord(v) => {
            Arc::new(StringArray::from_iter_values(v.iter()))
        }
        ColumnValues::Boolean(v) => Arc::new(BooleanArray::from(v.clone())),
        ColumnValues::Date(v) => Arc::new(Date32Array::from(
            v.iter()
                .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
                .collect::<Vec<_>>(),
        )),
        ColumnValues::Timestamp(v) => Arc::new(TimestampSecondArray::from(
            v.iter()
                .map(|ts| ts.and_utc().timestamp())
                .collect::<Vec<_>>(),
        )),
        ColumnValues::FloatVector { dim, rows } => {
            let width = i32::try_from(*dim).map_err(|_| {
                InfrastructureError::ConfigError(format!("vector width {dim} out of range"))
            })?;
            let flat = Float32Array::from_iter_values(rows.iter().flatten().copied());
            let item = Arc::new(Field::new("item", DataType::Float32, true));
            Arc::new(FixedSizeListArray::try_new(
                item,
                width,
                Arc::new(flat),
                None,
            )?)
        }
        ColumnValues::Int64List(v) => Arc::new(ListArray::from_iter_primitive::<Int64Type, _, _>(
            v.iter().map(|row| Some(row.iter().copied().map(Some))),
        )),
        ColumnValues::Utf8List(v) => {
            let mut builder = ListBuilder::new(StringBuilder::new());
            for row in v {
                for item in row {
                    builder.values().append_value(item);
                }
                builder.append(true);
            }
            Arc::new(builder.finish())
        }
    };
    Ok(array)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::{DatasetId, definition};
    use anyhow::Result;
    use lance::deps::arrow_array::Array;
    use lance::deps::arrow_schema::TimeUnit;

    #[test]
    fn test_complex_table_arrow_types() -> Result<()> {
        let batch = to_record_batch(&definition(DatasetId::Complex)?)?;
        let schema = batch.schema();

        assert_eq!(batch.num_rows(), 3);
        assert!(matches!(
            schema.field_with_name("scores")?.data_type(),
            DataType::List(item) if item.data_type() == &DataType::Int64
        ));
        assert!(matches!(
            schema.field_with_name("tags")?.data_type(),
            DataType::List(item) if item.data_type() == &DataType::Utf8
        ));
        assert_eq!(
            schema.field_with_name("created_at")?.data_type(),
            &DataType::Timestamp(TimeUnit::Second, None)
        );
        assert_eq!(schema.field_with_name("profile")?.data_type(), &DataType::Utf8);
        Ok(())
    }

    #[test]
    fn test_vector_table_embedding_is_fixed_size() -> Result<()> {
        let batch = to_record_batch(&definition(DatasetId::Vector)?)?;
        let embedding = batch.column_by_name("embedding").unwrap();
        assert!(matches!(
            embedding.data_type(),
            DataType::FixedSizeList(item, 4) if item.data_type() == &DataType::Float32
        ));
        assert_eq!(embedding.len(), 5);
        Ok(())
    }

    #[test]
    fn test_dates_are_days_since_epoch() -> Result<()> {
        let batch = to_record_batch(&definition(DatasetId::Simple)?)?;
        let dates = batch
            .column_by_name("hire_date")
            .unwrap()
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        // 2020-01-15
        assert_eq!(dates.value(0), 18_276);
        Ok(())
    }

    #[tokio::test]
    async fn test_overwrite_replaces_previous_dataset() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("simple_table");
        let def = definition(DatasetId::Simple)?;
        let sink = LanceDatasetSink::new();

        sink.write_overwrite(&path, &def).await?;
        sink.write_overwrite(&path, &def).await?;

        let dataset = Dataset::open(path.to_str().unwrap()).await?;
        assert_eq!(dataset.count_rows(None).await?, 5);
        assert!(dataset.version().version >= 2);
        Ok(())
    }
}
