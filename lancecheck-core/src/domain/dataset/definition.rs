// lancecheck-core/src/domain/dataset/definition.rs

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use super::id::DatasetId;
use super::region::TypeRegion;
use crate::domain::error::DomainError;

/// Semantic type of a column, independent of any storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    Int64,
    Float64,
    Utf8,
    Boolean,
    Date,
    /// Second precision, no timezone.
    Timestamp,
    FloatVector { dim: usize },
    Int64List,
    Utf8List,
    /// Nested record stored as canonical JSON text.
    EncodedRecord,
}

/// Deterministic values of one column, one entry per row.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Utf8(Vec<String>),
    Boolean(Vec<bool>),
    Date(Vec<NaiveDate>),
    Timestamp(Vec<NaiveDateTime>),
    FloatVector { dim: usize, rows: Vec<Vec<f32>> },
    Int64List(Vec<Vec<i64>>),
    Utf8List(Vec<Vec<String>>),
    EncodedRecord(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::Utf8(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Date(v) => v.len(),
            ColumnValues::Timestamp(v) => v.len(),
            ColumnValues::FloatVector { rows, .. } => rows.len(),
            ColumnValues::Int64List(v) => v.len(),
            ColumnValues::Utf8List(v) => v.len(),
            ColumnValues::EncodedRecord(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn semantic_type(&self) -> SemanticType {
        match self {
            ColumnValues::Int64(_) => SemanticType::Int64,
            ColumnValues::Float64(_) => SemanticType::Float64,
            ColumnValues::Utf8(_) => SemanticType::Utf8,
            ColumnValues::Boolean(_) => SemanticType::Boolean,
            ColumnValues::Date(_) => SemanticType::Date,
            ColumnValues::Timestamp(_) => SemanticType::Timestamp,
            ColumnValues::FloatVector { dim, .. } => SemanticType::FloatVector { dim: *dim },
            ColumnValues::Int64List(_) => SemanticType::Int64List,
            ColumnValues::Utf8List(_) => SemanticType::Utf8List,
            ColumnValues::EncodedRecord(_) => SemanticType::EncodedRecord,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub nullable: bool,
    pub values: ColumnValues,
}

impl Column {
    pub fn semantic_type(&self) -> SemanticType {
        self.values.semantic_type()
    }
}

/// A named, typed, fully materialized table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDefinition {
    id: DatasetId,
    regions: Vec<TypeRegion>,
    row_count: usize,
    columns: Vec<Column>,
}

impl DatasetDefinition {
    pub fn builder(id: DatasetId, row_count: usize) -> DatasetBuilder {
        DatasetBuilder {
            id,
            row_count,
            regions: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn regions(&self) -> &[TypeRegion] {
        &self.regions
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Columns holding encoded record text.
    pub fn encoded_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.semantic_type() == SemanticType::EncodedRecord)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Checks the definition invariants: unique column names, one value per
    /// row in every column, uniform vector width.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DomainError::DuplicateColumn {
                    dataset: self.name().to_string(),
                    column: column.name.clone(),
                });
            }

            if column.values.len() != self.row_count {
                return Err(DomainError::RowCountMismatch {
                    dataset: self.name().to_string(),
                    column: column.name.clone(),
                    expected: self.row_count,
                    actual: column.values.len(),
                });
            }

            if let ColumnValues::FloatVector { dim, rows } = &column.values
                && let Some((row, values)) = rows.iter().enumerate().find(|(_, v)| v.len() != *dim)
            {
                return Err(DomainError::VectorWidthMismatch {
                    dataset: self.name().to_string(),
                    column: column.name.clone(),
                    row,
                    expected: *dim,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

pub struct DatasetBuilder {
    id: DatasetId,
    row_count: usize,
    regions: Vec<TypeRegion>,
    columns: Vec<Column>,
}

impl DatasetBuilder {
    pub fn regions(mut self, regions: impl IntoIterator<Item = TypeRegion>) -> Self {
        self.regions.extend(regions);
        self
    }

    pub fn column(mut self, name: &str, values: ColumnValues) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            nullable: false,
            values,
        });
        self
    }

    pub fn nullable_column(mut self, name: &str, values: ColumnValues) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            nullable: true,
            values,
        });
        self
    }

    pub fn build(self) -> Result<DatasetDefinition, DomainError> {
        let definition = DatasetDefinition {
            id: self.id,
            regions: self.regions,
            row_count: self.row_count,
            columns: self.columns,
        };
        definition.validate()?;
        Ok(definition)
    }
}
