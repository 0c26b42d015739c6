// lancecheck-core/src/domain/verification/expectation.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

use crate::domain::dataset::DatasetId;
use crate::domain::error::DomainError;

/// Expectations for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_encoded_fields"))]
pub struct TestConfiguration {
    /// Must be a subset of the reported columns; extra columns are tolerated.
    #[serde(default)]
    pub expected_columns: Vec<String>,

    #[serde(default)]
    pub expected_min_rows: u64,

    #[validate(range(min = 1, message = "scan_limit must be a positive integer"))]
    #[serde(default = "default_scan_limit")]
    pub scan_limit: u32,

    /// Columns stored as encoded record text.
    #[serde(default)]
    pub encoded_fields: Vec<String>,
}

fn default_scan_limit() -> u32 {
    5
}

fn validate_encoded_fields(config: &TestConfiguration) -> Result<(), ValidationError> {
    if config
        .encoded_fields
        .iter()
        .all(|f| config.expected_columns.contains(f))
    {
        Ok(())
    } else {
        Err(ValidationError::new("encoded_fields_not_expected")
            .with_message("every encoded field must also be an expected column".into()))
    }
}

impl TestConfiguration {
    pub fn new(expected_columns: &[&str], expected_min_rows: u64, scan_limit: u32) -> Self {
        Self {
            expected_columns: expected_columns.iter().map(|s| s.to_string()).collect(),
            expected_min_rows,
            scan_limit,
            encoded_fields: Vec::new(),
        }
    }

    pub fn with_encoded_fields(mut self, fields: &[&str]) -> Self {
        self.encoded_fields = fields.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Immutable expectation table, iterated in matrix order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestMatrix {
    datasets: BTreeMap<DatasetId, TestConfiguration>,
}

impl TestMatrix {
    pub fn new(
        entries: impl IntoIterator<Item = (DatasetId, TestConfiguration)>,
    ) -> Result<Self, DomainError> {
        let matrix = Self {
            datasets: entries.into_iter().collect(),
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Expectations for the reference datasets.
    pub fn builtin() -> Self {
        let datasets = BTreeMap::from([
            (
                DatasetId::Simple,
                TestConfiguration::new(
                    &["id", "name", "age", "salary", "is_active", "hire_date"],
                    5,
                    5,
                ),
            ),
            (
                DatasetId::Vector,
                TestConfiguration::new(&["id", "document", "embedding", "metadata"], 5, 3)
                    .with_encoded_fields(&["metadata"]),
            ),
            (
                DatasetId::Complex,
                TestConfiguration::new(
                    &["id", "user_name", "scores", "profile", "tags", "created_at"],
                    3,
                    3,
                )
                .with_encoded_fields(&["profile"]),
            ),
            (
                DatasetId::Large,
                TestConfiguration::new(&["id", "value", "category", "flag"], 1000, 10),
            ),
        ]);
        Self { datasets }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (id, config) in &self.datasets {
            config
                .validate()
                .map_err(|e| DomainError::InvalidTestConfig(format!("{id}: {e}")))?;
        }
        Ok(())
    }

    pub fn get(&self, id: DatasetId) -> Option<&TestConfiguration> {
        self.datasets.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DatasetId, &TestConfiguration)> {
        self.datasets.iter().map(|(id, config)| (*id, config))
    }

    pub fn ids(&self) -> Vec<DatasetId> {
        self.datasets.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Default for TestMatrix {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::definition;

    #[test]
    fn test_builtin_matrix_is_valid_and_ordered() -> Result<(), DomainError> {
        let matrix = TestMatrix::builtin();
        matrix.validate()?;
        assert_eq!(matrix.ids(), DatasetId::ALL.to_vec());
        Ok(())
    }

    #[test]
    fn test_builtin_expectations_match_generated_columns() -> Result<(), DomainError> {
        for (id, config) in TestMatrix::builtin().iter() {
            let def = definition(id)?;
            let names = def.column_names();
            for expected in &config.expected_columns {
                assert!(names.contains(expected), "{id} lacks {expected}");
            }
            assert_eq!(config.expected_min_rows, def.row_count() as u64);
            assert_eq!(config.encoded_fields, def.encoded_columns());
        }
        Ok(())
    }

    #[test]
    fn test_zero_scan_limit_is_rejected() {
        let result = TestMatrix::new([(DatasetId::Simple, TestConfiguration::new(&["id"], 1, 0))]);
        assert!(matches!(result, Err(DomainError::InvalidTestConfig(_))));
    }

    #[test]
    fn test_encoded_field_must_be_expected() {
        let config = TestConfiguration::new(&["id"], 1, 1).with_encoded_fields(&["profile"]);
        let result = TestMatrix::new([(DatasetId::Complex, config)]);
        assert!(matches!(result, Err(DomainError::InvalidTestConfig(_))));
    }
}
