// lancecheck-core/src/infrastructure/config/matrix.rs

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::verification::TestMatrix;
use crate::error::CheckError;
use crate::infrastructure::error::InfrastructureError;

/// Reads a test matrix file:
///
/// ```yaml
/// datasets:
///   simple_table:
///     expected_columns: [id, name]
///     expected_min_rows: 5
///     scan_limit: 5
/// ```
///
/// Unknown dataset names fail deserialization.
#[instrument]
pub fn load_test_matrix(path: &Path) -> Result<TestMatrix, CheckError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(path.display().to_string()).into());
    }
    let content = fs::read_to_string(path)?;
    let matrix = parse_test_matrix(&content)?;
    info!(datasets = matrix.len(), "Test matrix loaded");
    Ok(matrix)
}

pub fn parse_test_matrix(content: &str) -> Result<TestMatrix, CheckError> {
    let matrix: TestMatrix =
        serde_yaml::from_str(content).map_err(InfrastructureError::YamlError)?;
    if matrix.is_empty() {
        return Err(DomainError::InvalidTestConfig("test matrix has no datasets".into()).into());
    }
    matrix.validate()?;
    Ok(matrix)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::DatasetId;
    use anyhow::Result;

    #[test]
    fn test_parse_partial_matrix() -> Result<()> {
        let yaml = r#"
datasets:
  large_table:
    expected_columns: [id, category]
    expected_min_rows: 1000
    scan_limit: 10
  complex_table:
    expected_columns: [id, profile]
    expected_min_rows: 3
    encoded_fields: [profile]
"#;
        let matrix = parse_test_matrix(yaml)?;
        // Iteration follows dataset order, not file order.
        assert_eq!(matrix.ids(), vec![DatasetId::Complex, DatasetId::Large]);
        let complex = matrix.get(DatasetId::Complex).unwrap();
        assert_eq!(complex.scan_limit, 5);
        assert_eq!(complex.encoded_fields, vec!["profile".to_string()]);
        Ok(())
    }

    #[test]
    fn test_unknown_dataset_is_rejected() {
        let yaml = "datasets:\n  orders_table:\n    expected_columns: [id]\n";
        assert!(matches!(
            parse_test_matrix(yaml),
            Err(CheckError::Infrastructure(InfrastructureError::YamlError(_)))
        ));
    }

    #[test]
    fn test_zero_scan_limit_is_rejected() {
        let yaml = "datasets:\n  simple_table:\n    expected_columns: [id]\n    scan_limit: 0\n";
        assert!(matches!(
            parse_test_matrix(yaml),
            Err(CheckError::Domain(DomainError::InvalidTestConfig(_)))
        ));
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        assert!(parse_test_matrix("datasets: {}\n").is_err());
    }

    #[test]
    fn test_builtin_matrix_survives_yaml() -> Result<()> {
        let yaml = serde_yaml::to_string(&TestMatrix::builtin())?;
        assert_eq!(parse_test_matrix(&yaml)?, TestMatrix::builtin());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = load_test_matrix(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(
            result,
            Err(CheckError::Infrastructure(InfrastructureError::ConfigNotFound(_)))
        ));
    }
}
