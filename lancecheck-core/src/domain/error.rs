// lancecheck-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Dataset '{dataset}' declares column '{column}' more than once")]
    #[diagnostic(code(lancecheck::domain::duplicate_column))]
    DuplicateColumn { dataset: String, column: String },

    #[error("Dataset '{dataset}': column '{column}' has {actual} values, expected {expected}")]
    #[diagnostic(
        code(lancecheck::domain::row_count),
        help("Every column of a dataset must carry exactly one value per row.")
    )]
    RowCountMismatch {
        dataset: String,
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Dataset '{dataset}': vector column '{column}' row {row} has {actual} elements, expected {expected}")]
    #[diagnostic(code(lancecheck::domain::vector_width))]
    VectorWidthMismatch {
        dataset: String,
        column: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid calendar value in dataset '{dataset}': {value}")]
    #[diagnostic(code(lancecheck::domain::calendar))]
    InvalidCalendarValue { dataset: String, value: String },

    #[error("Unknown dataset '{0}'")]
    #[diagnostic(
        code(lancecheck::domain::unknown_dataset),
        help("Known datasets: simple_table, vector_table, complex_table, large_table.")
    )]
    UnknownDataset(String),

    #[error("Record encoding error: {0}")]
    #[diagnostic(code(lancecheck::domain::encoding))]
    Encoding(#[from] serde_json::Error),

    #[error("Encoded value is not a record: {0}")]
    #[diagnostic(code(lancecheck::domain::not_a_record))]
    NotARecord(String),

    #[error("Invalid test configuration: {0}")]
    #[diagnostic(code(lancecheck::domain::test_config))]
    InvalidTestConfig(String),
}
