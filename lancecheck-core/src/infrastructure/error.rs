// lancecheck-core/src/infrastructure/error.rs

use lance::deps::arrow_schema::ArrowError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("Lance Error: {0}")]
    #[diagnostic(
        code(lancecheck::infra::database::lance),
        help("Check that the dataset path exists and is a valid Lance dataset.")
    )]
    Lance(#[from] lance::Error),

    #[error("Arrow Error: {0}")]
    #[diagnostic(code(lancecheck::infra::database::arrow))]
    Arrow(#[from] ArrowError),

    #[error("PostgreSQL Error: {0}")]
    #[diagnostic(
        code(lancecheck::infra::database::postgres),
        help("Check the connection parameters and that the server is running.")
    )]
    Postgres(#[from] tokio_postgres::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(lancecheck::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(lancecheck::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(lancecheck::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(lancecheck::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid path: {0}")]
    #[diagnostic(code(lancecheck::infra::path))]
    InvalidPath(String),
}

// Shortcuts for `?` on driver calls
impl From<lance::Error> for InfrastructureError {
    fn from(err: lance::Error) -> Self {
        InfrastructureError::Database(DatabaseError::Lance(err))
    }
}

impl From<ArrowError> for InfrastructureError {
    fn from(err: ArrowError) -> Self {
        InfrastructureError::Database(DatabaseError::Arrow(err))
    }
}

impl From<tokio_postgres::Error> for InfrastructureError {
    fn from(err: tokio_postgres::Error) -> Self {
        InfrastructureError::Database(DatabaseError::Postgres(err))
    }
}
