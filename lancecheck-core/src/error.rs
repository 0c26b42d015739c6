// lancecheck-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CheckError {
    // --- DOMAIN ERRORS (matrix invariants, encoding, configuration) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (Lance, PostgreSQL, IO, YAML) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- QUERY INTERFACE CONTRACT ---
    #[error("Query interface returned no rows for '{0}'")]
    #[diagnostic(code(lancecheck::interface::empty))]
    EmptyResult(String),

    #[error("Malformed result from query interface: {0}")]
    #[diagnostic(code(lancecheck::interface::malformed))]
    MalformedResult(String),

    #[error("Liveness probe failed: expected '{expected}', got '{actual}'")]
    #[diagnostic(
        code(lancecheck::interface::probe),
        help("Is the pglance extension installed in the target database?")
    )]
    ProbeMismatch { expected: String, actual: String },

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        CheckError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<lance::Error> for CheckError {
    fn from(err: lance::Error) -> Self {
        CheckError::Infrastructure(err.into())
    }
}

impl From<tokio_postgres::Error> for CheckError {
    fn from(err: tokio_postgres::Error) -> Self {
        CheckError::Infrastructure(err.into())
    }
}
