pub mod dataset;
pub mod encoding;
pub mod error;
pub mod verification;

// Re-exports to simplify imports elsewhere
pub use dataset::{DatasetDefinition, DatasetId, TypeRegion};
pub use error::DomainError;
pub use verification::{AggregateReport, CheckKind, CheckResult, TestConfiguration, TestMatrix};
