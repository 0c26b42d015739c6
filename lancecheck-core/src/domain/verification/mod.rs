pub mod expectation;
pub mod outcome;

pub use expectation::{TestConfiguration, TestMatrix};
pub use outcome::{AggregateReport, CheckKind, CheckResult, DatasetOutcome};
