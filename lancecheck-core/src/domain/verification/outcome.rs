// lancecheck-core/src/domain/verification/outcome.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::dataset::DatasetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Schema,
    Statistics,
    Scan,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckKind::Schema => "schema",
            CheckKind::Statistics => "statistics",
            CheckKind::Scan => "scan",
        };
        f.write_str(label)
    }
}

/// Outcome of one check against one dataset. Never retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub passed: bool,
    pub detail: String,
    /// Underlying condition when the interface itself failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl CheckResult {
    pub fn pass(kind: CheckKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            passed: true,
            detail: detail.into(),
            diagnostic: None,
        }
    }

    pub fn fail(kind: CheckKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            passed: false,
            detail: detail.into(),
            diagnostic: None,
        }
    }

    /// Failed check caused by an interface error rather than an assertion.
    pub fn errored(kind: CheckKind, error: impl fmt::Display) -> Self {
        Self {
            kind,
            passed: false,
            detail: format!("{kind} query failed"),
            diagnostic: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOutcome {
    pub dataset: DatasetId,
    pub query_path: String,
    pub schema: CheckResult,
    pub statistics: CheckResult,
    pub scan: CheckResult,
}

impl DatasetOutcome {
    /// Logical AND of the three checks.
    pub fn passed(&self) -> bool {
        self.schema.passed && self.statistics.passed && self.scan.passed
    }

    pub fn checks(&self) -> [&CheckResult; 3] {
        [&self.schema, &self.statistics, &self.scan]
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks().into_iter().filter(|c| !c.passed)
    }
}

/// Per-dataset results of one run, in matrix order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub outcomes: Vec<DatasetOutcome>,
}

impl AggregateReport {
    pub fn new(outcomes: Vec<DatasetOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed_count() == self.total()
    }

    pub fn get(&self, dataset: DatasetId) -> Option<&DatasetOutcome> {
        self.outcomes.iter().find(|o| o.dataset == dataset)
    }

    /// Process exit status: 0 only if every dataset passed.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() { 0 } else { 1 }
    }
}
