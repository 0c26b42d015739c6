// lancecheck-core/src/application/harness.rs

use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::domain::dataset::{DatasetId, DatasetLocations};
use crate::domain::encoding::decode_field;
use crate::domain::error::DomainError;
use crate::domain::verification::{
    AggregateReport, CheckKind, CheckResult, DatasetOutcome, TestConfiguration, TestMatrix,
};
use crate::error::CheckError;
use crate::ports::connector::{ColumnSchema, QueryInterface, TableStats};

/// Runs the schema, statistics and scan checks against a connected
/// interface. Checks never fail past this boundary: interface errors become
/// failed results.
pub struct VerificationHarness<'a> {
    interface: &'a dyn QueryInterface,
    matrix: &'a TestMatrix,
    locations: &'a DatasetLocations,
}

impl<'a> VerificationHarness<'a> {
    pub fn new(
        interface: &'a dyn QueryInterface,
        matrix: &'a TestMatrix,
        locations: &'a DatasetLocations,
    ) -> Self {
        Self {
            interface,
            matrix,
            locations,
        }
    }

    fn config(&self, id: DatasetId) -> Result<&'a TestConfiguration, CheckError> {
        self.matrix
            .get(id)
            .ok_or_else(|| DomainError::UnknownDataset(id.name().to_string()).into())
    }

    pub async fn check_schema(&self, id: DatasetId, config: &TestConfiguration) -> CheckResult {
        let path = self.locations.query_path(id);
        let result = match self.interface.table_info(&path).await {
            Ok(columns) => evaluate_schema(&columns, config),
            Err(e) => CheckResult::errored(CheckKind::Schema, e),
        };
        log_check(id, &path, &result);
        result
    }

    pub async fn check_statistics(
        &self,
        id: DatasetId,
        config: &TestConfiguration,
    ) -> CheckResult {
        let path = self.locations.query_path(id);
        let result = match self.interface.table_stats(&path).await {
            Ok(stats) => evaluate_statistics(&stats, config),
            Err(e) => CheckResult::errored(CheckKind::Statistics, e),
        };
        log_check(id, &path, &result);
        result
    }

    pub async fn check_scan(&self, id: DatasetId, config: &TestConfiguration) -> CheckResult {
        let path = self.locations.query_path(id);
        let result = match self.interface.scan_rows(&path, config.scan_limit).await {
            Ok(rows) => evaluate_scan(&rows, config),
            Err(e) => CheckResult::errored(CheckKind::Scan, e),
        };
        log_check(id, &path, &result);
        result
    }

    /// All three checks, each run regardless of the others.
    pub async fn verify_dataset(&self, id: DatasetId) -> Result<DatasetOutcome, CheckError> {
        let config = self.config(id)?;
        println!("🔍 Verifying {}", id);

        let schema = self.check_schema(id, config).await;
        let statistics = self.check_statistics(id, config).await;
        let scan = self.check_scan(id, config).await;

        let outcome = DatasetOutcome {
            dataset: id,
            query_path: self.locations.query_path(id),
            schema,
            statistics,
            scan,
        };
        for check in outcome.checks() {
            let icon = if check.passed { "✅" } else { "❌" };
            println!("    {} {}: {}", icon, check.kind, check.detail);
        }
        Ok(outcome)
    }

    /// One outcome per configured dataset, in matrix order.
    pub async fn verify_all(&self) -> Result<AggregateReport, CheckError> {
        let mut outcomes = Vec::with_capacity(self.matrix.len());
        for id in self.matrix.ids() {
            outcomes.push(self.verify_dataset(id).await?);
        }
        Ok(AggregateReport::new(outcomes))
    }
}

fn log_check(id: DatasetId, path: &str, result: &CheckResult) {
    if result.passed {
        info!(dataset = %id, path, check = %result.kind, detail = %result.detail, "check passed");
    } else {
        warn!(
            dataset = %id,
            path,
            check = %result.kind,
            detail = %result.detail,
            diagnostic = result.diagnostic.as_deref().unwrap_or(""),
            "check failed"
        );
    }
}

// --- ASSERTIONS ---

/// Expected columns must be a subset of the reported ones. Type labels are
/// not compared.
pub fn evaluate_schema(columns: &[ColumnSchema], config: &TestConfiguration) -> CheckResult {
    if columns.is_empty() && !config.expected_columns.is_empty() {
        return CheckResult::fail(CheckKind::Schema, "no schema rows returned");
    }

    let actual: HashSet<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let missing: Vec<&str> = config
        .expected_columns
        .iter()
        .map(String::as_str)
        .filter(|name| !actual.contains(name))
        .collect();

    if missing.is_empty() {
        CheckResult::pass(
            CheckKind::Schema,
            format!(
                "{} columns reported, {} expected present",
                columns.len(),
                config.expected_columns.len()
            ),
        )
    } else {
        CheckResult::fail(
            CheckKind::Schema,
            format!("missing columns: {}", missing.join(", ")),
        )
    }
}

/// Row count lower bound and a non-empty schema. The version is reported only.
pub fn evaluate_statistics(stats: &TableStats, config: &TestConfiguration) -> CheckResult {
    let summary = format!(
        "version {}, {} rows, {} columns",
        stats.version, stats.num_rows, stats.num_columns
    );

    let enough_rows = u64::try_from(stats.num_rows).is_ok_and(|n| n >= config.expected_min_rows);
    if !enough_rows {
        return CheckResult::fail(
            CheckKind::Statistics,
            format!(
                "{summary}: expected at least {} rows",
                config.expected_min_rows
            ),
        );
    }
    if stats.num_columns <= 0 {
        return CheckResult::fail(CheckKind::Statistics, format!("{summary}: no columns"));
    }
    CheckResult::pass(CheckKind::Statistics, summary)
}

/// Bounded by the limit, first row carries every expected field, encoded
/// fields in the first row decode into records.
pub fn evaluate_scan(rows: &[Value], config: &TestConfiguration) -> CheckResult {
    let limit = config.scan_limit as usize;
    if rows.is_empty() {
        return CheckResult::fail(CheckKind::Scan, "no rows returned");
    }
    if rows.len() > limit {
        return CheckResult::fail(
            CheckKind::Scan,
            format!("{} rows returned for limit {limit}", rows.len()),
        );
    }

    let first = match decode_field(&rows[0]) {
        Ok(record) => record,
        Err(e) => {
            return CheckResult {
                diagnostic: Some(e.to_string()),
                ..CheckResult::fail(CheckKind::Scan, "first row is not a structured record")
            };
        }
    };

    let missing: Vec<&str> = config
        .expected_columns
        .iter()
        .map(String::as_str)
        .filter(|field| !first.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return CheckResult::fail(
            CheckKind::Scan,
            format!("first row lacks fields: {}", missing.join(", ")),
        );
    }

    for field in &config.encoded_fields {
        let Some(value) = first.get(field) else {
            return CheckResult::fail(
                CheckKind::Scan,
                format!("first row lacks encoded field '{field}'"),
            );
        };
        if let Err(e) = decode_field(value) {
            return CheckResult {
                diagnostic: Some(e.to_string()),
                ..CheckResult::fail(
                    CheckKind::Scan,
                    format!("encoded field '{field}' does not decode into a record"),
                )
            };
        }
    }

    CheckResult::pass(
        CheckKind::Scan,
        format!("{} rows returned (limit {limit})", rows.len()),
    )
}
