// lancecheck-core/src/application/report.rs

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

use crate::domain::dataset::{reference_matrix, uncovered_regions};
use crate::domain::verification::{AggregateReport, CheckResult, TestMatrix};
use crate::error::CheckError;

fn status_cell(check: &CheckResult) -> Cell {
    if check.passed {
        Cell::new("PASS").fg(Color::Green)
    } else {
        Cell::new("FAIL").fg(Color::Red)
    }
}

/// One row per dataset, one column per check.
pub fn render_report(report: &AggregateReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Dataset",
        "Schema",
        "Statistics",
        "Scan",
        "Overall",
        "Notes",
    ]);

    for outcome in &report.outcomes {
        let notes: Vec<String> = outcome
            .failures()
            .map(|c| match &c.diagnostic {
                Some(d) => format!("{}: {} ({})", c.kind, c.detail, d),
                None => format!("{}: {}", c.kind, c.detail),
            })
            .collect();
        let overall = if outcome.passed() {
            Cell::new("PASS").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(outcome.dataset),
            status_cell(&outcome.schema),
            status_cell(&outcome.statistics),
            status_cell(&outcome.scan),
            overall,
            Cell::new(notes.join("\n")),
        ]);
    }

    format!(
        "{table}\n{}/{} datasets passed",
        report.passed_count(),
        report.total()
    )
}

/// The test matrix alongside the type regions each dataset exercises.
pub fn render_matrix(matrix: &TestMatrix) -> Result<String, CheckError> {
    let definitions = reference_matrix()?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Dataset",
        "Rows",
        "Expected columns",
        "Min rows",
        "Scan limit",
        "Encoded fields",
        "Type regions",
    ]);

    for (id, config) in matrix.iter() {
        let (rows, regions) = definitions
            .iter()
            .find(|d| d.id() == id)
            .map(|d| {
                let labels: Vec<&str> = d.regions().iter().map(|r| r.label()).collect();
                (d.row_count().to_string(), labels.join(", "))
            })
            .unwrap_or_default();
        table.add_row(vec![
            id.to_string(),
            rows,
            config.expected_columns.join(", "),
            config.expected_min_rows.to_string(),
            config.scan_limit.to_string(),
            config.encoded_fields.join(", "),
            regions,
        ]);
    }

    let uncovered = uncovered_regions(&definitions);
    let coverage = if uncovered.is_empty() {
        "All type regions covered".to_string()
    } else {
        let labels: Vec<&str> = uncovered.iter().map(|r| r.label()).collect();
        format!("Uncovered type regions: {}", labels.join(", "))
    };
    Ok(format!("{table}\n{coverage}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::DatasetId;
    use crate::domain::verification::{CheckKind, DatasetOutcome};

    #[test]
    fn test_report_lists_failures_with_diagnostics() {
        let report = AggregateReport::new(vec![
            DatasetOutcome {
                dataset: DatasetId::Simple,
                query_path: "/q/simple_table".into(),
                schema: CheckResult::pass(CheckKind::Schema, "ok"),
                statistics: CheckResult::pass(CheckKind::Statistics, "ok"),
                scan: CheckResult::pass(CheckKind::Scan, "ok"),
            },
            DatasetOutcome {
                dataset: DatasetId::Vector,
                query_path: "/q/vector_table".into(),
                schema: CheckResult::pass(CheckKind::Schema, "ok"),
                statistics: CheckResult::errored(CheckKind::Statistics, "relation missing"),
                scan: CheckResult::pass(CheckKind::Scan, "ok"),
            },
        ]);

        let text = render_report(&report);
        assert!(text.contains("simple_table"));
        assert!(text.contains("statistics: statistics query failed (relation missing)"));
        assert!(text.ends_with("1/2 datasets passed"));
    }

    #[test]
    fn test_matrix_shows_full_coverage() -> Result<(), CheckError> {
        let text = render_matrix(&TestMatrix::builtin())?;
        assert!(text.contains("large_table"));
        assert!(text.contains("1000"));
        assert!(text.ends_with("All type regions covered"));
        Ok(())
    }
}
