// lancecheck/src/commands/verify.rs
//
// USE CASE: Verify datasets that are already on disk.

use anyhow::Context;
use std::path::Path;
use std::time::Instant;

use lancecheck_core::CheckError;
use lancecheck_core::application::{render_report, verify_existing};
use lancecheck_core::domain::verification::AggregateReport;
use lancecheck_core::infrastructure::fs::write_json_report;

use crate::cli::{ConnectionArgs, LocationArgs, VerifyArgs};
use crate::commands::settings;

pub async fn execute(
    config_path: Option<&Path>,
    locations: LocationArgs,
    connection: ConnectionArgs,
    args: VerifyArgs,
) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = settings::resolve(config_path, &locations, Some(&connection))?;
    let matrix = settings::load_matrix(args.matrix.as_ref(), &config)?;
    let locations = config.locations();
    let connector = settings::connector(&config);

    let result = verify_existing(connector.as_ref(), &matrix, &locations).await;
    finish(result, args.report_json.as_deref(), start)
}

/// Prints the report and exits non-zero unless every dataset passed.
pub fn finish(
    result: Result<AggregateReport, CheckError>,
    report_json: Option<&Path>,
    start: Instant,
) -> anyhow::Result<()> {
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("\n💥 CRITICAL ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n{}", render_report(&report));

    if let Some(path) = report_json {
        write_json_report(path, &report)
            .with_context(|| format!("Failed to write JSON report to {:?}", path))?;
    }

    if report.all_passed() {
        println!("\n✨ SUCCESS! All datasets verified in {:.2?}", start.elapsed());
        Ok(())
    } else {
        eprintln!(
            "\n❌ FAILURE. {} of {} datasets failed.",
            report.total() - report.passed_count(),
            report.total()
        );
        std::process::exit(report.exit_code());
    }
}
