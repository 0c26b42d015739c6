// lancecheck-core/src/application/orchestrator.rs

use std::collections::BTreeSet;
use tracing::{error, info, warn};

use crate::application::generator::DatasetGenerator;
use crate::application::harness::VerificationHarness;
use crate::domain::dataset::{DatasetId, DatasetLocations};
use crate::domain::verification::{AggregateReport, TestMatrix};
use crate::error::CheckError;
use crate::ports::connector::{PROBE_GREETING, QueryConnector, QueryInterface};
use crate::ports::storage::DatasetSink;

/// Generate, then verify. Setup failures (materialization, connection,
/// probe) abort with an error and no report.
pub async fn run_suite(
    sink: &dyn DatasetSink,
    connector: &dyn QueryConnector,
    matrix: &TestMatrix,
    locations: &DatasetLocations,
) -> Result<AggregateReport, CheckError> {
    println!("🚀 Starting end-to-end run...");
    let start_time = std::time::Instant::now();

    let generated = DatasetGenerator::new(sink, locations).generate_all().await?;
    warn_on_name_mismatch(&generated, matrix);

    let report = verify_existing(connector, matrix, locations).await?;

    info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        passed = report.passed_count(),
        total = report.total(),
        "Run finished"
    );
    Ok(report)
}

/// Verification phase alone, against datasets already on disk. The
/// connection is closed once opened, whatever happens after.
pub async fn verify_existing(
    connector: &dyn QueryConnector,
    matrix: &TestMatrix,
    locations: &DatasetLocations,
) -> Result<AggregateReport, CheckError> {
    let interface = connector.connect().await?;
    println!("🔌 Connected to {}", interface.engine_name());

    let result = probe_and_verify(interface.as_ref(), matrix, locations).await;

    if let Err(e) = interface.close().await {
        warn!(error = %e, "Failed to close query interface");
    }
    result
}

async fn probe_and_verify(
    interface: &dyn QueryInterface,
    matrix: &TestMatrix,
    locations: &DatasetLocations,
) -> Result<AggregateReport, CheckError> {
    let greeting = interface.probe().await?;
    if greeting != PROBE_GREETING {
        error!(%greeting, "Liveness probe mismatch");
        return Err(CheckError::ProbeMismatch {
            expected: PROBE_GREETING.to_string(),
            actual: greeting,
        });
    }
    println!("👋 {}", greeting);

    VerificationHarness::new(interface, matrix, locations)
        .verify_all()
        .await
}

/// The matrix drives verification; generated names it doesn't know about
/// are never checked, and configured names that weren't generated will fail.
fn warn_on_name_mismatch(generated: &[DatasetId], matrix: &TestMatrix) {
    let generated: BTreeSet<DatasetId> = generated.iter().copied().collect();
    let configured: BTreeSet<DatasetId> = matrix.ids().into_iter().collect();

    for id in generated.difference(&configured) {
        warn!(dataset = %id, "Generated dataset has no test configuration");
    }
    for id in configured.difference(&generated) {
        warn!(dataset = %id, "Configured dataset was not generated");
    }
}
