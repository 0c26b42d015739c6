// lancecheck/src/commands/run.rs
//
// USE CASE: Generate the datasets, then verify them end to end.

use std::path::Path;

use lancecheck_core::application::run_suite;
use lancecheck_core::infrastructure::adapters::LanceDatasetSink;

use crate::cli::{ConnectionArgs, LocationArgs, VerifyArgs};
use crate::commands::{settings, verify};

pub async fn execute(
    config_path: Option<&Path>,
    locations: LocationArgs,
    connection: ConnectionArgs,
    args: VerifyArgs,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    println!("⚙️  Loading configuration...");
    let config = settings::resolve(config_path, &locations, Some(&connection))?;
    let matrix = settings::load_matrix(args.matrix.as_ref(), &config)?;
    let locations = config.locations();
    println!(
        "   Storage root: {:?} | Query prefix: {}",
        locations.storage_root(),
        locations.query_prefix()
    );

    let sink = LanceDatasetSink::new();
    let connector = settings::connector(&config);

    let result = run_suite(&sink, connector.as_ref(), &matrix, &locations).await;
    verify::finish(result, args.report_json.as_deref(), start)
}
