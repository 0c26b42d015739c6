// lancecheck/src/commands/generate.rs
//
// USE CASE: Write the reference datasets, nothing else.

use anyhow::Context;
use std::path::Path;

use lancecheck_core::application::DatasetGenerator;
use lancecheck_core::infrastructure::adapters::LanceDatasetSink;

use crate::cli::LocationArgs;
use crate::commands::settings;

pub async fn execute(config_path: Option<&Path>, locations: LocationArgs) -> anyhow::Result<()> {
    let config = settings::resolve(config_path, &locations, None)?;
    let locations = config.locations();

    let sink = LanceDatasetSink::new();
    let created = DatasetGenerator::new(&sink, &locations)
        .generate_all()
        .await
        .context("Dataset generation failed")?;

    println!("✨ {} datasets written to {:?}", created.len(), locations.storage_root());
    Ok(())
}
