// lancecheck/src/commands/matrix.rs
//
// USE CASE: Show what is generated and what each dataset is checked for.

use std::path::{Path, PathBuf};

use lancecheck_core::application::render_matrix;

use crate::cli::LocationArgs;
use crate::commands::settings;

pub fn execute(config_path: Option<&Path>, matrix: Option<PathBuf>) -> anyhow::Result<()> {
    let config = settings::resolve(config_path, &LocationArgs::default(), None)?;
    let matrix = settings::load_matrix(matrix.as_ref(), &config)?;
    println!("{}", render_matrix(&matrix)?);
    Ok(())
}
