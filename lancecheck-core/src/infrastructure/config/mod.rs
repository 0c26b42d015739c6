pub mod matrix;
pub mod run;

pub use matrix::{load_test_matrix, parse_test_matrix};
pub use run::{Backend, PostgresSettings, RunConfig, load_run_config};
