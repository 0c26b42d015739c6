// lancecheck-core/src/application/mod.rs

pub mod generator;
pub mod harness;
pub mod orchestrator;
pub mod report;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use lancecheck_core::application::{run_suite, render_report};`

pub use generator::DatasetGenerator;
pub use harness::{VerificationHarness, evaluate_scan, evaluate_schema, evaluate_statistics};
pub use orchestrator::{run_suite, verify_existing};
pub use report::{render_matrix, render_report};
