// lancecheck-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts with the outside world: dataset storage and the query interface.
pub mod ports;

// 2. Domain
// Dataset matrix, type regions, record encoding, expectations, check results.
// Depends on nothing else (neither infra nor app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Lance writer/reader, PostgreSQL (pglance), YAML configuration.
pub mod infrastructure;

// 4. Application (Use Cases)
// Generation, verification harness, orchestration, reporting.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use lancecheck_core::CheckError;
pub use error::CheckError;
