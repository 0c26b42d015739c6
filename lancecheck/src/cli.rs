// lancecheck/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use lancecheck_core::infrastructure::config::Backend;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lancecheck")]
#[command(about = "End-to-end checks for querying Lance datasets through pglance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Run configuration file (default: ./lancecheck.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where datasets are written and where the query interface reads them.
#[derive(Args, Debug, Default, Clone)]
pub struct LocationArgs {
    /// Directory the datasets are written to
    #[arg(long)]
    pub storage_root: Option<PathBuf>,

    /// Path prefix the query interface sees the datasets under
    #[arg(long)]
    pub query_prefix: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Query interface: postgres | native
    #[arg(long, env = "LANCECHECK_BACKEND", value_parser = parse_backend)]
    pub backend: Option<Backend>,

    #[arg(long)]
    pub db_host: Option<String>,

    #[arg(long)]
    pub db_port: Option<u16>,

    #[arg(long)]
    pub db_name: Option<String>,

    #[arg(long)]
    pub db_user: Option<String>,

    #[arg(long)]
    pub db_password: Option<String>,

    /// Full connection string, overrides the --db-* flags
    #[arg(long)]
    pub database_url: Option<String>,
}

fn parse_backend(value: &str) -> Result<Backend, String> {
    value.parse::<Backend>().map_err(|e| e.to_string())
}

#[derive(Args, Debug, Default, Clone)]
pub struct VerifyArgs {
    /// YAML test matrix replacing the built-in one
    #[arg(long)]
    pub matrix: Option<PathBuf>,

    /// Also write the report as JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Generates the datasets, then verifies them through the query interface
    Run {
        #[command(flatten)]
        locations: LocationArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        verify: VerifyArgs,
    },

    /// 📦 Generates the reference Lance datasets only
    Generate {
        #[command(flatten)]
        locations: LocationArgs,
    },

    /// 🔍 Verifies datasets already on disk
    Verify {
        #[command(flatten)]
        locations: LocationArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        verify: VerifyArgs,
    },

    /// 📋 Prints the test matrix and its type coverage
    Matrix {
        /// YAML test matrix replacing the built-in one
        #[arg(long)]
        matrix: Option<PathBuf>,
    },
}
