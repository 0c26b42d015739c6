// lancecheck/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug lancecheck run ... for the details
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            locations,
            connection,
            verify,
        } => commands::run::execute(config, locations, connection, verify).await,
        Commands::Generate { locations } => commands::generate::execute(config, locations).await,
        Commands::Verify {
            locations,
            connection,
            verify,
        } => commands::verify::execute(config, locations, connection, verify).await,
        Commands::Matrix { matrix } => commands::matrix::execute(config, matrix),
    }
}
