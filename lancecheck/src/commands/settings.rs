// lancecheck/src/commands/settings.rs
//
// Configuration layering shared by the subcommands:
// YAML file -> LANCECHECK_* environment -> CLI flags.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

use lancecheck_core::domain::verification::TestMatrix;
use lancecheck_core::infrastructure::adapters::{NativeLanceConnector, PostgresConnector};
use lancecheck_core::infrastructure::config::{Backend, RunConfig, load_run_config, load_test_matrix};
use lancecheck_core::ports::connector::QueryConnector;

use crate::cli::{ConnectionArgs, LocationArgs};

pub fn resolve(
    config_path: Option<&Path>,
    locations: &LocationArgs,
    connection: Option<&ConnectionArgs>,
) -> anyhow::Result<RunConfig> {
    let mut config = load_run_config(config_path, Path::new("."))
        .context("Failed to load run configuration")?;

    apply_location_flags(&mut config, locations);
    if let Some(connection) = connection {
        apply_connection_flags(&mut config, connection);
    }
    config.check().context("Invalid run configuration")?;

    info!(
        backend = %config.backend,
        storage_root = ?config.storage_root,
        query_prefix = ?config.query_prefix,
        "Run configuration resolved"
    );
    Ok(config)
}

fn apply_location_flags(config: &mut RunConfig, args: &LocationArgs) {
    if let Some(root) = &args.storage_root {
        config.storage_root = root.clone();
    }
    if let Some(prefix) = &args.query_prefix {
        config.query_prefix = Some(prefix.clone());
    }
}

fn apply_connection_flags(config: &mut RunConfig, args: &ConnectionArgs) {
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    let pg = &mut config.postgres;
    if let Some(host) = &args.db_host {
        pg.host = host.clone();
    }
    if let Some(port) = args.db_port {
        pg.port = port;
    }
    if let Some(dbname) = &args.db_name {
        pg.dbname = dbname.clone();
    }
    if let Some(user) = &args.db_user {
        pg.user = user.clone();
    }
    if let Some(password) = &args.db_password {
        pg.password = password.clone();
    }
    if let Some(url) = &args.database_url {
        pg.url = Some(url.clone());
    }
}

/// The `--matrix` flag wins over `matrix_path` from the configuration file.
pub fn load_matrix(flag: Option<&PathBuf>, config: &RunConfig) -> anyhow::Result<TestMatrix> {
    match flag.or(config.matrix_path.as_ref()) {
        Some(path) => load_test_matrix(path)
            .with_context(|| format!("Failed to load test matrix from {:?}", path)),
        None => Ok(TestMatrix::builtin()),
    }
}

pub fn connector(config: &RunConfig) -> Box<dyn QueryConnector> {
    match config.backend {
        Backend::Postgres => {
            println!(
                "   Backend: PostgreSQL (pglance) 🐘 {}:{}",
                config.postgres.host, config.postgres.port
            );
            Box::new(PostgresConnector::new(config.postgres.clone()))
        }
        Backend::Native => {
            println!("   Backend: native Lance reader 🏹");
            Box::new(NativeLanceConnector)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = RunConfig::default();
        apply_location_flags(
            &mut config,
            &LocationArgs {
                storage_root: Some(PathBuf::from("/data")),
                query_prefix: None,
            },
        );
        apply_connection_flags(
            &mut config,
            &ConnectionArgs {
                backend: Some(Backend::Native),
                db_port: Some(6000),
                ..Default::default()
            },
        );

        assert_eq!(config.storage_root, PathBuf::from("/data"));
        assert_eq!(config.query_prefix, None);
        assert_eq!(config.backend, Backend::Native);
        assert_eq!(config.postgres.port, 6000);
        assert_eq!(config.postgres.host, "localhost");
    }

    #[test]
    fn test_builtin_matrix_without_file() -> anyhow::Result<()> {
        let matrix = load_matrix(None, &RunConfig::default())?;
        assert_eq!(matrix, TestMatrix::builtin());
        Ok(())
    }
}
