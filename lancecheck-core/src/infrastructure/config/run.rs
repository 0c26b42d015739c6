// lancecheck-core/src/infrastructure/config/run.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::dataset::DatasetLocations;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["lancecheck.yaml", "lancecheck.yml"];

/// Path prefix the pglance server sees the datasets under (container mount).
pub const CONTAINER_QUERY_PREFIX: &str = "/test_data_in_container";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Postgres,
    Native,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Postgres => write!(f, "postgres"),
            Backend::Native => write!(f, "native"),
        }
    }
}

impl FromStr for Backend {
    type Err = InfrastructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pglance" => Ok(Backend::Postgres),
            "native" | "lance" => Ok(Backend::Native),
            other => Err(InfrastructureError::ConfigError(format!(
                "unknown backend '{other}' (expected 'postgres' or 'native')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PostgresSettings {
    #[validate(length(min = 1, message = "host cannot be empty"))]
    pub host: String,
    #[validate(range(min = 1, message = "port must be positive"))]
    pub port: u16,
    #[validate(length(min = 1, message = "dbname cannot be empty"))]
    pub dbname: String,
    #[validate(length(min = 1, message = "user cannot be empty"))]
    pub user: String,
    pub password: String,
    /// Takes precedence over the individual fields when set.
    pub url: Option<String>,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            dbname: "postgres".into(),
            user: "postgres".into(),
            password: "postgres".into(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RunConfig {
    pub storage_root: PathBuf,
    /// Defaults per backend, see [`RunConfig::locations`].
    pub query_prefix: Option<String>,
    pub backend: Backend,
    #[validate(nested)]
    pub postgres: PostgresSettings,
    /// YAML test matrix replacing the built-in one.
    pub matrix_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("./lance_test_data"),
            query_prefix: None,
            backend: Backend::default(),
            postgres: PostgresSettings::default(),
            matrix_path: None,
        }
    }
}

impl RunConfig {
    pub fn locations(&self) -> DatasetLocations {
        match (&self.query_prefix, self.backend) {
            (Some(prefix), _) => DatasetLocations::new(&self.storage_root, prefix.as_str()),
            (None, Backend::Postgres) => {
                DatasetLocations::new(&self.storage_root, CONTAINER_QUERY_PREFIX)
            }
            (None, Backend::Native) => DatasetLocations::local(&self.storage_root),
        }
    }

    pub fn check(&self) -> Result<(), InfrastructureError> {
        self.validate()
            .map_err(|e| InfrastructureError::ConfigError(e.to_string()))
    }
}

/// Loads the run configuration: explicit file, else a `lancecheck.yaml`
/// found in `dir`, else defaults. Environment overrides apply last.
#[instrument(skip(dir))]
pub fn load_run_config(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<RunConfig, InfrastructureError> {
    let path = match explicit {
        Some(p) if !p.exists() => {
            return Err(InfrastructureError::ConfigNotFound(p.display().to_string()));
        }
        Some(p) => Some(p.to_path_buf()),
        None => find_main_config(dir),
    };

    let mut config = match &path {
        Some(p) => {
            info!(path = ?p, "Loading run configuration");
            let content = fs::read_to_string(p)?;
            serde_yaml::from_str::<RunConfig>(&content)?
        }
        None => RunConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.check()?;
    Ok(config)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

pub fn apply_env_overrides(config: &mut RunConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(val) = env("LANCECHECK_STORAGE_ROOT") {
        info!(old = ?config.storage_root, new = ?val, "Overriding storage root via ENV");
        config.storage_root = PathBuf::from(val);
    }
    if let Some(val) = env("LANCECHECK_QUERY_PREFIX") {
        info!(old = ?config.query_prefix, new = ?val, "Overriding query prefix via ENV");
        config.query_prefix = Some(val);
    }
    if let Some(val) = env("LANCECHECK_DATABASE_URL") {
        info!("Overriding database url via ENV");
        config.postgres.url = Some(val);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::DatasetId;
    use anyhow::Result;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_target_the_container_mount() {
        let config = RunConfig::default();
        let locations = config.locations();
        assert_eq!(
            locations.storage_path(DatasetId::Simple),
            PathBuf::from("./lance_test_data/simple_table")
        );
        assert_eq!(
            locations.query_path(DatasetId::Simple),
            "/test_data_in_container/simple_table"
        );
    }

    #[test]
    fn test_native_backend_queries_the_storage_root() {
        let config = RunConfig {
            backend: Backend::Native,
            storage_root: PathBuf::from("/data/lance"),
            ..RunConfig::default()
        };
        assert_eq!(
            config.locations().query_path(DatasetId::Large),
            "/data/lance/large_table"
        );
    }

    #[test]
    fn test_explicit_prefix_wins_for_any_backend() {
        let config = RunConfig {
            backend: Backend::Native,
            query_prefix: Some("/mnt/shared".into()),
            ..RunConfig::default()
        };
        assert_eq!(
            config.locations().query_path(DatasetId::Vector),
            "/mnt/shared/vector_table"
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<()> {
        let yaml = r#"
backend: native
postgres:
  port: 6543
"#;
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.backend, Backend::Native);
        assert_eq!(config.postgres.port, 6543);
        assert_eq!(config.postgres.host, "localhost");
        assert_eq!(config.storage_root, PathBuf::from("./lance_test_data"));
        Ok(())
    }

    #[test]
    fn test_load_finds_config_in_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("lancecheck.yaml"),
            "storage_root: /tmp/lance\nquery_prefix: /in_container\n",
        )?;

        let config = load_run_config(None, dir.path())?;
        assert_eq!(config.storage_root, PathBuf::from("/tmp/lance"));
        assert_eq!(config.query_prefix.as_deref(), Some("/in_container"));
        Ok(())
    }

    #[test]
    fn test_load_without_file_uses_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = load_run_config(None, dir.path())?;
        assert_eq!(config.backend, Backend::Postgres);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            load_run_config(Some(&missing), dir.path()),
            Err(InfrastructureError::ConfigNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_settings_are_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "postgres:\n  host: ''\n")?;
        assert!(matches!(
            load_run_config(Some(&path), dir.path()),
            Err(InfrastructureError::ConfigError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LANCECHECK_STORAGE_ROOT", "/srv/data"),
            ("LANCECHECK_DATABASE_URL", "postgresql://u@h/db"),
        ]);
        let mut config = RunConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.storage_root, PathBuf::from("/srv/data"));
        assert_eq!(config.postgres.url.as_deref(), Some("postgresql://u@h/db"));
        assert_eq!(config.query_prefix, None);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("native".parse::<Backend>().unwrap(), Backend::Native);
        assert_eq!("PostgreSQL".parse::<Backend>().unwrap(), Backend::Postgres);
        assert!("duckdb".parse::<Backend>().is_err());
    }
}
