// lancecheck-core/src/infrastructure/adapters/postgres.rs

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{info, instrument, warn};

// Hexagonal imports
use crate::error::CheckError;
use crate::infrastructure::config::PostgresSettings;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{ColumnSchema, QueryConnector, QueryInterface, TableStats};

const CREATE_EXTENSION_SQL: &str = "CREATE EXTENSION IF NOT EXISTS pglance";
const PROBE_SQL: &str = "SELECT hello_pglance()";
const TABLE_INFO_SQL: &str = "SELECT column_name, data_type, nullable FROM lance_table_info($1)";
const TABLE_STATS_SQL: &str = "SELECT version, num_rows, num_columns FROM lance_table_stats($1)";
const SCAN_SQL: &str = "SELECT row_data FROM lance_scan_jsonb($1, $2)";

/// A PostgreSQL session with the pglance extension.
pub struct PostgresInterface {
    client: Mutex<Option<Client>>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

fn session_closed() -> CheckError {
    CheckError::InternalError("PostgreSQL session already closed".into())
}

#[async_trait]
impl QueryInterface for PostgresInterface {
    async fn probe(&self) -> Result<String, CheckError> {
        let guard = self.client.lock().await;
        let client = guard.as_ref().ok_or_else(session_closed)?;

        client.batch_execute(CREATE_EXTENSION_SQL).await?;
        let row = client.query_one(PROBE_SQL, &[]).await?;
        Ok(row.try_get::<_, String>(0)?)
    }

    #[instrument(skip(self))]
    async fn table_info(&self, path: &str) -> Result<Vec<ColumnSchema>, CheckError> {
        let guard = self.client.lock().await;
        let client = guard.as_ref().ok_or_else(session_closed)?;

        let rows = client.query(TABLE_INFO_SQL, &[&path]).await?;
        rows.iter()
            .map(|row| -> Result<ColumnSchema, CheckError> {
                Ok(ColumnSchema {
                    name: row.try_get("column_name")?,
                    data_type: row.try_get("data_type")?,
                    is_nullable: row.try_get("nullable")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn table_stats(&self, path: &str) -> Result<TableStats, CheckError> {
        let guard = self.client.lock().await;
        let client = guard.as_ref().ok_or_else(session_closed)?;

        let rows = client.query(TABLE_STATS_SQL, &[&path]).await?;
        let row = rows
            .first()
            .ok_or_else(|| CheckError::EmptyResult(path.to_string()))?;

        Ok(TableStats {
            version: row.try_get("version")?,
            num_rows: row.try_get("num_rows")?,
            num_columns: row.try_get("num_columns")?,
        })
    }

    #[instrument(skip(self))]
    async fn scan_rows(&self, path: &str, limit: u32) -> Result<Vec<Value>, CheckError> {
        let guard = self.client.lock().await;
        let client = guard.as_ref().ok_or_else(session_closed)?;

        let limit = i64::from(limit);
        let rows = client.query(SCAN_SQL, &[&path, &limit]).await?;
        rows.iter()
            .map(|row| -> Result<Value, CheckError> { Ok(row.try_get("row_data")?) })
            .collect()
    }

    async fn close(&self) -> Result<(), CheckError> {
        // Dropping the client ends the session; the driver task then finishes.
        drop(self.client.lock().await.take());

        if let Some(handle) = self.driver.lock().await.take() {
            handle.await.map_err(|e| {
                CheckError::InternalError(format!("PostgreSQL driver task failed: {e}"))
            })?;
        }
        info!("PostgreSQL connection closed");
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "postgres"
    }
}

/// Opens sessions from the configured connection parameters.
#[derive(Debug, Clone)]
pub struct PostgresConnector {
    settings: PostgresSettings,
}

impl PostgresConnector {
    pub fn new(settings: PostgresSettings) -> Self {
        Self { settings }
    }

    fn client_config(&self) -> Result<tokio_postgres::Config, InfrastructureError> {
        if let Some(url) = &self.settings.url {
            return url
                .parse::<tokio_postgres::Config>()
                .map_err(InfrastructureError::from);
        }

        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.settings.host)
            .port(self.settings.port)
            .dbname(&self.settings.dbname)
            .user(&self.settings.user)
            .password(&self.settings.password);
        Ok(config)
    }
}

#[async_trait]
impl QueryConnector for PostgresConnector {
    #[instrument(skip(self), fields(host = %self.settings.host, port = self.settings.port))]
    async fn connect(&self) -> Result<Box<dyn QueryInterface>, CheckError> {
        let config = self.client_config()?;
        let (client, connection) = config.connect(NoTls).await?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "PostgreSQL connection error");
            }
        });

        info!("Connected to PostgreSQL");
        Ok(Box::new(PostgresInterface {
            client: Mutex::new(Some(client)),
            driver: Mutex::new(Some(driver)),
        }))
    }
}
