// lancecheck-core/src/ports/storage.rs

use crate::domain::dataset::DatasetDefinition;
use crate::error::CheckError;
use async_trait::async_trait;
use std::path::Path;

/// Durable storage for generated datasets.
#[async_trait]
pub trait DatasetSink: Send + Sync {
    /// Writes `definition` at `path`, fully replacing any dataset already
    /// there.
    async fn write_overwrite(
        &self,
        path: &Path,
        definition: &DatasetDefinition,
    ) -> Result<(), CheckError>;
}
