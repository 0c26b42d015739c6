// lancecheck-core/src/application/generator.rs

use std::fs;
use tracing::{info, instrument};

use crate::domain::dataset::{DatasetId, DatasetLocations, definition};
use crate::error::CheckError;
use crate::ports::storage::DatasetSink;

/// Materializes the reference datasets under the storage root. Any failed
/// write aborts generation.
pub struct DatasetGenerator<'a> {
    sink: &'a dyn DatasetSink,
    locations: &'a DatasetLocations,
}

impl<'a> DatasetGenerator<'a> {
    pub fn new(sink: &'a dyn DatasetSink, locations: &'a DatasetLocations) -> Self {
        Self { sink, locations }
    }

    pub async fn create_simple_table(&self) -> Result<DatasetId, CheckError> {
        self.create(DatasetId::Simple).await
    }

    pub async fn create_vector_table(&self) -> Result<DatasetId, CheckError> {
        self.create(DatasetId::Vector).await
    }

    pub async fn create_complex_table(&self) -> Result<DatasetId, CheckError> {
        self.create(DatasetId::Complex).await
    }

    pub async fn create_large_table(&self) -> Result<DatasetId, CheckError> {
        self.create(DatasetId::Large).await
    }

    #[instrument(skip(self), fields(root = ?self.locations.storage_root()))]
    pub async fn create(&self, id: DatasetId) -> Result<DatasetId, CheckError> {
        let def = definition(id)?;
        let path = self.locations.storage_path(id);
        self.sink.write_overwrite(&path, &def).await?;

        println!("  ✅ Created {} ({} rows) at {:?}", id, def.row_count(), path);
        Ok(id)
    }

    /// Creates the storage root if needed, then every reference dataset in
    /// order. Returns the names written.
    pub async fn generate_all(&self) -> Result<Vec<DatasetId>, CheckError> {
        let root = self.locations.storage_root();
        fs::create_dir_all(root)?;
        println!("📦 Generating Lance datasets in {:?}", root);

        let created = vec![
            self.create_simple_table().await?,
            self.create_vector_table().await?,
            self.create_complex_table().await?,
            self.create_large_table().await?,
        ];
        info!(count = created.len(), "Datasets generated");
        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::DatasetDefinition;
    use crate::infrastructure::adapters::LanceDatasetSink;
    use crate::infrastructure::error::InfrastructureError;
    use anyhow::Result;
    use async_trait::async_trait;
    use lance::dataset::Dataset;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingSink {
        writes: Arc<Mutex<Vec<(PathBuf, usize)>>>,
        fail_on: Option<DatasetId>,
    }

    #[async_trait]
    impl DatasetSink for RecordingSink {
        async fn write_overwrite(
            &self,
            path: &Path,
            definition: &DatasetDefinition,
        ) -> Result<(), CheckError> {
            if self.fail_on == Some(definition.id()) {
                return Err(InfrastructureError::InvalidPath(path.display().to_string()).into());
            }
            self.writes
                .lock()
                .unwrap()
                .push((path.to_path_buf(), definition.row_count()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_generate_all_writes_every_dataset_under_root() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("lance_test_data");
        let locations = DatasetLocations::new(&root, "/test_data_in_container");
        let sink = RecordingSink::default();

        let created = DatasetGenerator::new(&sink, &locations).generate_all().await?;

        assert_eq!(created, DatasetId::ALL.to_vec());
        assert!(root.is_dir());
        let writes = sink.writes.lock().unwrap();
        assert_eq!(
            *writes,
            vec![
                (root.join("simple_table"), 5),
                (root.join("vector_table"), 5),
                (root.join("complex_table"), 3),
                (root.join("large_table"), 1000),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_aborts_generation() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let locations = DatasetLocations::local(dir.path());
        let sink = RecordingSink {
            fail_on: Some(DatasetId::Vector),
            ..Default::default()
        };

        let result = DatasetGenerator::new(&sink, &locations).generate_all().await;

        assert!(result.is_err());
        // Nothing after the failing dataset is attempted.
        assert_eq!(sink.writes.lock().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_regeneration_does_not_duplicate_rows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let locations = DatasetLocations::local(dir.path());
        let sink = LanceDatasetSink::new();
        let generator = DatasetGenerator::new(&sink, &locations);

        generator.generate_all().await?;
        generator.generate_all().await?;

        for (id, rows) in [
            (DatasetId::Simple, 5),
            (DatasetId::Vector, 5),
            (DatasetId::Complex, 3),
            (DatasetId::Large, 1000),
        ] {
            let path = locations.storage_path(id);
            let dataset = Dataset::open(path.to_str().unwrap()).await?;
            assert_eq!(dataset.count_rows(None).await?, rows, "{id}");
        }
        Ok(())
    }
}
