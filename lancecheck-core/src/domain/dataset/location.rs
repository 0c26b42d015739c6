// lancecheck-core/src/domain/dataset/location.rs

use std::path::{Path, PathBuf};

use super::id::DatasetId;

/// Where datasets live on each side of the bridge.
///
/// The generator writes under `storage_root`; the query interface may see
/// the same files under another prefix (e.g. a container mount).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLocations {
    storage_root: PathBuf,
    query_prefix: String,
}

impl DatasetLocations {
    pub fn new(storage_root: impl Into<PathBuf>, query_prefix: impl Into<String>) -> Self {
        Self {
            storage_root: storage_root.into(),
            query_prefix: query_prefix.into(),
        }
    }

    /// Queries go to the same location the datasets are written to.
    pub fn local(storage_root: impl Into<PathBuf>) -> Self {
        let storage_root = storage_root.into();
        let query_prefix = storage_root.to_string_lossy().into_owned();
        Self {
            storage_root,
            query_prefix,
        }
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn query_prefix(&self) -> &str {
        &self.query_prefix
    }

    pub fn storage_path(&self, id: DatasetId) -> PathBuf {
        self.storage_root.join(id.name())
    }

    pub fn query_path(&self, id: DatasetId) -> String {
        let prefix = self.query_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            // "" or "/" both mean the query-side root
            if self.query_prefix.starts_with('/') {
                format!("/{}", id.name())
            } else {
                id.name().to_string()
            }
        } else {
            format!("{prefix}/{}", id.name())
        }
    }
}
