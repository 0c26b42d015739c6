// lancecheck-core/src/domain/dataset/id.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Identifier of every dataset in the reference matrix.
///
/// Both the generator and the test matrix are keyed by this enum, so a
/// dataset cannot be generated under one name and verified under another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatasetId {
    #[serde(rename = "simple_table")]
    Simple,
    #[serde(rename = "vector_table")]
    Vector,
    #[serde(rename = "complex_table")]
    Complex,
    #[serde(rename = "large_table")]
    Large,
}

impl DatasetId {
    /// Matrix order. Generation and verification both follow it.
    pub const ALL: [DatasetId; 4] = [
        DatasetId::Simple,
        DatasetId::Vector,
        DatasetId::Complex,
        DatasetId::Large,
    ];

    /// Relative name of the dataset under the storage root / query prefix.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetId::Simple => "simple_table",
            DatasetId::Vector => "vector_table",
            DatasetId::Complex => "complex_table",
            DatasetId::Large => "large_table",
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| DomainError::UnknownDataset(s.to_string()))
    }
}
