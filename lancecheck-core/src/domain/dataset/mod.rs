// lancecheck-core/src/domain/dataset/mod.rs

pub mod definition;
pub mod id;
pub mod location;
pub mod matrix;
pub mod region;

pub use definition::{Column, ColumnValues, DatasetBuilder, DatasetDefinition, SemanticType};
pub use id::DatasetId;
pub use location::DatasetLocations;
pub use matrix::{category_for, definition, reference_matrix};
pub use region::{TypeRegion, uncovered_regions};
