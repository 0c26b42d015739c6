// lancecheck-core/src/domain/dataset/region.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::definition::DatasetDefinition;

/// Category of value encoding the reference matrix must exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRegion {
    FixedWidthNumeric,
    Boolean,
    String,
    Date,
    Timestamp,
    FloatVector,
    EncodedRecord,
    PrimitiveList,
    Scale,
}

impl TypeRegion {
    pub const ALL: [TypeRegion; 9] = [
        TypeRegion::FixedWidthNumeric,
        TypeRegion::Boolean,
        TypeRegion::String,
        TypeRegion::Date,
        TypeRegion::Timestamp,
        TypeRegion::FloatVector,
        TypeRegion::EncodedRecord,
        TypeRegion::PrimitiveList,
        TypeRegion::Scale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TypeRegion::FixedWidthNumeric => "fixed-width numeric",
            TypeRegion::Boolean => "boolean",
            TypeRegion::String => "string",
            TypeRegion::Date => "date",
            TypeRegion::Timestamp => "timestamp",
            TypeRegion::FloatVector => "float vector",
            TypeRegion::EncodedRecord => "encoded record",
            TypeRegion::PrimitiveList => "list of primitive",
            TypeRegion::Scale => "scale",
        }
    }
}

impl fmt::Display for TypeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Regions not tagged on any definition, in declaration order.
pub fn uncovered_regions<'a, I>(definitions: I) -> Vec<TypeRegion>
where
    I: IntoIterator<Item = &'a DatasetDefinition>,
{
    let covered: BTreeSet<TypeRegion> = definitions
        .into_iter()
        .flat_map(|def| def.regions().iter().copied())
        .collect();

    TypeRegion::ALL
        .into_iter()
        .filter(|region| !covered.contains(region))
        .collect()
}
