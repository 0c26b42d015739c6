// lancecheck-core/src/domain/dataset/matrix.rs
//
// The reference datasets. Every value is deterministic so that any two runs
// write byte-for-byte equivalent tables.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::definition::{ColumnValues, DatasetDefinition};
use super::id::DatasetId;
use super::region::TypeRegion;
use crate::domain::encoding::encode_record;
use crate::domain::error::DomainError;

pub const LARGE_TABLE_ROWS: usize = 1000;
pub const CATEGORY_COUNT: usize = 10;
pub const EMBEDDING_DIM: usize = 4;

#[derive(Serialize)]
struct DocumentMetadata {
    category: &'static str,
    score: f64,
}

#[derive(Serialize)]
struct UserProfile {
    name: &'static str,
    age: u32,
    city: &'static str,
}

/// Builds the definition registered under `id`.
pub fn definition(id: DatasetId) -> Result<DatasetDefinition, DomainError> {
    match id {
        DatasetId::Simple => simple_table(),
        DatasetId::Vector => vector_table(),
        DatasetId::Complex => complex_table(),
        DatasetId::Large => large_table(),
    }
}

/// All definitions in matrix order.
pub fn reference_matrix() -> Result<Vec<DatasetDefinition>, DomainError> {
    DatasetId::ALL.into_iter().map(definition).collect()
}

/// Category assigned to row `index` of the scale dataset.
pub fn category_for(index: usize) -> String {
    format!("cat_{}", index % CATEGORY_COUNT)
}

fn simple_table() -> Result<DatasetDefinition, DomainError> {
    let id = DatasetId::Simple;
    let hire_dates = [
        (2020, 1, 15),
        (2019, 6, 20),
        (2021, 3, 10),
        (2018, 9, 5),
        (2022, 11, 30),
    ]
    .into_iter()
    .map(|(y, m, d)| date(id, y, m, d))
    .collect::<Result<Vec<_>, _>>()?;

    DatasetDefinition::builder(id, 5)
        .regions([
            TypeRegion::FixedWidthNumeric,
            TypeRegion::String,
            TypeRegion::Boolean,
            TypeRegion::Date,
        ])
        .column("id", ColumnValues::Int64(vec![1, 2, 3, 4, 5]))
        .column("name", strings(&["Alice", "Bob", "Charlie", "David", "Eve"]))
        .column("age", ColumnValues::Int64(vec![25, 30, 35, 40, 45]))
        .column(
            "salary",
            ColumnValues::Float64(vec![50000.5, 65000.0, 80000.25, 95000.75, 120000.0]),
        )
        .column(
            "is_active",
            ColumnValues::Boolean(vec![true, true, false, true, false]),
        )
        .column("hire_date", ColumnValues::Date(hire_dates))
        .build()
}

fn vector_table() -> Result<DatasetDefinition, DomainError> {
    // 0.1, 0.2, ... 2.0 laid out four per row
    let embeddings: Vec<Vec<f32>> = (0..5)
        .map(|row| {
            (0..EMBEDDING_DIM)
                .map(|col| ((row * EMBEDDING_DIM + col + 1) as f32) / 10.0)
                .collect()
        })
        .collect();

    let metadata = [
        ("A", 0.95),
        ("B", 0.87),
        ("A", 0.92),
        ("C", 0.78),
        ("B", 0.89),
    ]
    .into_iter()
    .map(|(category, score)| encode_record(&DocumentMetadata { category, score }))
    .collect::<Result<Vec<_>, _>>()?;

    DatasetDefinition::builder(DatasetId::Vector, 5)
        .regions([TypeRegion::FloatVector, TypeRegion::EncodedRecord])
        .column("id", ColumnValues::Int64(vec![1, 2, 3, 4, 5]))
        .column("document", strings(&["doc1", "doc2", "doc3", "doc4", "doc5"]))
        .column(
            "embedding",
            ColumnValues::FloatVector {
                dim: EMBEDDING_DIM,
                rows: embeddings,
            },
        )
        .column("metadata", ColumnValues::EncodedRecord(metadata))
        .build()
}

fn complex_table() -> Result<DatasetDefinition, DomainError> {
    let id = DatasetId::Complex;

    let profiles = [
        UserProfile {
            name: "John",
            age: 30,
            city: "NYC",
        },
        UserProfile {
            name: "Jane",
            age: 25,
            city: "LA",
        },
        UserProfile {
            name: "Bob",
            age: 35,
            city: "Chicago",
        },
    ]
    .iter()
    .map(encode_record)
    .collect::<Result<Vec<_>, _>>()?;

    let created_at = [
        (2023, 1, 1, 10, 30, 0),
        (2023, 2, 15, 14, 45, 0),
        (2023, 3, 20, 9, 15, 0),
    ]
    .into_iter()
    .map(|(y, mo, d, h, mi, s)| timestamp(id, (y, mo, d), (h, mi, s)))
    .collect::<Result<Vec<_>, _>>()?;

    DatasetDefinition::builder(id, 3)
        .regions([
            TypeRegion::PrimitiveList,
            TypeRegion::EncodedRecord,
            TypeRegion::Timestamp,
        ])
        .column("id", ColumnValues::Int64(vec![1, 2, 3]))
        .column("user_name", strings(&["user1", "user2", "user3"]))
        .column(
            "scores",
            ColumnValues::Int64List(vec![vec![85, 90, 78], vec![92, 88, 95], vec![76, 82, 89]]),
        )
        .column("profile", ColumnValues::EncodedRecord(profiles))
        .column(
            "tags",
            ColumnValues::Utf8List(vec![
                owned(&["python", "data", "ml"]),
                owned(&["javascript", "web", "react"]),
                owned(&["rust", "systems", "performance"]),
            ]),
        )
        .column("created_at", ColumnValues::Timestamp(created_at))
        .build()
}

fn large_table() -> Result<DatasetDefinition, DomainError> {
    let size = LARGE_TABLE_ROWS;

    DatasetDefinition::builder(DatasetId::Large, size)
        .regions([
            TypeRegion::Scale,
            TypeRegion::FixedWidthNumeric,
            TypeRegion::Boolean,
        ])
        .column("id", ColumnValues::Int64((1..=size as i64).collect()))
        .column(
            "value",
            ColumnValues::Float64((0..size).map(|i| i as f64 * 0.1).collect()),
        )
        .column(
            "category",
            ColumnValues::Utf8((0..size).map(category_for).collect()),
        )
        .column(
            "flag",
            ColumnValues::Boolean((0..size).map(|i| i % 2 == 0).collect()),
        )
        .build()
}

fn strings(values: &[&str]) -> ColumnValues {
    ColumnValues::Utf8(owned(values))
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn date(id: DatasetId, y: i32, m: u32, d: u32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| DomainError::InvalidCalendarValue {
        dataset: id.name().to_string(),
        value: format!("{y:04}-{m:02}-{d:02}"),
    })
}

fn timestamp(
    id: DatasetId,
    (y, mo, d): (i32, u32, u32),
    (h, mi, s): (u32, u32, u32),
) -> Result<NaiveDateTime, DomainError> {
    date(id, y, mo, d)?
        .and_hms_opt(h, mi, s)
        .ok_or_else(|| DomainError::InvalidCalendarValue {
            dataset: id.name().to_string(),
            value: format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::region::uncovered_regions;
    use crate::domain::encoding::decode_record;
    use serde_json::json;

    #[test]
    fn test_matrix_row_counts() -> Result<(), DomainError> {
        let counts: Vec<(DatasetId, usize)> = reference_matrix()?
            .iter()
            .map(|d| (d.id(), d.row_count()))
            .collect();
        assert_eq!(
            counts,
            vec![
                (DatasetId::Simple, 5),
                (DatasetId::Vector, 5),
                (DatasetId::Complex, 3),
                (DatasetId::Large, 1000),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_matrix_covers_every_region() -> Result<(), DomainError> {
        let matrix = reference_matrix()?;
        assert!(uncovered_regions(&matrix).is_empty());
        Ok(())
    }

    #[test]
    fn test_partial_matrix_reports_gaps() -> Result<(), DomainError> {
        let only_simple = [definition(DatasetId::Simple)?];
        let gaps = uncovered_regions(&only_simple);
        assert!(gaps.contains(&TypeRegion::Scale));
        assert!(gaps.contains(&TypeRegion::EncodedRecord));
        assert!(!gaps.contains(&TypeRegion::Date));
        Ok(())
    }

    #[test]
    fn test_large_table_categories_cycle() -> Result<(), DomainError> {
        let large = definition(DatasetId::Large)?;
        let Some(ColumnValues::Utf8(categories)) = large.column("category").map(|c| &c.values)
        else {
            panic!("category column missing");
        };
        assert_eq!(categories[0], "cat_0");
        assert_eq!(categories[13], "cat_3");
        assert_eq!(categories[999], "cat_9");

        let Some(ColumnValues::Int64(ids)) = large.column("id").map(|c| &c.values) else {
            panic!("id column missing");
        };
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&1000));
        Ok(())
    }

    #[test]
    fn test_embeddings_are_fixed_width() -> Result<(), DomainError> {
        let vector = definition(DatasetId::Vector)?;
        let Some(ColumnValues::FloatVector { dim, rows }) =
            vector.column("embedding").map(|c| &c.values)
        else {
            panic!("embedding column missing");
        };
        assert_eq!(*dim, 4);
        assert!(rows.iter().all(|r| r.len() == 4));
        assert!((rows[4][3] - 2.0).abs() < f32::EPSILON);
        Ok(())
    }

    #[test]
    fn test_profiles_decode() -> Result<(), DomainError> {
        let complex = definition(DatasetId::Complex)?;
        let Some(ColumnValues::EncodedRecord(profiles)) =
            complex.column("profile").map(|c| &c.values)
        else {
            panic!("profile column missing");
        };
        let jane = decode_record(&profiles[1])?;
        assert_eq!(jane.get("city"), Some(&json!("LA")));
        assert_eq!(jane.get("age"), Some(&json!(25)));
        Ok(())
    }
}
