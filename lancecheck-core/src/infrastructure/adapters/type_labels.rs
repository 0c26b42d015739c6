// lancecheck-core/src/infrastructure/adapters/type_labels.rs

use lance::deps::arrow_schema::DataType;

/// PostgreSQL type name pglance reports for an Arrow type.
pub fn pg_type_label(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Boolean => "boolean",
        DataType::Int8 | DataType::UInt8 => "char",
        DataType::Int16 | DataType::UInt16 => "int2",
        DataType::Int32 | DataType::UInt32 => "int4",
        DataType::Int64 | DataType::UInt64 => "int8",
        DataType::Float16 | DataType::Float32 => "float4",
        DataType::Float64 => "float8",
        DataType::Utf8 | DataType::LargeUtf8 => "text",
        DataType::Binary | DataType::LargeBinary => "bytea",
        DataType::Date32 | DataType::Date64 => "date",
        DataType::Time32(_) | DataType::Time64(_) => "time",
        DataType::Timestamp(_, _) => "timestamp",
        DataType::Interval(_) => "interval",
        DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => "numeric",
        DataType::FixedSizeList(item, _) => match item.data_type() {
            DataType::Float32 => "float4[]",
            DataType::Float64 => "float8[]",
            _ => "jsonb",
        },
        DataType::List(_)
        | DataType::LargeList(_)
        | DataType::Struct(_)
        | DataType::Union(_, _)
        | DataType::Map(_, _) => "jsonb",
        DataType::Dictionary(_, value) => pg_type_label(value),
        _ => "unknown",
    }
}
