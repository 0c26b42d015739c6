// lancecheck-core/src/infrastructure/adapters/arrow_json.rs
//
// Arrow values to self-describing JSON rows, the shape `scan_rows` returns.

use lance::deps::arrow_array::cast::AsArray;
use lance::deps::arrow_array::types::{
    Date32Type, Date64Type, Float16Type, Float32Type, Float64Type, Int8Type, Int16Type,
    Int32Type, Int64Type, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use lance::deps::arrow_array::{Array, RecordBatch};
use lance::deps::arrow_schema::{DataType, TimeUnit};
use serde_json::{Map, Number, Value};

/// One JSON object per row, keyed by field name.
pub fn batch_to_rows(batch: &RecordBatch) -> Vec<Value> {
    let schema = batch.schema();
    (0..batch.num_rows())
        .map(|row| {
            let object: Map<String, Value> = schema
                .fields()
                .iter()
                .zip(batch.columns())
                .map(|(field, column)| (field.name().clone(), value_to_json(column.as_ref(), row)))
                .collect();
            Value::Object(object)
        })
        .collect()
}

pub fn value_to_json(array: &dyn Array, row: usize) -> Value {
    if array.is_null(row) {
        return Value::Null;
    }

    match array.data_type() {
        DataType::Boolean => Value::Bool(array.as_boolean().value(row)),
        DataType::Int8 => array.as_primitive::<Int8Type>().value(row).into(),
        DataType::Int16 => array.as_primitive::<Int16Type>().value(row).into(),
        DataType::Int32 => array.as_primitive::<Int32Type>().value(row).into(),
        DataType::Int64 => array.as_primitive::<Int64Type>().value(row).into(),
        DataType::UInt8 => array.as_primitive::<UInt8Type>().value(row).into(),
        DataType::UInt16 => array.as_primitive::<UInt16Type>().value(row).into(),
        DataType::UInt32 => array.as_primitive::<UInt32Type>().value(row).into(),
        DataType::UInt64 => array.as_primitive::<UInt64Type>().value(row).into(),
        DataType::Float16 => f32_to_json(array.as_primitive::<Float16Type>().value(row).to_f32()),
        DataType::Float32 => f32_to_json(array.as_primitive::<Float32Type>().value(row)),
        DataType::Float64 => f64_to_json(array.as_primitive::<Float64Type>().value(row)),
        DataType::Utf8 => Value::String(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(array.as_string::<i64>().value(row).to_string()),
        DataType::Date32 => optional_text(array.as_primitive::<Date32Type>().value_as_date(row)),
        DataType::Date64 => optional_text(array.as_primitive::<Date64Type>().value_as_date(row)),
        DataType::Timestamp(unit, tz) => {
            let naive = match unit {
                TimeUnit::Second => array
                    .as_primitive::<TimestampSecondType>()
                    .value_as_datetime(row),
                TimeUnit::Millisecond => array
                    .as_primitive::<TimestampMillisecondType>()
                    .value_as_datetime(row),
                TimeUnit::Microsecond => array
                    .as_primitive::<TimestampMicrosecondType>()
                    .value_as_datetime(row),
                TimeUnit::Nanosecond => array
                    .as_primitive::<TimestampNanosecondType>()
                    .value_as_datetime(row),
            };
            match (naive, tz) {
                (Some(dt), Some(tz)) => Value::String(format!("{dt} {tz}")),
                (Some(dt), None) => Value::String(dt.to_string()),
                (None, _) => Value::Null,
            }
        }
        DataType::List(_) => list_to_json(array.as_list::<i32>().value(row).as_ref()),
        DataType::LargeList(_) => list_to_json(array.as_list::<i64>().value(row).as_ref()),
        DataType::FixedSizeList(_, _) => {
            list_to_json(array.as_fixed_size_list().value(row).as_ref())
        }
        DataType::Struct(fields) => {
            let structs = array.as_struct();
            let object: Map<String, Value> = fields
                .iter()
                .zip(structs.columns())
                .map(|(field, column)| (field.name().clone(), value_to_json(column.as_ref(), row)))
                .collect();
            Value::Object(object)
        }
        other => Value::String(format!("<unsupported_type: {other:?}>")),
    }
}

fn list_to_json(values: &dyn Array) -> Value {
    Value::Array((0..values.len()).map(|i| value_to_json(values, i)).collect())
}

fn optional_text<T: ToString>(value: Option<T>) -> Value {
    value
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

// Goes through the shortest decimal form so 0.1f32 stays 0.1 rather than
// 0.10000000149011612.
fn f32_to_json(v: f32) -> Value {
    v.to_string()
        .parse::<f64>()
        .ok()
        .map(f64_to_json)
        .unwrap_or(Value::Null)
}

fn f64_to_json(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}
