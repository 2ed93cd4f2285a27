//! Arrow export of resolved views
//!
//! Renderers that consume columnar data get the resolved rows as a
//! `RecordBatch` shaped by the column schema. Values that do not fit a
//! column's type become nulls; integers that overflow a narrower column are
//! an error.

use std::fmt::Display;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, StringArray, TimestampMillisecondArray, UInt16Array, UInt32Array, UInt64Array,
    UInt8Array,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde_json::Value;
use sv_core::{temporal_millis, ColumnDescriptor, Record, SemanticType};

use crate::temporal::ResolvedView;
use crate::DataError;

/// Arrow type used for a semantic column type
pub fn arrow_type(semantic_type: SemanticType) -> DataType {
    match semantic_type {
        SemanticType::String => DataType::Utf8,
        SemanticType::Boolean => DataType::Boolean,
        SemanticType::Int8 => DataType::Int8,
        SemanticType::Int16 => DataType::Int16,
        SemanticType::Int32 => DataType::Int32,
        SemanticType::Int64 => DataType::Int64,
        SemanticType::UInt8 => DataType::UInt8,
        SemanticType::UInt16 => DataType::UInt16,
        SemanticType::UInt32 => DataType::UInt32,
        SemanticType::UInt64 => DataType::UInt64,
        SemanticType::Float32 => DataType::Float32,
        SemanticType::Float64 => DataType::Float64,
        SemanticType::DateTime => DataType::Timestamp(TimeUnit::Millisecond, None),
        // Nested values travel as JSON text
        SemanticType::Array | SemanticType::Object => DataType::Utf8,
    }
}

/// Arrow schema for a column list, with nullability as declared
pub fn arrow_schema(columns: &[ColumnDescriptor]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|c| Field::new(&c.name, arrow_type(c.semantic_type), c.nullable))
            .collect::<Vec<_>>(),
    )
}

/// Convert a resolved view into a record batch.
///
/// A required column that holds missing or misfit cells is exported as a
/// nullable field rather than failing the batch.
pub fn to_record_batch(
    columns: &[ColumnDescriptor],
    view: &ResolvedView,
) -> Result<RecordBatch, DataError> {
    let rows: Vec<&Record> = view.records().collect();
    let arrays = columns
        .iter()
        .map(|column| build_array(column, &rows))
        .collect::<Result<Vec<_>, _>>()?;

    let fields = columns
        .iter()
        .zip(&arrays)
        .map(|(c, array)| {
            let nullable = c.nullable || array.null_count() > 0;
            Field::new(&c.name, arrow_type(c.semantic_type), nullable)
        })
        .collect::<Vec<_>>();

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
    Ok(batch)
}

/// Render a resolved view as a text table
pub fn pretty_format(columns: &[ColumnDescriptor], view: &ResolvedView) -> Result<String, DataError> {
    let batch = to_record_batch(columns, view)?;
    let table = arrow::util::pretty::pretty_format_batches(&[batch])?;
    Ok(table.to_string())
}

fn build_array(column: &ColumnDescriptor, rows: &[&Record]) -> Result<ArrayRef, DataError> {
    let name = column.name.as_str();
    let cells = || rows.iter().map(move |r| r.get(name).filter(|v| !v.is_null()));

    let signed = || cells().map(|v| v.and_then(Value::as_i64)).collect::<Vec<_>>();
    let unsigned = || cells().map(|v| v.and_then(Value::as_u64)).collect::<Vec<_>>();

    let array: ArrayRef = match column.semantic_type {
        SemanticType::String => Arc::new(StringArray::from(
            cells()
                .map(|v| {
                    v.map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
                .collect::<Vec<_>>(),
        )),
        SemanticType::Boolean => Arc::new(BooleanArray::from(
            cells().map(|v| v.and_then(Value::as_bool)).collect::<Vec<_>>(),
        )),
        SemanticType::Int8 => Arc::new(Int8Array::from(narrow::<i64, i8>(name, signed())?)),
        SemanticType::Int16 => Arc::new(Int16Array::from(narrow::<i64, i16>(name, signed())?)),
        SemanticType::Int32 => Arc::new(Int32Array::from(narrow::<i64, i32>(name, signed())?)),
        SemanticType::Int64 => Arc::new(Int64Array::from(signed())),
        SemanticType::UInt8 => Arc::new(UInt8Array::from(narrow::<u64, u8>(name, unsigned())?)),
        SemanticType::UInt16 => Arc::new(UInt16Array::from(narrow::<u64, u16>(name, unsigned())?)),
        SemanticType::UInt32 => Arc::new(UInt32Array::from(narrow::<u64, u32>(name, unsigned())?)),
        SemanticType::UInt64 => Arc::new(UInt64Array::from(unsigned())),
        SemanticType::Float32 => Arc::new(Float32Array::from(
            cells()
                .map(|v| v.and_then(Value::as_f64).map(|f| f as f32))
                .collect::<Vec<_>>(),
        )),
        SemanticType::Float64 => Arc::new(Float64Array::from(
            cells().map(|v| v.and_then(Value::as_f64)).collect::<Vec<_>>(),
        )),
        SemanticType::DateTime => Arc::new(TimestampMillisecondArray::from(
            cells()
                .map(|v| v.and_then(temporal_millis).map(|ms| ms as i64))
                .collect::<Vec<_>>(),
        )),
        SemanticType::Array | SemanticType::Object => Arc::new(StringArray::from(
            cells()
                .map(|v| v.map(Value::to_string))
                .collect::<Vec<_>>(),
        )),
    };
    Ok(array)
}

fn narrow<S, T>(column: &str, values: Vec<Option<S>>) -> Result<Vec<Option<T>>, DataError>
where
    S: Copy + Display,
    T: TryFrom<S>,
{
    values
        .into_iter()
        .map(|value| match value {
            None => Ok(None),
            Some(v) => T::try_from(v).map(Some).map_err(|_| DataError::InvalidValue {
                column: column.to_string(),
                reason: format!("{} does not fit {}", v, std::any::type_name::<T>()),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Snapshot;
    use crate::temporal::resolve;
    use serde_json::json;
    use sv_core::{TemporalBinding, TemporalRange};

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("time", SemanticType::DateTime),
            ColumnDescriptor::new("host", SemanticType::String),
            ColumnDescriptor::new("cpu", SemanticType::Float64),
            ColumnDescriptor::new("cores", SemanticType::UInt8),
            ColumnDescriptor::new("tags", SemanticType::Array),
        ]
    }

    fn view(rows: Vec<Value>) -> ResolvedView {
        let snapshot = Snapshot::from_records(
            3,
            rows.into_iter()
                .map(|v| -> Record { v.as_object().unwrap().clone().into_iter().collect() }),
        );
        resolve(&snapshot, &TemporalBinding::axis("time", TemporalRange::Infinite))
    }

    #[test]
    fn test_record_batch_shape() {
        let view = view(vec![
            json!({"time": "2024-01-01T00:00:00Z", "host": "a", "cpu": 0.25, "cores": 8, "tags": ["x"]}),
            json!({"time": 1000, "host": 7, "cpu": null}),
        ]);

        let batch = to_record_batch(&columns(), &view).unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 5);
        assert_eq!(
            batch.schema().field(0).data_type(),
            &DataType::Timestamp(TimeUnit::Millisecond, None)
        );

        let hosts = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(hosts.value(1), "7");

        let cpu = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
        assert!(cpu.is_null(1));

        let time = batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampMillisecondArray>()
            .unwrap();
        assert_eq!(time.value(0), 1_704_067_200_000);

        let tags = batch.column(4).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(tags.value(0), r#"["x"]"#);
    }

    #[test]
    fn test_narrow_overflow_is_an_error() {
        let view = view(vec![json!({"cores": 300})]);

        let err = to_record_batch(&columns(), &view).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { ref column, .. } if column == "cores"));
    }

    #[test]
    fn test_required_column_with_gaps_exports_nulls() {
        let required = vec![
            ColumnDescriptor::new("time", SemanticType::DateTime).required(),
            ColumnDescriptor::new("cpu", SemanticType::Float64).required(),
        ];
        let view = view(vec![
            json!({"time": 1, "cpu": 0.5}),
            json!({"time": 2, "cpu": "n/a"}),
            json!({"cpu": 0.75}),
        ]);

        let batch = to_record_batch(&required, &view).unwrap();

        assert_eq!(batch.num_rows(), 3);
        let cpu = batch.column(1).as_any().downcast_ref::<Float64Array>().unwrap();
        assert!(cpu.is_null(1));
        assert_eq!(cpu.value(2), 0.75);
        assert!(batch.column(0).is_null(2));
        assert!(batch.schema().field(1).is_nullable());
        assert!(!arrow_schema(&required).field(1).is_nullable());
    }

    #[test]
    fn test_pretty_format_lists_values() {
        let view = view(vec![json!({"host": "web-1", "cpu": 0.5})]);

        let table = pretty_format(&columns(), &view).unwrap();
        assert!(table.contains("web-1"));
    }
}
