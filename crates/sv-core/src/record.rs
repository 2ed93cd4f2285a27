//! Row representations
//!
//! Rows arrive either positionally (aligned to the column schema) or keyed by
//! field name. Everything past the normalizer works on [`Record`].

use chrono::DateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type FieldName = String;

/// An incoming row in either accepted shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Row {
    /// Values aligned to the column schema
    Positional(Vec<Value>),
    /// Values keyed by field name
    Keyed(IndexMap<FieldName, Value>),
}

impl Row {
    /// Build a row from a JSON array or object
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Array(values) => Some(Row::Positional(values)),
            Value::Object(map) => Some(Row::Keyed(map.into_iter().collect())),
            _ => None,
        }
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::Positional(values)
    }
}

impl From<IndexMap<FieldName, Value>> for Row {
    fn from(fields: IndexMap<FieldName, Value>) -> Self {
        Row::Keyed(fields)
    }
}

/// Canonical keyed row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<FieldName, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<FieldName>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.fields.iter()
    }

    /// Temporal value of a field in epoch milliseconds
    pub fn temporal(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(temporal_millis)
    }

    /// Numeric value of a field
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    pub fn into_inner(self) -> IndexMap<FieldName, Value> {
        self.fields
    }
}

impl From<IndexMap<FieldName, Value>> for Record {
    fn from(fields: IndexMap<FieldName, Value>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(FieldName, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (FieldName, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Interpret a cell as a point in time (epoch milliseconds).
///
/// Numbers are taken as epoch milliseconds, strings are parsed as RFC 3339.
/// Anything else has no temporal value.
pub fn temporal_millis(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.timestamp_millis() as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_shapes_deserialize() {
        let row: Row = serde_json::from_value(json!([1, "a", null])).unwrap();
        assert!(matches!(row, Row::Positional(ref v) if v.len() == 3));

        let row: Row = serde_json::from_value(json!({"x": 1, "y": 2})).unwrap();
        match row {
            Row::Keyed(map) => assert_eq!(map.keys().collect::<Vec<_>>(), ["x", "y"]),
            other => panic!("expected keyed row, got {:?}", other),
        }

        assert!(Row::from_json(json!(42)).is_none());
    }

    #[test]
    fn test_temporal_values() {
        assert_eq!(temporal_millis(&json!(1500)), Some(1500.0));
        assert_eq!(
            temporal_millis(&json!("1970-01-01T00:00:01Z")),
            Some(1000.0)
        );
        assert_eq!(temporal_millis(&json!("yesterday")), None);
        assert_eq!(temporal_millis(&json!(null)), None);
        assert_eq!(temporal_millis(&json!(true)), None);
    }

    #[test]
    fn test_record_preserves_field_order() {
        let mut record = Record::new();
        record.insert("z", json!(1));
        record.insert("a", json!(2));

        let names: Vec<_> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["z", "a"]);
        assert_eq!(record.number("a"), Some(2.0));
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"z":1,"a":2}"#);
    }
}
