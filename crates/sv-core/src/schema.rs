//! Column schema for incoming rows

use serde::{Deserialize, Serialize};

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    DateTime,
    Array,
    Object,
}

impl SemanticType {
    /// Whether values of this type are signed or unsigned integers
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            SemanticType::Int8
                | SemanticType::Int16
                | SemanticType::Int32
                | SemanticType::Int64
                | SemanticType::UInt8
                | SemanticType::UInt16
                | SemanticType::UInt32
                | SemanticType::UInt64
        )
    }

    /// Whether values of this type are numbers
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, SemanticType::Float32 | SemanticType::Float64)
    }

    /// Whether values of this type can drive a temporal binding
    pub fn is_temporal(&self) -> bool {
        matches!(self, SemanticType::DateTime) || self.is_numeric()
    }
}

/// Description of a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,

    #[serde(alias = "type")]
    pub semantic_type: SemanticType,

    /// Absent or null values are expected for this column
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnDescriptor {
    /// Create a new nullable column
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            nullable: true,
        }
    }

    /// Mark this column as required
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_wire_format() {
        let column: ColumnDescriptor = serde_json::from_str(
            r#"{"name": "ts", "semanticType": "datetime", "nullable": false}"#,
        )
        .unwrap();

        assert_eq!(column, ColumnDescriptor::new("ts", SemanticType::DateTime).required());

        let column: ColumnDescriptor =
            serde_json::from_str(r#"{"name": "count", "type": "uint32"}"#).unwrap();
        assert_eq!(column.semantic_type, SemanticType::UInt32);
        assert!(column.nullable);
    }

    #[test]
    fn test_type_classes() {
        assert!(SemanticType::UInt64.is_integer());
        assert!(SemanticType::Float32.is_numeric());
        assert!(!SemanticType::Float32.is_integer());
        assert!(SemanticType::DateTime.is_temporal());
        assert!(!SemanticType::String.is_temporal());
    }
}
