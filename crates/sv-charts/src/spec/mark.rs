//! Marks and channel encodings

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use sv_core::{FieldName, Record};

use super::Toggle;

/// Well-known channel names
pub mod channel {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const Y1: &str = "y1";
    pub const COLOR: &str = "color";
    pub const SIZE: &str = "size";
    pub const TEXT: &str = "text";
}

/// Geometric element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Line,
    Area,
    Interval,
    Point,
    Rect,
    Cell,
    Text,
    Link,
}

/// A pure function of a row, used as a channel encoding.
///
/// Two computed functions are equal when their names are equal, so the name
/// must identify the behavior, including any fields it reads.
#[derive(Clone)]
pub struct ComputedFn {
    name: String,
    func: Arc<dyn Fn(&Record) -> Value + Send + Sync>,
}

impl ComputedFn {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, record: &Record) -> Value {
        (self.func)(record)
    }
}

impl fmt::Debug for ComputedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComputedFn").field(&self.name).finish()
    }
}

impl PartialEq for ComputedFn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// What a channel is bound to
#[derive(Debug, Clone, PartialEq)]
pub enum Encoding {
    Field(FieldName),
    Computed(ComputedFn),
}

impl Encoding {
    pub fn field(name: &str) -> Self {
        Encoding::Field(name.to_string())
    }

    /// Channel value for a row
    pub fn evaluate(&self, record: &Record) -> Value {
        match self {
            Encoding::Field(field) => record.get(field).cloned().unwrap_or(Value::Null),
            Encoding::Computed(func) => func.evaluate(record),
        }
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Encoding::Field(field) => serializer.serialize_str(field),
            Encoding::Computed(func) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("computed", func.name())?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSelector {
    /// Only the most recent labeled point
    Last,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSpec {
    pub text: FieldName,
    pub overlap_hide: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipSpec {
    pub items: Vec<FieldName>,
}

/// One visual element type with its bindings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    pub encode: BTreeMap<String, Encoding>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<LabelSpec>,
    pub tooltip: Toggle<TooltipSpec>,
}

impl Mark {
    pub fn new(kind: MarkType) -> Self {
        Self {
            kind,
            encode: BTreeMap::new(),
            style: BTreeMap::new(),
            labels: Vec::new(),
            tooltip: Toggle::Off,
        }
    }

    /// Bind a channel to a field
    pub fn encode_field(mut self, channel: &str, field: &str) -> Self {
        self.encode.insert(channel.to_string(), Encoding::field(field));
        self
    }

    /// Bind a channel to a field when one is given
    pub fn encode_optional(self, channel: &str, field: Option<&str>) -> Self {
        match field {
            Some(field) => self.encode_field(channel, field),
            None => self,
        }
    }

    /// Bind a channel to a computed function
    pub fn encode_computed(mut self, channel: &str, func: ComputedFn) -> Self {
        self.encode.insert(channel.to_string(), Encoding::Computed(func));
        self
    }

    pub fn style(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.style.insert(key.to_string(), value.into());
        self
    }

    pub fn labels(mut self, labels: Vec<LabelSpec>) -> Self {
        self.labels = labels;
        self
    }

    /// Show a tooltip listing the given fields
    pub fn tooltip<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        self.tooltip = Toggle::On(TooltipSpec {
            items: items.into_iter().map(Into::into).collect(),
        });
        self
    }
}
