use serde::{Deserialize, Serialize};

mod range;

pub use range::TemporalRange;

use crate::record::FieldName;

/// Temporal semantics supported by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalMode {
    /// Sliding time window ending at the latest observed timestamp
    Axis,
    /// Only rows sharing the latest timestamp
    Frame,
    /// One row per distinct key value(s)
    Key,
}

/// A single field or an ordered composite of fields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelector {
    Single(FieldName),
    Composite(Vec<FieldName>),
}

impl FieldSelector {
    /// Component fields in declaration order
    pub fn fields(&self) -> &[FieldName] {
        match self {
            FieldSelector::Single(field) => std::slice::from_ref(field),
            FieldSelector::Composite(fields) => fields,
        }
    }

    /// The first component, used where a single field is expected
    pub fn primary(&self) -> Option<&str> {
        self.fields().first().map(String::as_str)
    }

    /// No usable field was given
    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|f| f.trim().is_empty())
    }
}

impl From<&str> for FieldSelector {
    fn from(field: &str) -> Self {
        FieldSelector::Single(field.to_string())
    }
}

/// Declares how the buffered rows map onto time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalBinding {
    pub mode: TemporalMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldSelector>,

    /// Visible window, only meaningful for [`TemporalMode::Axis`]
    #[serde(default)]
    pub range: TemporalRange,
}

impl TemporalBinding {
    pub fn axis(field: &str, range: TemporalRange) -> Self {
        Self {
            mode: TemporalMode::Axis,
            field: Some(field.into()),
            range,
        }
    }

    pub fn frame(field: &str) -> Self {
        Self {
            mode: TemporalMode::Frame,
            field: Some(field.into()),
            range: TemporalRange::Infinite,
        }
    }

    pub fn key<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        let mut fields: Vec<FieldName> = fields.into_iter().map(Into::into).collect();
        let field = if fields.len() == 1 {
            FieldSelector::Single(fields.remove(0))
        } else {
            FieldSelector::Composite(fields)
        };
        Self {
            mode: TemporalMode::Key,
            field: Some(field),
            range: TemporalRange::Infinite,
        }
    }

    /// Whether a usable field is declared
    pub fn has_field(&self) -> bool {
        self.field.as_ref().is_some_and(|f| !f.is_blank())
    }

    /// Declared fields, empty when none is set
    pub fn fields(&self) -> &[FieldName] {
        self.field.as_ref().map(FieldSelector::fields).unwrap_or(&[])
    }

    /// Field holding the time value for axis and frame modes
    pub fn time_field(&self) -> Option<&str> {
        self.field.as_ref().and_then(FieldSelector::primary)
    }

    /// Copy of this binding with a blank field replaced by `fallback`
    pub fn with_fallback_field(&self, fallback: &str) -> Self {
        let mut binding = self.clone();
        if !binding.has_field() {
            binding.field = Some(fallback.into());
        }
        binding
    }
}
