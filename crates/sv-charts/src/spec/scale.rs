//! Scales, data transforms and coordinate systems

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Time,
    Band,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleSpec {
    #[serde(rename = "type")]
    pub kind: ScaleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    /// Date format mask for time scales
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
}

impl ScaleSpec {
    pub fn new(kind: ScaleType) -> Self {
        Self {
            kind,
            nice: None,
            domain: None,
            mask: None,
            padding: None,
        }
    }

    /// Time scale with an optional format mask
    pub fn time(mask: Option<&str>) -> Self {
        Self {
            mask: mask.map(str::to_string),
            ..Self::new(ScaleType::Time)
        }
    }

    /// Linear value scale; a fixed domain replaces `nice`
    pub fn value(domain: Option<[f64; 2]>) -> Self {
        match domain {
            Some(domain) => Self {
                domain: Some(domain),
                ..Self::new(ScaleType::Linear)
            },
            None => Self {
                nice: Some(true),
                ..Self::new(ScaleType::Linear)
            },
        }
    }

    pub fn band(padding: f64) -> Self {
        Self {
            padding: Some(padding),
            ..Self::new(ScaleType::Band)
        }
    }
}

/// Data transforms that avoid overplotting grouped series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransformSpec {
    StackY,
    DodgeX,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateType {
    Mercator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CoordinateTransform {
    /// Swap x and y, giving horizontal bars
    Transpose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateSpec {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CoordinateType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<CoordinateTransform>,
}

impl CoordinateSpec {
    pub fn transposed() -> Self {
        Self {
            kind: None,
            transform: vec![CoordinateTransform::Transpose],
        }
    }

    pub fn of(kind: CoordinateType) -> Self {
        Self {
            kind: Some(kind),
            transform: Vec::new(),
        }
    }
}
