//! Canonical compiled chart specification
//!
//! This is the renderer-agnostic description handed to the external renderer.
//! It is serialized with camelCase keys; disabled sections serialize as
//! `false`.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use sv_core::{StreamingPolicy, TemporalBinding};

mod mark;
mod scale;

pub use mark::{channel, ComputedFn, Encoding, LabelSelector, LabelSpec, Mark, MarkType, TooltipSpec};
pub use scale::{CoordinateSpec, CoordinateTransform, CoordinateType, ScaleSpec, ScaleType, TransformSpec};

/// A compiled chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledSpec {
    pub marks: Vec<Mark>,
    pub scales: BTreeMap<String, ScaleSpec>,
    pub transforms: Vec<TransformSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<CoordinateSpec>,
    pub axes: Toggle<Axes>,
    pub legend: Toggle<LegendSpec>,
    pub tooltip: bool,
    pub streaming: StreamingPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub animate: bool,
}

/// A section that is either disabled or configured
#[derive(Debug, Clone, PartialEq)]
pub enum Toggle<T> {
    Off,
    On(T),
}

impl<T> Toggle<T> {
    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Toggle::Off => None,
            Toggle::On(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Toggle<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Toggle::Off, Toggle::On)
    }
}

impl<T: Serialize> Serialize for Toggle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Toggle::Off => serializer.serialize_bool(false),
            Toggle::On(value) => value.serialize(serializer),
        }
    }
}

/// Axis configuration for both position channels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    pub x: AxisSpec,
    pub y: AxisSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    pub grid: bool,
}

/// Axis title; hidden titles serialize as `false`
#[derive(Debug, Clone, PartialEq)]
pub enum AxisTitle {
    Text(String),
    Hidden,
}

impl Serialize for AxisTitle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AxisTitle::Text(text) => serializer.serialize_str(text),
            AxisTitle::Hidden => serializer.serialize_bool(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSpec {
    pub position: LegendPosition,
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle_serialization() {
        let off: Toggle<LegendSpec> = Toggle::Off;
        assert_eq!(serde_json::to_value(&off).unwrap(), json!(false));

        let on = Toggle::On(LegendSpec {
            position: LegendPosition::Bottom,
            interactive: true,
        });
        assert_eq!(
            serde_json::to_value(&on).unwrap(),
            json!({"position": "bottom", "interactive": true})
        );
    }

    #[test]
    fn test_axis_titles() {
        let axis = AxisSpec {
            title: Some(AxisTitle::Hidden),
            grid: true,
        };
        assert_eq!(serde_json::to_value(&axis).unwrap(), json!({"title": false, "grid": true}));

        let axis = AxisSpec { title: None, grid: false };
        assert_eq!(serde_json::to_value(&axis).unwrap(), json!({"grid": false}));
    }
}
