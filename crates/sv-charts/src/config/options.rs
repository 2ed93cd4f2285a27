//! Options shared by several chart families

use serde::{Deserialize, Serialize};
use sv_core::{StreamingPolicy, TemporalBinding};

use crate::spec::LegendPosition;

/// Options every family accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendOption>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalBinding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<StreamingPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
}

/// Axis options for families drawn on x/y axes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<TitleOption>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_title: Option<TitleOption>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_grid: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_grid: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<ValueRange>,

    /// Format mask for the time axis, e.g. `HH:mm:ss`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

/// `false` hides the title, a string sets it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleOption {
    Shown(bool),
    Text(String),
}

/// `false` disables the legend, `true` or an object enables it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegendOption {
    Enabled(bool),
    Options(LegendOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

/// Fixed value range for the y scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ValueRange {
    /// Scale domain, only when both ends are set
    pub fn domain(&self) -> Option<[f64; 2]> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some([min, max]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Curve,
    Straight,
}

/// How grouped bars share a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Stack,
    #[default]
    Dodge,
}
