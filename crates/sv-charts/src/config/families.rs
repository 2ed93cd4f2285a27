//! Per-family chart configurations

use serde::{Deserialize, Serialize};
use sv_core::FieldName;

use super::options::{AxisOptions, ChartOptions, GroupType, LineStyle};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Line and area charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<FieldName>,

    /// Series field; one line per distinct value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,

    /// Overlay a point at each data point
    #[serde(skip_serializing_if = "is_false")]
    pub points: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub data_label: bool,

    /// Label every point instead of only the last
    #[serde(skip_serializing_if = "is_false")]
    pub show_all: bool,

    #[serde(flatten)]
    pub axes: AxisOptions,

    #[serde(flatten)]
    pub options: ChartOptions,
}

/// Bar (horizontal) and column (vertical) charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type: Option<GroupType>,

    #[serde(skip_serializing_if = "is_false")]
    pub data_label: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub show_all: bool,

    #[serde(flatten)]
    pub axes: AxisOptions,

    #[serde(flatten)]
    pub options: ChartOptions,
}

/// A single headline number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SingleValueConfig {
    #[serde(alias = "yAxis", skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Decimal places
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    #[serde(flatten)]
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Columns to show, all when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    #[serde(flatten)]
    pub options: ChartOptions,
}

/// Points on a map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FieldName>,

    #[serde(flatten)]
    pub options: ChartOptions,
}

/// OHLC bars and candlesticks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OhlcConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<FieldName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<FieldName>,

    #[serde(flatten)]
    pub axes: AxisOptions,

    #[serde(flatten)]
    pub options: ChartOptions,
}
