//! Declarative chart configuration
//!
//! Configurations arrive as JSON objects tagged by `type` with camelCase keys.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::CompileError;

mod families;
mod options;

pub use families::{BarConfig, GeoConfig, LineConfig, OhlcConfig, SingleValueConfig, TableConfig};
pub use options::{
    AxisOptions, ChartOptions, GroupType, LegendOption, LegendOptions, LineStyle, TitleOption,
    ValueRange,
};

/// Chart family named by a configuration's `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartFamily {
    Line,
    Area,
    Bar,
    Column,
    SingleValue,
    Table,
    Geo,
    Ohlc,
    Candlestick,
}

impl ChartFamily {
    pub const ALL: [ChartFamily; 9] = [
        ChartFamily::Line,
        ChartFamily::Area,
        ChartFamily::Bar,
        ChartFamily::Column,
        ChartFamily::SingleValue,
        ChartFamily::Table,
        ChartFamily::Geo,
        ChartFamily::Ohlc,
        ChartFamily::Candlestick,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartFamily::Line => "line",
            ChartFamily::Area => "area",
            ChartFamily::Bar => "bar",
            ChartFamily::Column => "column",
            ChartFamily::SingleValue => "singleValue",
            ChartFamily::Table => "table",
            ChartFamily::Geo => "geo",
            ChartFamily::Ohlc => "ohlc",
            ChartFamily::Candlestick => "candlestick",
        }
    }
}

impl fmt::Display for ChartFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartFamily {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| CompileError::UnknownChartFamily(s.to_string()))
    }
}

/// A chart configuration for one family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartConfig {
    Line(LineConfig),
    Area(LineConfig),
    Bar(BarConfig),
    Column(BarConfig),
    SingleValue(SingleValueConfig),
    Table(TableConfig),
    Geo(GeoConfig),
    Ohlc(OhlcConfig),
    Candlestick(OhlcConfig),
}

impl ChartConfig {
    pub fn family(&self) -> ChartFamily {
        match self {
            ChartConfig::Line(_) => ChartFamily::Line,
            ChartConfig::Area(_) => ChartFamily::Area,
            ChartConfig::Bar(_) => ChartFamily::Bar,
            ChartConfig::Column(_) => ChartFamily::Column,
            ChartConfig::SingleValue(_) => ChartFamily::SingleValue,
            ChartConfig::Table(_) => ChartFamily::Table,
            ChartConfig::Geo(_) => ChartFamily::Geo,
            ChartConfig::Ohlc(_) => ChartFamily::Ohlc,
            ChartConfig::Candlestick(_) => ChartFamily::Candlestick,
        }
    }

    /// Options shared by every family
    pub fn options(&self) -> &ChartOptions {
        match self {
            ChartConfig::Line(c) | ChartConfig::Area(c) => &c.options,
            ChartConfig::Bar(c) | ChartConfig::Column(c) => &c.options,
            ChartConfig::SingleValue(c) => &c.options,
            ChartConfig::Table(c) => &c.options,
            ChartConfig::Geo(c) => &c.options,
            ChartConfig::Ohlc(c) | ChartConfig::Candlestick(c) => &c.options,
        }
    }

    /// Parse a configuration from a JSON value.
    ///
    /// The `type` tag is checked first so an unknown family is reported as
    /// such rather than as a generic parse failure. A missing tag reports an
    /// empty family name.
    pub fn from_value(value: Value) -> Result<Self, CompileError> {
        let tag = value.get("type").and_then(Value::as_str).unwrap_or_default();
        tag.parse::<ChartFamily>()?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CompileError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart configuration {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Invalid chart configuration {}", path.display()))?;
        info!("Loaded {} chart configuration from {:?}", config.family(), path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;
    use sv_core::{StreamMode, TemporalBinding, TemporalRange};

    #[test]
    fn test_parse_line_config() {
        let config = ChartConfig::from_value(json!({
            "type": "line",
            "xAxis": "time",
            "yAxis": "cpu",
            "color": "host",
            "lineStyle": "curve",
            "points": true,
            "xAxisTitle": false,
            "yRange": {"min": 0, "max": 100},
            "legend": {"position": "top"},
            "temporal": {"mode": "axis", "field": "time", "range": 5},
            "streaming": {"maxItems": 500, "throttle": "250ms"}
        }))
        .unwrap();

        let ChartConfig::Line(line) = &config else {
            panic!("expected a line config, got {:?}", config);
        };
        assert_eq!(line.x_axis.as_deref(), Some("time"));
        assert_eq!(line.line_style, Some(LineStyle::Curve));
        assert!(line.points);
        assert_eq!(line.axes.x_axis_title, Some(TitleOption::Shown(false)));
        assert_eq!(line.axes.y_range.and_then(|r| r.domain()), Some([0.0, 100.0]));
        assert_eq!(
            line.options.temporal,
            Some(TemporalBinding::axis("time", TemporalRange::minutes(5)))
        );

        let streaming = line.options.streaming.clone().unwrap();
        assert_eq!(streaming.max_items, 500);
        assert_eq!(streaming.mode, StreamMode::Append);
        assert_eq!(streaming.throttle, Duration::from_millis(250));
    }

    #[test]
    fn test_families_by_tag() {
        for family in ChartFamily::ALL {
            let config = ChartConfig::from_value(json!({"type": family.as_str()})).unwrap();
            assert_eq!(config.family(), family);
        }
    }

    #[test]
    fn test_unknown_family() {
        let err = ChartConfig::from_json_str(r#"{"type": "radar", "xAxis": "a"}"#).unwrap_err();
        assert!(matches!(err, CompileError::UnknownChartFamily(ref name) if name == "radar"));

        let err = ChartConfig::from_value(json!({"xAxis": "a"})).unwrap_err();
        assert!(matches!(err, CompileError::UnknownChartFamily(ref name) if name.is_empty()));
    }

    #[test]
    fn test_invalid_config() {
        let err = ChartConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CompileError::InvalidConfig(_)));

        let err = ChartConfig::from_value(json!({"type": "bar", "groupType": "sideways"})).unwrap_err();
        assert!(matches!(err, CompileError::InvalidConfig(_)));
    }

    #[test]
    fn test_wire_round_trip() {
        let wire = json!({
            "type": "candlestick",
            "xAxis": "day",
            "open": "o",
            "high": "h",
            "low": "l",
            "close": "c",
            "dateFormat": "YYYY-MM-DD",
            "theme": "dark"
        });

        let config = ChartConfig::from_value(wire.clone()).unwrap();
        assert_eq!(serde_json::to_value(&config).unwrap(), wire);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "singleValue", "field": "temperature", "unit": "°C"}}"#).unwrap();

        let config = ChartConfig::from_path(file.path()).unwrap();
        let ChartConfig::SingleValue(single) = config else {
            panic!("expected a single value config");
        };
        assert_eq!(single.field.as_deref(), Some("temperature"));
        assert_eq!(single.unit.as_deref(), Some("°C"));

        let missing = ChartConfig::from_path("/nonexistent/chart.json").unwrap_err();
        assert!(missing.to_string().contains("Failed to read chart configuration"));
    }
}
