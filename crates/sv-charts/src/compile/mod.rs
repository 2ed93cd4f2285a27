//! Chart compilation
//!
//! Each family has one pure compile function. Shared rules for axes, legends,
//! labels, scales and the temporal/streaming passthrough live here.

use std::collections::BTreeMap;

use sv_core::{FieldName, StreamingPolicy, TemporalBinding, DEFAULT_MAX_ITEMS};
use tracing::debug;

use crate::config::{AxisOptions, ChartConfig, ChartFamily, ChartOptions, LegendOption, TitleOption};
use crate::spec::{
    AxisSpec, AxisTitle, Axes, CompiledSpec, CoordinateSpec, LabelSelector, LabelSpec,
    LegendPosition, LegendSpec, Mark, ScaleSpec, Toggle, TransformSpec,
};
use crate::CompileError;

mod cartesian;
mod geo;
mod ohlc;
mod single_value;
mod table;

pub use ohlc::{trend, FALL, RISE};

type Result<T> = std::result::Result<T, CompileError>;

/// Compile a chart configuration into a renderer-agnostic spec.
///
/// Compilation is deterministic: equal configurations give equal specs.
pub fn compile(config: &ChartConfig) -> Result<CompiledSpec> {
    let family = config.family();
    let spec = match config {
        ChartConfig::Line(c) | ChartConfig::Area(c) => cartesian::compile_line(family, c),
        ChartConfig::Bar(c) | ChartConfig::Column(c) => cartesian::compile_bar(family, c),
        ChartConfig::SingleValue(c) => single_value::compile(c),
        ChartConfig::Table(c) => table::compile(c),
        ChartConfig::Geo(c) => geo::compile(c),
        ChartConfig::Ohlc(c) | ChartConfig::Candlestick(c) => ohlc::compile(family, c),
    }?;
    debug!(
        "Compiled {} chart with {} marks and {} transforms",
        family,
        spec.marks.len(),
        spec.transforms.len()
    );
    Ok(spec)
}

/// Family-specific parts of a compiled spec
struct Layers {
    marks: Vec<Mark>,
    scales: BTreeMap<String, ScaleSpec>,
    transforms: Vec<TransformSpec>,
    coordinate: Option<CoordinateSpec>,
    axes: Toggle<Axes>,
    legend: Toggle<LegendSpec>,
}

impl Layers {
    fn new(marks: Vec<Mark>) -> Self {
        Self {
            marks,
            scales: BTreeMap::new(),
            transforms: Vec::new(),
            coordinate: None,
            axes: Toggle::Off,
            legend: Toggle::Off,
        }
    }

    fn scale(mut self, channel: &str, scale: ScaleSpec) -> Self {
        self.scales.insert(channel.to_string(), scale);
        self
    }
}

/// Attach the options every family shares.
///
/// `primary` is the field a blank `temporal.field` falls back to.
fn finish(
    family: ChartFamily,
    options: &ChartOptions,
    primary: Option<&str>,
    layers: Layers,
) -> Result<CompiledSpec> {
    let temporal = temporal_binding(family, options, primary)?;
    let tooltip = options.tooltip.unwrap_or(true);

    let mut marks = layers.marks;
    if !tooltip {
        for mark in &mut marks {
            mark.tooltip = Toggle::Off;
        }
    }

    Ok(CompiledSpec {
        marks,
        scales: layers.scales,
        transforms: layers.transforms,
        coordinate: layers.coordinate,
        axes: layers.axes,
        legend: layers.legend,
        tooltip,
        streaming: streaming_policy(options),
        temporal,
        theme: options.theme.clone(),
        animate: options.animate.unwrap_or(false),
    })
}

/// A field binding the family cannot render without
fn required<'a>(
    family: ChartFamily,
    role: &'static str,
    field: &'a Option<FieldName>,
) -> Result<&'a str> {
    optional(field).ok_or(CompileError::MissingFieldBinding { family, role })
}

/// A field binding, ignoring blank names
fn optional(field: &Option<FieldName>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|f| !f.is_empty())
}

fn temporal_binding(
    family: ChartFamily,
    options: &ChartOptions,
    primary: Option<&str>,
) -> Result<Option<TemporalBinding>> {
    let Some(binding) = &options.temporal else {
        return Ok(None);
    };
    if binding.has_field() {
        return Ok(Some(binding.clone()));
    }
    match primary {
        Some(field) => Ok(Some(binding.with_fallback_field(field))),
        None => Err(CompileError::MissingFieldBinding {
            family,
            role: "temporal.field",
        }),
    }
}

fn streaming_policy(options: &ChartOptions) -> StreamingPolicy {
    let mut policy = options.streaming.clone().unwrap_or_default();
    if policy.max_items == 0 {
        policy.max_items = DEFAULT_MAX_ITEMS;
    }
    policy
}

fn cartesian_axes(options: &AxisOptions) -> Toggle<Axes> {
    Toggle::On(Axes {
        x: AxisSpec {
            title: axis_title(options.x_axis_title.as_ref()),
            grid: options.x_grid.unwrap_or(false),
        },
        y: AxisSpec {
            title: axis_title(options.y_axis_title.as_ref()),
            grid: options.y_grid.unwrap_or(true),
        },
    })
}

fn axis_title(option: Option<&TitleOption>) -> Option<AxisTitle> {
    match option? {
        TitleOption::Shown(false) => Some(AxisTitle::Hidden),
        TitleOption::Shown(true) => None,
        TitleOption::Text(text) => Some(AxisTitle::Text(text.clone())),
    }
}

/// Legend for a chart; without an explicit setting it follows the color binding
fn legend(option: Option<&LegendOption>, has_color: bool) -> Toggle<LegendSpec> {
    let position = match option {
        Some(LegendOption::Enabled(false)) => return Toggle::Off,
        Some(LegendOption::Enabled(true)) => LegendPosition::default(),
        Some(LegendOption::Options(options)) => options.position.unwrap_or_default(),
        None if has_color => LegendPosition::default(),
        None => return Toggle::Off,
    };
    Toggle::On(LegendSpec {
        position,
        interactive: true,
    })
}

fn data_labels(enabled: bool, show_all: bool, field: &str) -> Vec<LabelSpec> {
    if !enabled {
        return Vec::new();
    }
    vec![LabelSpec {
        text: field.to_string(),
        overlap_hide: true,
        selector: (!show_all).then_some(LabelSelector::Last),
    }]
}

fn value_scale(options: &AxisOptions) -> ScaleSpec {
    ScaleSpec::value(options.y_range.and_then(|r| r.domain()))
}

fn time_scale(options: &AxisOptions) -> ScaleSpec {
    ScaleSpec::time(options.date_format.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{MarkType, ScaleType};
    use serde_json::{json, Value};
    use std::time::Duration;
    use sv_core::{StreamMode, TemporalMode, TemporalRange};

    pub(super) fn compile_json(value: Value) -> Result<CompiledSpec> {
        compile(&ChartConfig::from_value(value)?)
    }

    #[test]
    fn test_area_with_color_always_stacks() {
        let spec = compile_json(json!({
            "type": "area", "xAxis": "t", "yAxis": "v", "color": "series"
        }))
        .unwrap();

        assert_eq!(spec.transforms, [TransformSpec::StackY]);
        assert_eq!(
            serde_json::to_value(&spec.transforms).unwrap(),
            json!([{"type": "stackY"}])
        );
    }

    #[test]
    fn test_bar_with_color_dodges_by_default() {
        let dodge = compile_json(json!({
            "type": "bar", "xAxis": "k", "yAxis": "v", "color": "type", "groupType": "dodge"
        }))
        .unwrap();
        assert_eq!(dodge.transforms, [TransformSpec::DodgeX]);

        let unset = compile_json(json!({
            "type": "bar", "xAxis": "k", "yAxis": "v", "color": "type"
        }))
        .unwrap();
        assert_eq!(unset.transforms, [TransformSpec::DodgeX]);
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let configs = [
            json!({"type": "line", "xAxis": "t", "yAxis": "v", "color": "s", "points": true, "dataLabel": true}),
            json!({"type": "column", "xAxis": "k", "yAxis": "v", "color": "s", "groupType": "stack"}),
            json!({"type": "candlestick", "xAxis": "d", "open": "o", "high": "h", "low": "l", "close": "c"}),
            json!({"type": "table", "columns": ["a", "b"], "pageSize": 20}),
        ];
        for config in configs {
            let first = compile_json(config.clone()).unwrap();
            let second = compile_json(config).unwrap();
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_missing_bindings() {
        let cases = [
            (json!({"type": "line", "yAxis": "v"}), ChartFamily::Line, "xAxis"),
            (json!({"type": "area", "xAxis": "t", "yAxis": "  "}), ChartFamily::Area, "yAxis"),
            (json!({"type": "column", "xAxis": "k"}), ChartFamily::Column, "yAxis"),
            (json!({"type": "singleValue"}), ChartFamily::SingleValue, "field"),
            (json!({"type": "geo", "longitude": "lon"}), ChartFamily::Geo, "latitude"),
            (
                json!({"type": "ohlc", "xAxis": "d", "open": "o", "high": "h", "low": "l"}),
                ChartFamily::Ohlc,
                "close",
            ),
        ];
        for (config, expected_family, expected_role) in cases {
            match compile_json(config) {
                Err(CompileError::MissingFieldBinding { family, role }) => {
                    assert_eq!(family, expected_family);
                    assert_eq!(role, expected_role);
                }
                other => panic!("expected a missing binding, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_legend_rules() {
        let legend_of = |extra: Value| {
            let mut config = json!({"type": "line", "xAxis": "t", "yAxis": "v"});
            config
                .as_object_mut()
                .unwrap()
                .extend(extra.as_object().unwrap().clone());
            compile_json(config).unwrap().legend
        };
        let bottom = Toggle::On(LegendSpec {
            position: LegendPosition::Bottom,
            interactive: true,
        });

        assert_eq!(legend_of(json!({})), Toggle::Off);
        assert_eq!(legend_of(json!({"color": "s"})), bottom);
        assert_eq!(legend_of(json!({"legend": true})), bottom);
        assert_eq!(legend_of(json!({"color": "s", "legend": false})), Toggle::Off);
        assert_eq!(
            legend_of(json!({"legend": {"position": "right"}})),
            Toggle::On(LegendSpec {
                position: LegendPosition::Right,
                interactive: true,
            })
        );
    }

    #[test]
    fn test_axes_and_scales() {
        let spec = compile_json(json!({
            "type": "line",
            "xAxis": "t",
            "yAxis": "v",
            "xAxisTitle": false,
            "yAxisTitle": "Load",
            "yGrid": false,
            "dateFormat": "HH:mm",
            "yRange": {"min": 0, "max": 1}
        }))
        .unwrap();

        let axes = spec.axes.as_ref().unwrap();
        assert_eq!(axes.x.title, Some(AxisTitle::Hidden));
        assert!(!axes.x.grid);
        assert_eq!(axes.y.title, Some(AxisTitle::Text("Load".to_string())));
        assert!(!axes.y.grid);

        assert_eq!(spec.scales["x"].kind, ScaleType::Time);
        assert_eq!(spec.scales["x"].mask.as_deref(), Some("HH:mm"));
        assert_eq!(spec.scales["y"].domain, Some([0.0, 1.0]));
        assert_eq!(spec.scales["y"].nice, None);

        let defaults = compile_json(json!({
            "type": "line", "xAxis": "t", "yAxis": "v", "yRange": {"min": 0}
        }))
        .unwrap();
        let axes = defaults.axes.as_ref().unwrap();
        assert_eq!(axes.x.title, None);
        assert!(!axes.x.grid);
        assert!(axes.y.grid);
        assert_eq!(defaults.scales["y"], ScaleSpec::value(None));
    }

    #[test]
    fn test_data_labels() {
        let last = compile_json(json!({
            "type": "line", "xAxis": "t", "yAxis": "v", "dataLabel": true
        }))
        .unwrap();
        assert_eq!(
            last.marks[0].labels,
            [LabelSpec {
                text: "v".to_string(),
                overlap_hide: true,
                selector: Some(LabelSelector::Last),
            }]
        );

        let all = compile_json(json!({
            "type": "column", "xAxis": "k", "yAxis": "v", "dataLabel": true, "showAll": true
        }))
        .unwrap();
        assert_eq!(all.marks[0].labels[0].selector, None);
    }

    #[test]
    fn test_temporal_field_falls_back_to_x_axis() {
        let spec = compile_json(json!({
            "type": "line",
            "xAxis": "timestamp",
            "yAxis": "v",
            "temporal": {"mode": "axis", "range": 1}
        }))
        .unwrap();

        assert_eq!(
            spec.temporal,
            Some(TemporalBinding::axis("timestamp", TemporalRange::minutes(1)))
        );

        let explicit = compile_json(json!({
            "type": "line",
            "xAxis": "timestamp",
            "yAxis": "v",
            "temporal": {"mode": "key", "field": ["region", "host"]}
        }))
        .unwrap();
        let binding = explicit.temporal.unwrap();
        assert_eq!(binding.mode, TemporalMode::Key);
        assert_eq!(binding.fields(), ["region", "host"]);
    }

    #[test]
    fn test_streaming_passthrough() {
        let spec = compile_json(json!({"type": "line", "xAxis": "t", "yAxis": "v"})).unwrap();
        assert_eq!(spec.streaming, StreamingPolicy::default());
        assert_eq!(spec.streaming.max_items, 1000);

        let spec = compile_json(json!({
            "type": "line",
            "xAxis": "t",
            "yAxis": "v",
            "streaming": {"maxItems": 0, "mode": "replace", "throttle": 40}
        }))
        .unwrap();
        assert_eq!(spec.streaming.max_items, 1000);
        assert_eq!(spec.streaming.mode, StreamMode::Replace);
        assert_eq!(spec.streaming.throttle, Duration::from_millis(40));
    }

    #[test]
    fn test_tooltip_off_clears_mark_tooltips() {
        let spec = compile_json(json!({
            "type": "line", "xAxis": "t", "yAxis": "v", "tooltip": false, "theme": "dark", "animate": true
        }))
        .unwrap();

        assert!(!spec.tooltip);
        assert!(spec.marks.iter().all(|m| !m.tooltip.is_on()));
        assert_eq!(spec.theme.as_deref(), Some("dark"));
        assert!(spec.animate);
    }

    #[test]
    fn test_compiled_json_shape() {
        let spec = compile_json(json!({
            "type": "column", "xAxis": "k", "yAxis": "v", "legend": false
        }))
        .unwrap();
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["marks"][0]["type"], json!("interval"));
        assert_eq!(json["marks"][0]["encode"], json!({"x": "k", "y": "v"}));
        assert_eq!(json["scales"]["x"], json!({"type": "band", "padding": 0.1}));
        assert_eq!(json["legend"], json!(false));
        assert_eq!(json["streaming"], json!({"maxItems": 1000, "mode": "append", "throttle": 100}));
        assert!(json.get("coordinate").is_none());
        assert!(json.get("temporal").is_none());
        assert_eq!(spec.marks[0].kind, MarkType::Interval);
    }
}
