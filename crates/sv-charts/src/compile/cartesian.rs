//! Line, area, bar and column charts

use crate::config::{BarConfig, ChartFamily, GroupType, LineConfig, LineStyle};
use crate::spec::{channel, CompiledSpec, CoordinateSpec, Mark, MarkType, ScaleSpec, TransformSpec};

use super::{
    cartesian_axes, data_labels, finish, legend, optional, required, time_scale, value_scale,
    Layers, Result,
};

/// Padding between bands on a categorical axis
const BAND_PADDING: f64 = 0.1;

pub(super) fn compile_line(family: ChartFamily, config: &LineConfig) -> Result<CompiledSpec> {
    let x = required(family, "xAxis", &config.x_axis)?;
    let y = required(family, "yAxis", &config.y_axis)?;
    let color = optional(&config.color);

    let kind = match family {
        ChartFamily::Area => MarkType::Area,
        _ => MarkType::Line,
    };
    let position = Mark::new(kind)
        .encode_field(channel::X, x)
        .encode_field(channel::Y, y)
        .encode_optional(channel::COLOR, color);

    let mut main = position
        .clone()
        .labels(data_labels(config.data_label, config.show_all, y))
        .tooltip([Some(x), Some(y), color].into_iter().flatten());
    match config.line_style {
        Some(LineStyle::Curve) => main = main.style("shape", "smooth"),
        Some(LineStyle::Straight) => main = main.style("shape", "line"),
        None => {}
    }

    let mut marks = vec![main];
    if kind == MarkType::Line && config.points {
        marks.push(Mark {
            kind: MarkType::Point,
            ..position
        });
    }

    let mut layers = Layers::new(marks)
        .scale(channel::X, time_scale(&config.axes))
        .scale(channel::Y, value_scale(&config.axes));
    if kind == MarkType::Area && color.is_some() {
        layers.transforms.push(TransformSpec::StackY);
    }
    layers.axes = cartesian_axes(&config.axes);
    layers.legend = legend(config.options.legend.as_ref(), color.is_some());

    finish(family, &config.options, Some(x), layers)
}

pub(super) fn compile_bar(family: ChartFamily, config: &BarConfig) -> Result<CompiledSpec> {
    let x = required(family, "xAxis", &config.x_axis)?;
    let y = required(family, "yAxis", &config.y_axis)?;
    let color = optional(&config.color);

    let bars = Mark::new(MarkType::Interval)
        .encode_field(channel::X, x)
        .encode_field(channel::Y, y)
        .encode_optional(channel::COLOR, color)
        .labels(data_labels(config.data_label, config.show_all, y))
        .tooltip([Some(x), Some(y), color].into_iter().flatten());

    let mut layers = Layers::new(vec![bars])
        .scale(channel::X, ScaleSpec::band(BAND_PADDING))
        .scale(channel::Y, value_scale(&config.axes));
    if color.is_some() {
        layers.transforms.push(match config.group_type.unwrap_or_default() {
            GroupType::Stack => TransformSpec::StackY,
            GroupType::Dodge => TransformSpec::DodgeX,
        });
    }
    if family == ChartFamily::Bar {
        layers.coordinate = Some(CoordinateSpec::transposed());
    }
    layers.axes = cartesian_axes(&config.axes);
    layers.legend = legend(config.options.legend.as_ref(), color.is_some());

    finish(family, &config.options, Some(x), layers)
}

#[cfg(test)]
mod tests {
    use super::super::tests::compile_json;
    use crate::spec::{CoordinateTransform, Encoding, MarkType, Toggle, TooltipSpec, TransformSpec};
    use serde_json::json;

    #[test]
    fn test_line_with_point_overlay() {
        let spec = compile_json(json!({
            "type": "line", "xAxis": "t", "yAxis": "v", "color": "host", "points": true, "lineStyle": "curve"
        }))
        .unwrap();

        assert_eq!(spec.marks.len(), 2);
        let (line, points) = (&spec.marks[0], &spec.marks[1]);
        assert_eq!(line.kind, MarkType::Line);
        assert_eq!(line.style.get("shape"), Some(&json!("smooth")));
        assert_eq!(
            line.tooltip,
            Toggle::On(TooltipSpec {
                items: vec!["t".into(), "v".into(), "host".into()]
            })
        );

        assert_eq!(points.kind, MarkType::Point);
        assert_eq!(points.encode, line.encode);
        assert!(points.style.is_empty());
        assert_eq!(points.tooltip, Toggle::Off);

        assert!(spec.transforms.is_empty());
    }

    #[test]
    fn test_line_styles() {
        let straight = compile_json(json!({
            "type": "line", "xAxis": "t", "yAxis": "v", "lineStyle": "straight"
        }))
        .unwrap();
        assert_eq!(straight.marks[0].style.get("shape"), Some(&json!("line")));

        let area = compile_json(json!({"type": "area", "xAxis": "t", "yAxis": "v", "points": true})).unwrap();
        assert_eq!(area.marks.len(), 1);
        assert_eq!(area.marks[0].kind, MarkType::Area);
        assert!(area.marks[0].style.get("shape").is_none());
        assert!(area.transforms.is_empty());
    }

    #[test]
    fn test_bar_is_transposed_column_is_not() {
        let bar = compile_json(json!({"type": "bar", "xAxis": "k", "yAxis": "v"})).unwrap();
        let coordinate = bar.coordinate.unwrap();
        assert_eq!(coordinate.transform, [CoordinateTransform::Transpose]);
        assert!(bar.transforms.is_empty());

        let column = compile_json(json!({"type": "column", "xAxis": "k", "yAxis": "v"})).unwrap();
        assert!(column.coordinate.is_none());
        assert_eq!(column.marks[0].encode["x"], Encoding::Field("k".into()));
    }

    #[test]
    fn test_stacked_column() {
        let spec = compile_json(json!({
            "type": "column", "xAxis": "k", "yAxis": "v", "color": "kind", "groupType": "stack"
        }))
        .unwrap();

        assert_eq!(spec.transforms, [TransformSpec::StackY]);
        assert_eq!(spec.marks[0].encode["color"], Encoding::Field("kind".into()));
        assert_eq!(
            serde_json::to_value(&spec.marks[0].encode).unwrap(),
            json!({"color": "kind", "x": "k", "y": "v"})
        );
        assert!(spec.legend.is_on());
    }
}
