//! OHLC and candlestick charts
//!
//! Both draw a high-low wick per period. Candlesticks add an open-close body,
//! OHLC bars add left and right ticks. Every mark is colored by the period's
//! trend.

use serde_json::Value;
use sv_core::Record;

use crate::config::{ChartFamily, OhlcConfig};
use crate::spec::{channel, CompiledSpec, ComputedFn, Mark, MarkType};

use super::{cartesian_axes, finish, legend, required, time_scale, value_scale, Layers, Result};

pub const RISE: &str = "rise";
pub const FALL: &str = "fall";

/// `"rise"` when the period closes at or above its open, `"fall"` below.
/// Rows without both prices give null.
pub fn trend(open: &str, close: &str) -> ComputedFn {
    let (open_field, close_field) = (open.to_string(), close.to_string());
    ComputedFn::new(format!("trend({},{})", open, close), move |record: &Record| {
        match (record.number(&open_field), record.number(&close_field)) {
            (Some(open), Some(close)) if close >= open => Value::from(RISE),
            (Some(_), Some(_)) => Value::from(FALL),
            _ => Value::Null,
        }
    })
}

pub(super) fn compile(family: ChartFamily, config: &OhlcConfig) -> Result<CompiledSpec> {
    let x = required(family, "xAxis", &config.x_axis)?;
    let open = required(family, "open", &config.open)?;
    let high = required(family, "high", &config.high)?;
    let low = required(family, "low", &config.low)?;
    let close = required(family, "close", &config.close)?;
    let color = trend(open, close);

    let period = |kind: MarkType| {
        Mark::new(kind)
            .encode_field(channel::X, x)
            .encode_computed(channel::COLOR, color.clone())
    };

    let wick = period(MarkType::Link)
        .encode_field(channel::Y, low)
        .encode_field(channel::Y1, high)
        .tooltip([x, open, high, low, close]);

    let marks = match family {
        ChartFamily::Candlestick => vec![
            wick,
            period(MarkType::Interval)
                .encode_field(channel::Y, open)
                .encode_field(channel::Y1, close),
        ],
        _ => vec![
            wick,
            period(MarkType::Point)
                .encode_field(channel::Y, open)
                .style("shape", "tickLeft"),
            period(MarkType::Point)
                .encode_field(channel::Y, close)
                .style("shape", "tickRight"),
        ],
    };

    let mut layers = Layers::new(marks)
        .scale(channel::X, time_scale(&config.axes))
        .scale(channel::Y, value_scale(&config.axes));
    layers.axes = cartesian_axes(&config.axes);
    layers.legend = legend(config.options.legend.as_ref(), false);

    finish(family, &config.options, Some(x), layers)
}
