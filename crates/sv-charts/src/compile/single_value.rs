use crate::config::{ChartFamily, SingleValueConfig};
use crate::spec::{channel, CompiledSpec, Mark, MarkType};

use super::{finish, required, Layers, Result};

pub(super) fn compile(config: &SingleValueConfig) -> Result<CompiledSpec> {
    let family = ChartFamily::SingleValue;
    let field = required(family, "field", &config.field)?;

    let mut text = Mark::new(MarkType::Text).encode_field(channel::TEXT, field);
    if let Some(label) = &config.label {
        text = text.style("label", label.as_str());
    }
    if let Some(unit) = &config.unit {
        text = text.style("unit", unit.as_str());
    }
    if let Some(precision) = config.precision {
        text = text.style("precision", precision);
    }

    finish(family, &config.options, Some(field), Layers::new(vec![text]))
}
