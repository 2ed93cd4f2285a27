use crate::config::{ChartFamily, GeoConfig};
use crate::spec::{channel, CompiledSpec, CoordinateSpec, CoordinateType, Mark, MarkType, ScaleSpec, ScaleType};

use super::{finish, legend, optional, required, Layers, Result};

/// Points placed by longitude and latitude on a mercator projection.
///
/// A geo chart has no natural time field, so a temporal binding must name one.
pub(super) fn compile(config: &GeoConfig) -> Result<CompiledSpec> {
    let family = ChartFamily::Geo;
    let longitude = required(family, "longitude", &config.longitude)?;
    let latitude = required(family, "latitude", &config.latitude)?;
    let color = optional(&config.color);
    let size = optional(&config.size);

    let points = Mark::new(MarkType::Point)
        .encode_field(channel::X, longitude)
        .encode_field(channel::Y, latitude)
        .encode_optional(channel::COLOR, color)
        .encode_optional(channel::SIZE, size)
        .tooltip([Some(longitude), Some(latitude), color, size].into_iter().flatten());

    let mut layers = Layers::new(vec![points])
        .scale(channel::X, ScaleSpec::new(ScaleType::Linear))
        .scale(channel::Y, ScaleSpec::new(ScaleType::Linear));
    layers.coordinate = Some(CoordinateSpec::of(CoordinateType::Mercator));
    layers.legend = legend(config.options.legend.as_ref(), color.is_some());

    finish(family, &config.options, None, layers)
}
