use crate::config::{ChartFamily, TableConfig};
use crate::spec::{CompiledSpec, Mark, MarkType};

use super::{finish, Layers, Result};

/// One `cell` mark with a channel per declared column. An empty column list
/// leaves the choice of columns to the renderer.
pub(super) fn compile(config: &TableConfig) -> Result<CompiledSpec> {
    let columns: Vec<&str> = config
        .columns
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();

    let mut cells = Mark::new(MarkType::Cell);
    for column in &columns {
        cells = cells.encode_field(column, column);
    }
    if let Some(page_size) = config.page_size {
        cells = cells.style("pageSize", page_size);
    }

    finish(
        ChartFamily::Table,
        &config.options,
        columns.first().copied(),
        Layers::new(vec![cells]),
    )
}
