//! Chart configuration and compilation for streamviz
//!
//! A [`ChartConfig`] is compiled into a renderer-agnostic [`CompiledSpec`] by
//! pure per-family rules.

pub mod compile;
pub mod config;
pub mod spec;

pub use compile::compile;
pub use config::{ChartConfig, ChartFamily};
pub use spec::CompiledSpec;

use thiserror::Error;

/// Errors raised while loading or compiling a chart configuration
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("{family} chart requires a '{role}' field binding")]
    MissingFieldBinding {
        family: ChartFamily,
        role: &'static str,
    },

    #[error("Unknown chart family: '{0}'")]
    UnknownChartFamily(String),

    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
