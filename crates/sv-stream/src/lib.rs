//! Streaming glue for streamviz charts
//!
//! A [`StreamingController`] owns one chart instance: it compiles the chart
//! configuration, normalizes and buffers incoming rows, resolves the temporal
//! view and notifies subscribers at most once per throttle window.

pub mod controller;
pub mod driver;
pub mod subscriber;
pub mod throttle;

pub use controller::{IngestSummary, StreamingController};
pub use driver::{spawn_throttle_driver, SharedController};
pub use subscriber::{ViewSubscriber, ViewUpdate};
pub use throttle::Throttle;

pub use sv_charts::CompileError;
