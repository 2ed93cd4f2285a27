//! Core data model for the streaming visualization engine
//!
//! This crate provides the column schema, row and record types, and the
//! temporal and streaming declarations shared by the data path and the
//! chart compiler.

pub mod duration;
pub mod record;
pub mod schema;
pub mod streaming;
pub mod temporal;

// Re-export commonly used types
pub use record::{temporal_millis, FieldName, Record, Row};
pub use schema::{ColumnDescriptor, SemanticType};
pub use streaming::{StreamMode, StreamSource, StreamingPolicy, DEFAULT_MAX_ITEMS, DEFAULT_THROTTLE};
pub use temporal::{FieldSelector, TemporalBinding, TemporalMode, TemporalRange};
