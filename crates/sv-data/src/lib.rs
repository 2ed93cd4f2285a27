//! Data path for streaming charts
//!
//! Rows flow through the [`Normalizer`] into a [`StreamBuffer`], and the
//! temporal resolver derives the finite view a renderer should draw from a
//! buffer [`Snapshot`].

pub mod buffer;
pub mod export;
pub mod normalize;
pub mod temporal;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use buffer::{Snapshot, StreamBuffer};
pub use normalize::{NormalizedBatch, Normalizer, RowRejection};
pub use temporal::{resolve, ResolvedView};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Schema mismatch: expected {expected} values, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("Invalid value in column '{column}': {reason}")]
    InvalidValue { column: String, reason: String },

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
