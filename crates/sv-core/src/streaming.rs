//! Streaming policy and stream sources

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::record::Row;
use crate::schema::ColumnDescriptor;

/// Buffer capacity used when a chart does not set one
pub const DEFAULT_MAX_ITEMS: usize = 1000;

/// Minimum interval between view notifications when a chart does not set one
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// How an ingestion batch combines with the buffered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMode {
    #[default]
    Append,
    Replace,
}

/// Buffer lifecycle policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingPolicy {
    pub max_items: usize,
    pub mode: StreamMode,
    #[serde(with = "crate::duration")]
    pub throttle: Duration,
}

impl Default for StreamingPolicy {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            mode: StreamMode::Append,
            throttle: DEFAULT_THROTTLE,
        }
    }
}

impl StreamingPolicy {
    /// Set the buffer capacity
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Set the ingestion mode
    pub fn with_mode(mut self, mode: StreamMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the notification throttle
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }
}

/// A caller-owned snapshot of columns and rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSource {
    pub columns: Vec<ColumnDescriptor>,

    #[serde(default)]
    pub rows: Vec<Row>,

    /// Whether more rows are expected after this snapshot
    #[serde(default)]
    pub is_live: bool,
}
