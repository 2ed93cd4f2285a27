//! Capacity-bounded store of normalized rows

use std::collections::VecDeque;
use std::sync::Arc;

use sv_core::Record;
use tracing::debug;

/// Ordered, capacity-limited row store.
///
/// Rows are kept in arrival order. After any mutation completes the buffer
/// holds at most `max_items` rows; overflow is evicted from the head.
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    rows: VecDeque<Arc<Record>>,
    max_items: usize,
    /// Bumped on every mutation
    version: u64,
}

/// Immutable view of the buffer contents at one version
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    version: u64,
    rows: Vec<Arc<Record>>,
}

impl StreamBuffer {
    /// Create an empty buffer
    pub fn new(max_items: usize) -> Self {
        Self {
            rows: VecDeque::with_capacity(max_items.min(4096)),
            max_items,
            version: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Rows in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|r| r.as_ref())
    }

    /// Insert rows at the tail, then evict the oldest rows over capacity.
    ///
    /// Returns the number of evicted rows.
    pub fn append<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        self.rows.extend(rows.into_iter().map(Arc::new));
        let evicted = self.evict_overflow();
        self.version += 1;
        evicted
    }

    /// Discard all rows and insert the new batch, keeping its newest rows when
    /// the batch alone exceeds capacity.
    ///
    /// Returns the number of batch rows dropped by the cap.
    pub fn replace<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        self.rows.clear();
        self.rows.extend(rows.into_iter().map(Arc::new));
        let dropped = self.evict_overflow();
        self.version += 1;
        dropped
    }

    /// Remove all rows
    pub fn clear(&mut self) {
        self.rows.clear();
        self.version += 1;
    }

    /// Change the capacity, evicting immediately when shrinking
    pub fn set_max_items(&mut self, max_items: usize) -> usize {
        self.max_items = max_items;
        let evicted = self.evict_overflow();
        self.version += 1;
        evicted
    }

    /// Take an immutable snapshot for resolution
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            rows: self.rows.iter().cloned().collect(),
        }
    }

    fn evict_overflow(&mut self) -> usize {
        let overflow = self.rows.len().saturating_sub(self.max_items);
        if overflow > 0 {
            self.rows.drain(..overflow);
            debug!("Evicted {} rows (capacity {})", overflow, self.max_items);
        }
        overflow
    }
}

impl Snapshot {
    /// Build a snapshot directly from records
    pub fn from_records<I>(version: u64, records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        Self {
            version,
            rows: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rows(&self) -> &[Arc<Record>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
