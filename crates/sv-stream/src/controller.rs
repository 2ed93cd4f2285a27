//! Streaming controller implementation

use std::sync::{Arc, Weak};
use std::time::Duration;

use sv_charts::{compile, ChartConfig, CompileError, CompiledSpec};
use sv_core::{
    ColumnDescriptor, Row, StreamMode, StreamSource, StreamingPolicy, TemporalBinding,
    TemporalMode, TemporalRange,
};
use sv_data::{resolve, NormalizedBatch, Normalizer, ResolvedView, StreamBuffer};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::subscriber::{ViewSubscriber, ViewUpdate};
use crate::throttle::Throttle;

/// Outcome of one ingestion call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Rows normalized and buffered
    pub accepted: usize,
    /// Rows skipped by the normalizer
    pub rejected: usize,
    /// Buffered rows dropped by the capacity limit
    pub evicted: usize,
}

/// Owns the data path of a single chart instance
pub struct StreamingController {
    spec: Arc<CompiledSpec>,
    binding: TemporalBinding,
    normalizer: Normalizer,
    buffer: StreamBuffer,
    throttle: Throttle,
    /// Static sources notify on every change
    live: bool,
    subscribers: Vec<Weak<dyn ViewSubscriber>>,
}

impl StreamingController {
    /// Compile the chart and set up an empty buffer.
    ///
    /// Fails before any data is accepted when the configuration does not
    /// compile.
    pub fn new(columns: Vec<ColumnDescriptor>, config: &ChartConfig) -> Result<Self, CompileError> {
        let spec = compile(config)?;
        info!(
            "Creating streaming controller for {} chart ({} columns, capacity {})",
            config.family(),
            columns.len(),
            spec.streaming.max_items
        );

        // No binding: show everything in the buffer
        let binding = spec.temporal.clone().unwrap_or(TemporalBinding {
            mode: TemporalMode::Axis,
            field: None,
            range: TemporalRange::Infinite,
        });

        Ok(Self {
            binding,
            normalizer: Normalizer::new(columns),
            buffer: StreamBuffer::new(spec.streaming.max_items),
            throttle: Throttle::new(spec.streaming.throttle),
            live: true,
            subscribers: Vec::new(),
            spec: Arc::new(spec),
        })
    }

    /// Build a controller from a source snapshot and load its rows.
    ///
    /// A source that is not live gets no throttling.
    pub fn from_source(source: StreamSource, config: &ChartConfig) -> Result<Self, CompileError> {
        let mut controller = Self::new(source.columns, config)?;
        controller.live = source.is_live;
        let summary = controller.replace(source.rows);
        debug!(
            "Loaded source: {} rows accepted, {} rejected (live: {})",
            summary.accepted, summary.rejected, source.is_live
        );
        Ok(controller)
    }

    pub fn spec(&self) -> &Arc<CompiledSpec> {
        &self.spec
    }

    pub fn binding(&self) -> &TemporalBinding {
        &self.binding
    }

    pub fn policy(&self) -> &StreamingPolicy {
        &self.spec.streaming
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.normalizer.columns()
    }

    /// Number of buffered rows
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn throttle_interval(&self) -> Duration {
        self.throttle.interval()
    }

    /// When the throttle window closes; a pending notification is due then
    pub fn throttle_reopens_at(&self) -> Option<Instant> {
        self.throttle.reopens_at()
    }

    /// Whether a throttled notification is waiting
    pub fn has_pending(&self) -> bool {
        self.throttle.is_pending()
    }

    /// Add a subscriber; it is held weakly and dropped once released
    pub fn subscribe(&mut self, subscriber: Arc<dyn ViewSubscriber>) {
        self.subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Number of subscribers still alive
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Resolve the current buffer contents
    pub fn current_view(&self) -> ResolvedView {
        resolve(&self.buffer.snapshot(), &self.binding)
    }

    pub fn append(&mut self, rows: Vec<Row>) -> IngestSummary {
        self.append_at(rows, Instant::now())
    }

    pub fn append_at(&mut self, rows: Vec<Row>, now: Instant) -> IngestSummary {
        let batch = self.normalizer.normalize_batch(rows);
        let mut summary = summarize(&batch);
        summary.evicted = self.buffer.append(batch.records);
        self.changed(now);
        summary
    }

    pub fn replace(&mut self, rows: Vec<Row>) -> IngestSummary {
        self.replace_at(rows, Instant::now())
    }

    /// Swap the buffer contents for a new batch, kept in the order given
    pub fn replace_at(&mut self, rows: Vec<Row>, now: Instant) -> IngestSummary {
        let batch = self.normalizer.normalize_batch(rows);
        let mut summary = summarize(&batch);
        summary.evicted = self.buffer.replace(batch.records);
        self.changed(now);
        summary
    }

    /// Ingest rows using the chart's streaming mode
    pub fn push(&mut self, rows: Vec<Row>) -> IngestSummary {
        self.push_at(rows, Instant::now())
    }

    pub fn push_at(&mut self, rows: Vec<Row>, now: Instant) -> IngestSummary {
        match self.spec.streaming.mode {
            StreamMode::Append => self.append_at(rows, now),
            StreamMode::Replace => self.replace_at(rows, now),
        }
    }

    pub fn clear(&mut self) {
        self.clear_at(Instant::now())
    }

    /// Empty the buffer and notify right away, dropping any pending update
    pub fn clear_at(&mut self, now: Instant) {
        self.buffer.clear();
        self.throttle.fire(now);
        self.notify();
    }

    /// Send a throttled notification if its window has elapsed
    pub fn flush_due(&mut self) -> bool {
        self.flush_due_at(Instant::now())
    }

    pub fn flush_due_at(&mut self, now: Instant) -> bool {
        if !self.throttle.poll(now) {
            return false;
        }
        self.notify();
        true
    }

    fn changed(&mut self, now: Instant) {
        if !self.live {
            self.throttle.fire(now);
            self.notify();
        } else if self.throttle.request(now) {
            self.notify();
        }
    }

    fn notify(&mut self) {
        // Remove any dead weak references
        self.subscribers.retain(|weak| weak.strong_count() > 0);
        if self.subscribers.is_empty() {
            return;
        }

        let update = ViewUpdate {
            view: Arc::new(self.current_view()),
            spec: Arc::clone(&self.spec),
        };
        debug!(
            "Notifying {} subscribers: {} rows (version {})",
            self.subscribers.len(),
            update.view.len(),
            update.view.version
        );

        for weak in &self.subscribers {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_view_update(&update);
            }
        }
    }
}

fn summarize(batch: &NormalizedBatch) -> IngestSummary {
    IngestSummary {
        accepted: batch.records.len(),
        rejected: batch.rejected.len(),
        evicted: 0,
    }
}
