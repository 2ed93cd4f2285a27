//! Temporal resolution of buffer snapshots
//!
//! Resolution is a pure function of a [`Snapshot`] and a [`TemporalBinding`].
//! None of the edge cases are errors: empty snapshots give empty views, rows
//! without a usable temporal value drop out of axis and frame results, and
//! rows missing a key component form their own group.

use std::fmt::Write as _;
use std::sync::Arc;

use ahash::AHashMap;
use serde_json::Value;
use sv_core::{FieldName, Record, TemporalBinding, TemporalMode, TemporalRange};
use tracing::debug;

use crate::buffer::Snapshot;

/// The finite row set handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView {
    /// Version of the snapshot this view was computed from
    pub version: u64,

    pub mode: TemporalMode,

    /// Latest temporal value seen, for axis and frame modes
    pub reference: Option<f64>,

    pub rows: Vec<Arc<Record>>,
}

impl ResolvedView {
    fn new(snapshot: &Snapshot, mode: TemporalMode) -> Self {
        Self {
            version: snapshot.version(),
            mode,
            reference: None,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|r| r.as_ref())
    }
}

/// Resolve the rows to expose for a snapshot under a temporal binding
pub fn resolve(snapshot: &Snapshot, binding: &TemporalBinding) -> ResolvedView {
    let view = match binding.mode {
        TemporalMode::Axis => resolve_axis(snapshot, binding.time_field(), binding.range),
        TemporalMode::Frame => resolve_frame(snapshot, binding.time_field()),
        TemporalMode::Key => resolve_key(snapshot, binding.fields()),
    };
    debug!(
        "Resolved {:?} view: {} of {} rows (version {})",
        view.mode,
        view.len(),
        snapshot.len(),
        view.version
    );
    view
}

/// Latest temporal value of `field` across the snapshot
pub fn reference_time(snapshot: &Snapshot, field: &str) -> Option<f64> {
    snapshot
        .rows()
        .iter()
        .filter_map(|r| r.temporal(field))
        .fold(None, |max, t| Some(max.map_or(t, |m: f64| m.max(t))))
}

fn resolve_axis(snapshot: &Snapshot, field: Option<&str>, range: TemporalRange) -> ResolvedView {
    let mut view = ResolvedView::new(snapshot, TemporalMode::Axis);
    let reference = field.and_then(|f| reference_time(snapshot, f));
    view.reference = reference;

    let Some(width) = range.millis() else {
        // Infinite range: no windowing
        view.rows = snapshot.rows().to_vec();
        return view;
    };
    let (Some(field), Some(reference)) = (field, reference) else {
        return view;
    };

    let start = reference - width;
    view.rows = snapshot
        .rows()
        .iter()
        .filter(|r| r.temporal(field).is_some_and(|t| t >= start && t <= reference))
        .cloned()
        .collect();
    view
}

fn resolve_frame(snapshot: &Snapshot, field: Option<&str>) -> ResolvedView {
    let mut view = ResolvedView::new(snapshot, TemporalMode::Frame);
    let Some(field) = field else {
        return view;
    };
    let Some(reference) = reference_time(snapshot, field) else {
        return view;
    };

    view.reference = Some(reference);
    view.rows = snapshot
        .rows()
        .iter()
        .filter(|r| r.temporal(field) == Some(reference))
        .cloned()
        .collect();
    view
}

fn resolve_key(snapshot: &Snapshot, fields: &[FieldName]) -> ResolvedView {
    let mut view = ResolvedView::new(snapshot, TemporalMode::Key);
    let mut slots: AHashMap<String, usize> = AHashMap::new();

    // Slots keep first-appearance order; contents follow arrival order
    for row in snapshot.rows() {
        let key = group_key(row, fields);
        match slots.get(&key) {
            Some(&slot) => view.rows[slot] = Arc::clone(row),
            None => {
                slots.insert(key, view.rows.len());
                view.rows.push(Arc::clone(row));
            }
        }
    }
    view
}

/// Structural key of a row over the given fields.
///
/// Present values are encoded as JSON text, which escapes the separator, so
/// distinct tuples never collide. Numbers compare by value, so `1` and
/// `1.0` share a key. A missing component encodes differently from an
/// explicit null.
fn group_key(row: &Record, fields: &[FieldName]) -> String {
    let mut key = String::new();
    for field in fields {
        match row.get(field) {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                    let _ = write!(key, "#{}", f as i64);
                }
                Some(f) => {
                    let _ = write!(key, "#{}", f);
                }
                None => {
                    let _ = write!(key, "={}", n);
                }
            },
            Some(value) => {
                let _ = write!(key, "={}", value);
            }
            None => key.push('~'),
        }
        key.push('\u{1f}');
    }
    key
}
