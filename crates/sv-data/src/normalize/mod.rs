//! Conversion of incoming rows into canonical records

use serde_json::Value;
use sv_core::{ColumnDescriptor, Record, Row};
use tracing::{debug, warn};

use crate::DataError;

/// Normalizes rows against a column schema
#[derive(Debug, Clone)]
pub struct Normalizer {
    columns: Vec<ColumnDescriptor>,
}

/// Result of normalizing a batch
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    /// Accepted records, in input order
    pub records: Vec<Record>,

    /// Rows that could not be normalized
    pub rejected: Vec<RowRejection>,
}

/// A row rejected during normalization
#[derive(Debug)]
pub struct RowRejection {
    /// Position of the row in its batch
    pub index: usize,
    pub error: DataError,
}

impl Normalizer {
    /// Create a normalizer for the given schema
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Normalize a single row
    pub fn normalize(&self, row: Row) -> Result<Record, DataError> {
        let record: Record = match row {
            Row::Positional(values) => {
                if values.len() != self.columns.len() {
                    return Err(DataError::SchemaMismatch {
                        expected: self.columns.len(),
                        actual: values.len(),
                    });
                }
                self.columns
                    .iter()
                    .map(|column| column.name.clone())
                    .zip(values)
                    .collect()
            }
            // Unknown fields pass through untouched
            Row::Keyed(fields) => Record::from(fields),
        };

        self.check_required(&record);
        Ok(record)
    }

    /// Normalize a batch; bad rows are skipped, not fatal to the batch
    pub fn normalize_batch(&self, rows: Vec<Row>) -> NormalizedBatch {
        let mut batch = NormalizedBatch {
            records: Vec::with_capacity(rows.len()),
            rejected: Vec::new(),
        };

        for (index, row) in rows.into_iter().enumerate() {
            match self.normalize(row) {
                Ok(record) => batch.records.push(record),
                Err(error) => {
                    warn!("Rejecting row {}: {}", index, error);
                    batch.rejected.push(RowRejection { index, error });
                }
            }
        }

        batch
    }

    fn check_required(&self, record: &Record) {
        for column in self.columns.iter().filter(|c| !c.nullable) {
            if record.get(&column.name).map_or(true, Value::is_null) {
                debug!("Non-nullable column '{}' is missing or null", column.name);
            }
        }
    }
}
