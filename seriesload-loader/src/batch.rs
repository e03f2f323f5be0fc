//! Aggregate outcome of loading a sequence of records.

use seriesload_model::Record;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadErrorKind};
use crate::loader::LoadOutcome;

/// Counters and per-record failures for one batch.
///
/// A non-zero `num_errors` does not mean the batch failed: every record is
/// attempted and reported independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub num_records: usize,
    pub num_created: usize,
    pub num_updated: usize,
    pub num_errors: usize,
    pub errors: Vec<RecordError>,
}

/// One failed record, with enough context to find it in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    pub record_name: String,
    pub record_title: String,
    pub kind: LoadErrorKind,
    pub message: String,
}

impl RecordError {
    pub fn new(record: &Record, error: &LoadError) -> Self {
        Self {
            record_name: record.name.clone(),
            record_title: record.title.clone(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_outcome(&mut self, outcome: &LoadOutcome) {
        self.num_records += 1;
        match outcome {
            LoadOutcome::Created(_) => self.num_created += 1,
            LoadOutcome::Updated(_) => self.num_updated += 1,
        }
    }

    pub(crate) fn record_error(&mut self, record: &Record, error: &LoadError) {
        self.num_records += 1;
        self.num_errors += 1;
        self.errors.push(RecordError::new(record, error));
    }

    /// Number of records that were created or updated.
    pub fn num_succeeded(&self) -> usize {
        self.num_created + self.num_updated
    }

    pub fn is_clean(&self) -> bool {
        self.num_errors == 0
    }
}
