//! Grilse probability reference data.
//!
//! A grilse probability table gives, for each fish weight (whole pounds) and
//! calendar month, the probability that a salmon caught at a measurement
//! gate is a grilse. Tables are uploaded per `(season, gate)`, validated in
//! two passes, stored sparsely (zero probabilities are never materialized)
//! and exported for reporting.

pub mod export;
pub mod ingest;
pub mod overwrite;
pub mod store;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub use ingest::{ingest_table, ParsedTable};
pub use overwrite::{commit_upload, UploadOutcome};
pub use store::{MemoryProbabilityStore, ProbabilityStore, ProbabilityTx, StoreError};

/// One `(season, gate, month, weight)` probability. `0 < probability < 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityRecord {
    pub season: i32,
    pub gate_id: DbId,
    /// Calendar month, 1-based.
    pub month: i32,
    pub mass_lbs: i32,
    pub probability: Decimal,
}

/// A record as held by a store, with its row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredProbability {
    pub id: DbId,
    #[serde(flatten)]
    pub record: ProbabilityRecord,
}

/// Every defect an uploaded table can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableErrorCode {
    DuplicateHeaders,
    ColumnDisallowed,
    MissingWeightHeader,
    MissingMonthHeader,
    DuplicateWeight,
    NotWholeNumber,
    RowHeaderDiscrepancy,
    InvalidProbability,
}

/// A located table defect. `row` 0 is the header row; data rows and columns
/// are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableViolation {
    pub code: TableErrorCode,
    pub row: usize,
    pub column: usize,
}

impl TableViolation {
    pub fn new(code: TableErrorCode, row: usize, column: usize) -> Self {
        Self { code, row, column }
    }
}
