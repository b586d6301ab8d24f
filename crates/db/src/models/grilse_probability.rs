//! Row model for `grilse_probabilities`.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use salmon_core::grilse::{ProbabilityRecord, StoredProbability};
use salmon_core::types::{DbId, Timestamp};

/// A row from the `grilse_probabilities` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GrilseProbability {
    pub id: DbId,
    pub season: i32,
    pub gate_id: DbId,
    pub month: i32,
    pub mass_lbs: i32,
    pub probability: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GrilseProbability {
    pub fn record(&self) -> ProbabilityRecord {
        ProbabilityRecord {
            season: self.season,
            gate_id: self.gate_id,
            month: self.month,
            mass_lbs: self.mass_lbs,
            probability: self.probability,
        }
    }
}

impl From<GrilseProbability> for StoredProbability {
    fn from(row: GrilseProbability) -> Self {
        StoredProbability {
            id: row.id,
            record: row.record(),
        }
    }
}

impl From<GrilseProbability> for ProbabilityRecord {
    fn from(row: GrilseProbability) -> Self {
        row.record()
    }
}
