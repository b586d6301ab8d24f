//! Committing an ingested table against what is already stored.
//!
//! An upload for a `(season, gate)` that already has records is refused
//! unless the caller confirms the overwrite. A confirmed overwrite deletes
//! every existing record for the key, flushes, then inserts the new set, so
//! a partially overlapping re-upload replaces the old dataset rather than
//! merging into it.

use serde::Serialize;

use super::store::ProbabilityStore;
use super::ProbabilityRecord;
use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub season: i32,
    pub gate_id: DbId,
    /// Records written by this upload.
    pub inserted: usize,
    /// Previously stored records removed by this upload.
    pub replaced: u64,
}

/// Store `records` as the complete dataset for `(season, gate_id)`.
pub async fn commit_upload(
    store: &dyn ProbabilityStore,
    season: i32,
    gate_id: DbId,
    records: &[ProbabilityRecord],
    overwrite: bool,
) -> Result<UploadOutcome, CoreError> {
    let mut tx = store.begin(season, gate_id).await?;
    let existing = tx.find_by_key(season, gate_id).await?;

    if !existing.is_empty() && !overwrite {
        return Err(CoreError::Conflict(format!(
            "Grilse probabilities already exist for season {season} and gate {gate_id}; \
             resubmit with overwrite=true to replace them"
        )));
    }

    let replaced = if existing.is_empty() {
        0
    } else {
        let deleted = tx.delete_all(&existing).await?;
        tx.flush().await?;
        tracing::info!(season, gate_id, deleted, "Removed existing grilse probabilities");
        deleted
    };

    tx.insert_all(records).await?;
    tx.commit().await?;

    tracing::info!(
        season,
        gate_id,
        inserted = records.len(),
        replaced,
        "Stored grilse probabilities"
    );

    Ok(UploadOutcome {
        season,
        gate_id,
        inserted: records.len(),
        replaced,
    })
}
