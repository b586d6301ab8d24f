//! Storage seam for grilse probabilities.
//!
//! Replacing a `(season, gate)` dataset happens inside a [`ProbabilityTx`]:
//! nothing is visible to readers until [`ProbabilityTx::commit`], and a
//! transaction dropped without committing changes nothing. Deletions must be
//! flushed before the following insert.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{ProbabilityRecord, StoredProbability};
use crate::range_filter::RangeInterval;
use crate::types::DbId;

/// Failure inside a store backend.
#[derive(Debug, thiserror::Error)]
#[error("Probability store error: {0}")]
pub struct StoreError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }

    pub fn message(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        Self(msg.into())
    }
}

#[async_trait]
pub trait ProbabilityStore: Send + Sync {
    /// Open a write transaction. Implementations serialize transactions that
    /// target the same `(season, gate)` key.
    async fn begin(&self, season: i32, gate_id: DbId)
        -> Result<Box<dyn ProbabilityTx>, StoreError>;

    /// Committed records whose season lies in `seasons` (all seasons when
    /// `None`), ordered by season, gate, weight and month.
    async fn find_in_seasons(
        &self,
        seasons: Option<RangeInterval>,
    ) -> Result<Vec<ProbabilityRecord>, StoreError>;
}

#[async_trait]
pub trait ProbabilityTx: Send {
    async fn find_by_key(
        &mut self,
        season: i32,
        gate_id: DbId,
    ) -> Result<Vec<StoredProbability>, StoreError>;

    async fn delete_all(&mut self, records: &[StoredProbability]) -> Result<u64, StoreError>;

    /// Make pending deletions visible to the rest of the transaction.
    async fn flush(&mut self) -> Result<(), StoreError>;

    async fn insert_all(&mut self, records: &[ProbabilityRecord]) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    next_id: DbId,
    rows: Vec<StoredProbability>,
}

/// In-process store. Writers are serialized by a single lock; readers only
/// ever see committed state.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbabilityStore {
    committed: Arc<RwLock<MemoryState>>,
    writer: Arc<Mutex<()>>,
}

impl MemoryProbabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every committed row, in insertion order.
    pub fn snapshot(&self) -> Vec<StoredProbability> {
        self.committed
            .read()
            .map(|state| state.rows.clone())
            .unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::message("memory store lock poisoned")
}

#[async_trait]
impl ProbabilityStore for MemoryProbabilityStore {
    async fn begin(
        &self,
        _season: i32,
        _gate_id: DbId,
    ) -> Result<Box<dyn ProbabilityTx>, StoreError> {
        let guard = Arc::clone(&self.writer).lock_owned().await;
        let staged = self.committed.read().map_err(poisoned)?.clone();
        Ok(Box::new(MemoryTx {
            _guard: guard,
            committed: Arc::clone(&self.committed),
            staged,
            unflushed_deletes: false,
        }))
    }

    async fn find_in_seasons(
        &self,
        seasons: Option<RangeInterval>,
    ) -> Result<Vec<ProbabilityRecord>, StoreError> {
        let state = self.committed.read().map_err(poisoned)?;
        let mut records: Vec<ProbabilityRecord> = state
            .rows
            .iter()
            .filter(|row| seasons.map_or(true, |s| s.contains(row.record.season)))
            .map(|row| row.record.clone())
            .collect();
        records.sort_by_key(|r| (r.season, r.gate_id, r.mass_lbs, r.month));
        Ok(records)
    }
}

struct MemoryTx {
    _guard: OwnedMutexGuard<()>,
    committed: Arc<RwLock<MemoryState>>,
    staged: MemoryState,
    unflushed_deletes: bool,
}

#[async_trait]
impl ProbabilityTx for MemoryTx {
    async fn find_by_key(
        &mut self,
        season: i32,
        gate_id: DbId,
    ) -> Result<Vec<StoredProbability>, StoreError> {
        Ok(self
            .staged
            .rows
            .iter()
            .filter(|row| row.record.season == season && row.record.gate_id == gate_id)
            .cloned()
            .collect())
    }

    async fn delete_all(&mut self, records: &[StoredProbability]) -> Result<u64, StoreError> {
        let before = self.staged.rows.len();
        self.staged
            .rows
            .retain(|row| !records.iter().any(|r| r.id == row.id));
        self.unflushed_deletes = true;
        Ok((before - self.staged.rows.len()) as u64)
    }

    async fn flush(&mut self) -> Result<(), StoreError> {
        self.unflushed_deletes = false;
        Ok(())
    }

    async fn insert_all(&mut self, records: &[ProbabilityRecord]) -> Result<(), StoreError> {
        if self.unflushed_deletes {
            return Err(StoreError::message("insert attempted before deletions were flushed"));
        }
        for record in records {
            let duplicate = self.staged.rows.iter().any(|row| {
                let r = &row.record;
                r.season == record.season
                    && r.gate_id == record.gate_id
                    && r.month == record.month
                    && r.mass_lbs == record.mass_lbs
            });
            if duplicate {
                return Err(StoreError::message(format!(
                    "duplicate probability for season {} gate {} month {} weight {}",
                    record.season, record.gate_id, record.month, record.mass_lbs
                )));
            }
            self.staged.next_id += 1;
            self.staged.rows.push(StoredProbability {
                id: self.staged.next_id,
                record: record.clone(),
            });
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let tx = *self;
        let mut committed = tx.committed.write().map_err(poisoned)?;
        *committed = tx.staged;
        Ok(())
    }
}
