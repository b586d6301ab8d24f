//! PostgreSQL implementation of [`ProbabilityStore`].
//!
//! A [`PgProbabilityTx`] wraps one database transaction. `begin` takes a
//! transaction-scoped advisory lock on the `(season, gate)` key so two
//! uploads for the same dataset cannot interleave; the lock is released on
//! commit or rollback.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use salmon_core::grilse::{
    ProbabilityRecord, ProbabilityStore, ProbabilityTx, StoreError, StoredProbability,
};
use salmon_core::range_filter::RangeInterval;
use salmon_core::types::DbId;

use crate::repositories::GrilseProbabilityRepo;

#[derive(Debug, Clone)]
pub struct PgProbabilityStore {
    pool: PgPool,
}

impl PgProbabilityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProbabilityStore for PgProbabilityStore {
    async fn begin(
        &self,
        season: i32,
        gate_id: DbId,
    ) -> Result<Box<dyn ProbabilityTx>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::new)?;
        sqlx::query(
            "SELECT pg_advisory_xact_lock(\
                hashtextextended(format('grilse_probabilities:%s:%s', $1::int, $2::bigint), 0))",
        )
        .bind(season)
        .bind(gate_id)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::new)?;

        tracing::debug!(season, gate_id, "Acquired grilse probability upload lock");
        Ok(Box::new(PgProbabilityTx { tx }))
    }

    async fn find_in_seasons(
        &self,
        seasons: Option<RangeInterval>,
    ) -> Result<Vec<ProbabilityRecord>, StoreError> {
        let bounds = seasons.map(|s| (s.start_year, s.end_year));
        let rows = GrilseProbabilityRepo::find_in_seasons(&self.pool, bounds)
            .await
            .map_err(StoreError::new)?;
        Ok(rows.into_iter().map(ProbabilityRecord::from).collect())
    }
}

pub struct PgProbabilityTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ProbabilityTx for PgProbabilityTx {
    async fn find_by_key(
        &mut self,
        season: i32,
        gate_id: DbId,
    ) -> Result<Vec<StoredProbability>, StoreError> {
        let rows = GrilseProbabilityRepo::find_by_key(&mut *self.tx, season, gate_id)
            .await
            .map_err(StoreError::new)?;
        Ok(rows.into_iter().map(StoredProbability::from).collect())
    }

    async fn delete_all(&mut self, records: &[StoredProbability]) -> Result<u64, StoreError> {
        let ids: Vec<DbId> = records.iter().map(|r| r.id).collect();
        GrilseProbabilityRepo::delete_by_ids(&mut *self.tx, &ids)
            .await
            .map_err(StoreError::new)
    }

    /// Statements already executed on this transaction are visible to the
    /// statements that follow, so there is nothing to push.
    async fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_all(&mut self, records: &[ProbabilityRecord]) -> Result<(), StoreError> {
        GrilseProbabilityRepo::insert_all(&mut *self.tx, records)
            .await
            .map_err(StoreError::new)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(StoreError::new)
    }
}
