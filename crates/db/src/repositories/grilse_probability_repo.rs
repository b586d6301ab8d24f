//! Repository for the `grilse_probabilities` table.
//!
//! Write methods take a `&mut PgConnection` so they run inside the caller's
//! transaction.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use salmon_core::grilse::ProbabilityRecord;
use salmon_core::types::DbId;

use crate::models::grilse_probability::GrilseProbability;

/// Column list for grilse_probabilities queries.
const COLUMNS: &str = "id, season, gate_id, month, mass_lbs, probability, created_at, updated_at";

pub struct GrilseProbabilityRepo;

impl GrilseProbabilityRepo {
    /// Every stored record for a `(season, gate)` dataset.
    pub async fn find_by_key(
        conn: &mut PgConnection,
        season: i32,
        gate_id: DbId,
    ) -> Result<Vec<GrilseProbability>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grilse_probabilities \
             WHERE season = $1 AND gate_id = $2 \
             ORDER BY mass_lbs, month"
        );
        sqlx::query_as::<_, GrilseProbability>(&query)
            .bind(season)
            .bind(gate_id)
            .fetch_all(conn)
            .await
    }

    /// Delete rows by id. Returns the number of rows removed.
    pub async fn delete_by_ids(conn: &mut PgConnection, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM grilse_probabilities WHERE id = ANY($1)")
            .bind(ids)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Batch-insert records in a single statement.
    pub async fn insert_all(
        conn: &mut PgConnection,
        records: &[ProbabilityRecord],
    ) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }

        let seasons: Vec<i32> = records.iter().map(|r| r.season).collect();
        let gate_ids: Vec<DbId> = records.iter().map(|r| r.gate_id).collect();
        let months: Vec<i32> = records.iter().map(|r| r.month).collect();
        let masses: Vec<i32> = records.iter().map(|r| r.mass_lbs).collect();
        let probabilities: Vec<Decimal> = records.iter().map(|r| r.probability).collect();

        let result = sqlx::query(
            "INSERT INTO grilse_probabilities \
                (season, gate_id, month, mass_lbs, probability) \
             SELECT * FROM UNNEST($1::int[], $2::bigint[], $3::int[], $4::int[], $5::numeric[])",
        )
        .bind(&seasons)
        .bind(&gate_ids)
        .bind(&months)
        .bind(&masses)
        .bind(&probabilities)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Records whose season lies in `[start, end]`, or every record when no
    /// bounds are given. Ordered by season, gate, weight, month.
    pub async fn find_in_seasons(
        pool: &PgPool,
        seasons: Option<(i32, i32)>,
    ) -> Result<Vec<GrilseProbability>, sqlx::Error> {
        let (start, end) = match seasons {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM grilse_probabilities \
             WHERE ($1::int IS NULL OR season BETWEEN $1 AND $2) \
             ORDER BY season, gate_id, mass_lbs, month"
        );
        sqlx::query_as::<_, GrilseProbability>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
