//! Loads the reference tables into a [`ReferenceData`] snapshot.

use sqlx::PgPool;
use salmon_core::reference::{ReferenceData, ReferenceItem};
use salmon_core::types::DbId;

use super::GateRepo;

pub struct ReferenceRepo;

impl ReferenceRepo {
    pub async fn load(pool: &PgPool) -> Result<ReferenceData, sqlx::Error> {
        let gates = GateRepo::list(pool)
            .await?
            .into_iter()
            .map(ReferenceItem::from)
            .collect();
        let species = Self::named_rows(pool, "species").await?;
        let methods = Self::named_rows(pool, "methods").await?;
        let rivers = Self::named_rows(pool, "rivers").await?;

        tracing::debug!(
            species = species.len(),
            methods = methods.len(),
            rivers = rivers.len(),
            "Loaded reference data",
        );
        Ok(ReferenceData::new(gates, species, methods, rivers))
    }

    /// `table` is interpolated into the query, so it must be a fixed name.
    async fn named_rows(
        pool: &PgPool,
        table: &'static str,
    ) -> Result<Vec<ReferenceItem>, sqlx::Error> {
        let query = format!("SELECT id, name FROM {table} ORDER BY id");
        let rows = sqlx::query_as::<_, (DbId, String)>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| ReferenceItem::new(id, name))
            .collect())
    }
}
