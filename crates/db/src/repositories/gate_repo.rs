//! Repository for the `gates` table.

use sqlx::PgPool;

use crate::models::gate::Gate;

const COLUMNS: &str = "id, name, description, created_at, updated_at";

pub struct GateRepo;

impl GateRepo {
    /// List all gates ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Gate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gates ORDER BY id");
        sqlx::query_as::<_, Gate>(&query).fetch_all(pool).await
    }
}
