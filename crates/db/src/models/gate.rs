use serde::Serialize;
use sqlx::FromRow;
use salmon_core::reference::ReferenceItem;
use salmon_core::types::{DbId, Timestamp};

/// A row from the `gates` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Gate {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Gate> for ReferenceItem {
    fn from(gate: Gate) -> Self {
        ReferenceItem::new(gate.id, gate.name)
    }
}
