use crate::grilse::{StoreError, TableViolation};
use crate::mass::MassError;
use crate::range_filter::RangeFilterError;
use crate::types::DbId;
use crate::validation::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Every structural or row-level defect found in an uploaded table.
    #[error("Uploaded table is invalid: {} violation(s)", .0.len())]
    InvalidTable(Vec<TableViolation>),

    /// Every rule-chain violation found on a submitted entity.
    #[error("Entity is invalid: {} violation(s)", .0.len())]
    InvalidEntity(Vec<FieldViolation>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RangeFilterError> for CoreError {
    fn from(err: RangeFilterError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<MassError> for CoreError {
    fn from(err: MassError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
