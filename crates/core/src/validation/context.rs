//! Validation context shared by the entity validators.

use chrono::NaiveDate;

use super::rules::{FieldViolation, ViolationCollector, ViolationSink};
use crate::error::CoreError;
use crate::reference::ReferenceData;

/// Everything an entity check may consult, plus the violations it records.
pub struct EntityContext<'r> {
    pub reference: &'r ReferenceData,
    /// The season the entity is being submitted for.
    pub season: i32,
    /// "Today", used for not-in-the-future checks.
    pub today: NaiveDate,
    violations: ViolationCollector,
}

impl<'r> EntityContext<'r> {
    pub fn new(reference: &'r ReferenceData, season: i32, today: NaiveDate) -> Self {
        Self {
            reference,
            season,
            today,
            violations: ViolationCollector::new(),
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        self.violations.violations()
    }

    /// Turn the outcome of a chain into a result carrying every violation.
    pub fn finish(self, valid: bool) -> Result<(), CoreError> {
        if valid && self.violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidEntity(self.violations.into_violations()))
        }
    }
}

impl ViolationSink for EntityContext<'_> {
    fn record(&mut self, violation: FieldViolation) {
        self.violations.record(violation);
    }
}
