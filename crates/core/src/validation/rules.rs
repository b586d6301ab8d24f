//! Violation types shared by every rule chain.

use serde::{Deserialize, Serialize};

/// A single coded, located rule failure.
///
/// `code` is the validator prefix joined to a check-specific suffix
/// (e.g. `CATCH_DATE_REQUIRED`). `path` names the offending input field,
/// including indexed paths such as `counts[1].method`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub code: String,
    pub path: String,
}

/// Anything a check can report violations into.
pub trait ViolationSink {
    fn record(&mut self, violation: FieldViolation);
}

/// Plain ordered collector of violations.
#[derive(Debug, Default)]
pub struct ViolationCollector {
    violations: Vec<FieldViolation>,
}

impl ViolationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl ViolationSink for ViolationCollector {
    fn record(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }
}
