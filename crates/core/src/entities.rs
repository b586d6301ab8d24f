//! Catch-return entities submitted by anglers.
//!
//! A submission holds one activity per river fished; each activity holds
//! individually recorded catches and monthly small-catch tallies. Fields are
//! optional because they arrive straight from client input and are checked
//! by the validators in [`crate::validation`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mass::MassQuantity;
use crate::types::DbId;

/// Days fished on one river during a season.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub submission_id: Option<DbId>,
    pub river_id: Option<DbId>,
    pub days_fished_with_mandatory_release: Option<i32>,
    pub days_fished_other: Option<i32>,
}

/// A single salmon or sea trout caught and recorded individually.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catch {
    pub activity_id: Option<DbId>,
    pub date_caught: Option<NaiveDate>,
    #[serde(default)]
    pub only_month_recorded: bool,
    #[serde(default)]
    pub no_date_recorded: bool,
    pub species_id: Option<DbId>,
    #[serde(default)]
    pub mass: MassQuantity,
    pub method_id: Option<DbId>,
    pub released: Option<bool>,
}

/// Per-method tally of small sea trout caught in one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmallCatch {
    pub activity_id: Option<DbId>,
    /// Calendar month, 1-based.
    pub month: Option<u32>,
    #[serde(default)]
    pub counts: Vec<SmallCatchCount>,
    pub released: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmallCatchCount {
    pub method_id: Option<DbId>,
    pub count: Option<i32>,
}
