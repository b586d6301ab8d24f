//! Activity validation (`ACTIVITY_*` codes).

use super::chain::{RuleChainValidator, RuleContext};
use super::context::EntityContext;
use crate::entities::Activity;

/// Days in the mandatory catch-and-release period (1 January to 16 June).
pub const MAX_DAYS_MANDATORY_RELEASE: i32 = 168;

/// Days in the remainder of the season.
pub const MAX_DAYS_OTHER: i32 = 198;

type Ctx<'a, 'r> = RuleContext<'a, EntityContext<'r>>;

pub fn activity_validator<'r>() -> RuleChainValidator<Activity, EntityContext<'r>> {
    RuleChainValidator::new("ACTIVITY")
        .check(check_submission)
        .check(check_river)
        .check(check_mandatory_release_days)
        .check(check_other_days)
        .check(check_total_days)
}

fn check_submission(activity: &Activity, ctx: &mut Ctx<'_, '_>) -> bool {
    activity.submission_id.is_some() || ctx.reject("SUBMISSION_REQUIRED", "submission")
}

fn check_river(activity: &Activity, ctx: &mut Ctx<'_, '_>) -> bool {
    match activity.river_id {
        None => ctx.reject("RIVER_REQUIRED", "river"),
        Some(id) if !ctx.reference.has_river(id) => ctx.reject("RIVER_NOT_FOUND", "river"),
        Some(_) => true,
    }
}

fn check_days(
    days: Option<i32>,
    max: i32,
    field: &str,
    code_stem: &str,
    ctx: &mut Ctx<'_, '_>,
) -> bool {
    match days {
        Some(d) if d < 0 => ctx.reject(&format!("{code_stem}_NEGATIVE"), field),
        Some(d) if d > max => ctx.reject(&format!("{code_stem}_MAX_EXCEEDED"), field),
        _ => true,
    }
}

fn check_mandatory_release_days(activity: &Activity, ctx: &mut Ctx<'_, '_>) -> bool {
    check_days(
        activity.days_fished_with_mandatory_release,
        MAX_DAYS_MANDATORY_RELEASE,
        "daysFishedWithMandatoryRelease",
        "DAYS_FISHED_WITH_MANDATORY_RELEASE",
        ctx,
    )
}

fn check_other_days(activity: &Activity, ctx: &mut Ctx<'_, '_>) -> bool {
    check_days(
        activity.days_fished_other,
        MAX_DAYS_OTHER,
        "daysFishedOther",
        "DAYS_FISHED_OTHER",
        ctx,
    )
}

fn check_total_days(activity: &Activity, ctx: &mut Ctx<'_, '_>) -> bool {
    let total = activity
        .days_fished_with_mandatory_release
        .unwrap_or(0)
        .saturating_add(activity.days_fished_other.unwrap_or(0));
    total > 0 || ctx.reject("DAYS_FISHED_NOT_GREATER_THAN_ZERO", "daysFishedOther")
}
