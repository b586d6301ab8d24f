//! Small catch validation (`SMALL_CATCH_*` codes).

use std::collections::HashSet;

use chrono::Datelike;

use super::chain::{RuleChainValidator, RuleContext};
use super::context::EntityContext;
use crate::entities::SmallCatch;

type Ctx<'a, 'r> = RuleContext<'a, EntityContext<'r>>;

pub fn small_catch_validator<'r>() -> RuleChainValidator<SmallCatch, EntityContext<'r>> {
    RuleChainValidator::new("SMALL_CATCH")
        .check(check_activity)
        .check(check_month)
        .check(check_counts_present)
        .check(check_count_methods)
        .check(check_count_values)
        .check(check_released)
}

fn check_activity(small: &SmallCatch, ctx: &mut Ctx<'_, '_>) -> bool {
    small.activity_id.is_some() || ctx.reject("ACTIVITY_REQUIRED", "activity")
}

fn check_month(small: &SmallCatch, ctx: &mut Ctx<'_, '_>) -> bool {
    let Some(month) = small.month else {
        return ctx.reject("MONTH_REQUIRED", "month");
    };
    if !(1..=12).contains(&month) {
        return ctx.reject("MONTH_INVALID", "month");
    }
    let this_year = ctx.today.year();
    let in_future =
        ctx.season > this_year || (ctx.season == this_year && month > ctx.today.month());
    !in_future || ctx.reject("MONTH_IN_FUTURE", "month")
}

fn check_counts_present(small: &SmallCatch, ctx: &mut Ctx<'_, '_>) -> bool {
    !small.counts.is_empty() || ctx.reject("COUNTS_REQUIRED", "counts")
}

fn check_count_methods(small: &SmallCatch, ctx: &mut Ctx<'_, '_>) -> bool {
    let mut valid = true;
    let mut seen = HashSet::new();
    for (i, count) in small.counts.iter().enumerate() {
        let path = format!("counts[{i}].method");
        match count.method_id {
            None => valid = ctx.reject("COUNTS_METHOD_REQUIRED", path),
            Some(id) if !ctx.reference.has_method(id) => {
                valid = ctx.reject("COUNTS_METHOD_NOT_FOUND", path)
            }
            Some(id) if !seen.insert(id) => {
                valid = ctx.reject("COUNTS_METHOD_DUPLICATE", path)
            }
            Some(_) => {}
        }
    }
    valid
}

fn check_count_values(small: &SmallCatch, ctx: &mut Ctx<'_, '_>) -> bool {
    let mut valid = true;
    for (i, count) in small.counts.iter().enumerate() {
        let path = format!("counts[{i}].count");
        match count.count {
            None => valid = ctx.reject("COUNTS_COUNT_REQUIRED", path),
            Some(c) if c < 0 => valid = ctx.reject("COUNTS_COUNT_NEGATIVE", path),
            Some(_) => {}
        }
    }
    valid
}

fn check_released(small: &SmallCatch, ctx: &mut Ctx<'_, '_>) -> bool {
    let Some(released) = small.released else {
        return true;
    };
    if released < 0 {
        return ctx.reject("RELEASED_NEGATIVE", "released");
    }
    let caught: i64 = small
        .counts
        .iter()
        .filter_map(|c| c.count)
        .filter(|c| *c > 0)
        .map(i64::from)
        .sum();
    i64::from(released) <= caught || ctx.reject("RELEASED_EXCEEDS_COUNTS", "released")
}
