//! Catch validation (`CATCH_*` codes).

use chrono::Datelike;
use rust_decimal::Decimal;

use super::chain::{RuleChainValidator, RuleContext};
use super::context::EntityContext;
use crate::entities::Catch;
use crate::mass::{MassError, MassUnit};

/// Heaviest plausible catch, in kilograms.
pub fn max_mass_kg() -> Decimal {
    Decimal::from(50)
}

type Ctx<'a, 'r> = RuleContext<'a, EntityContext<'r>>;

pub fn catch_validator<'r>() -> RuleChainValidator<Catch, EntityContext<'r>> {
    RuleChainValidator::new("CATCH")
        .check(check_activity)
        .check(check_date)
        .check(check_species)
        .check(check_mass)
        .check(check_method)
        .check(check_released)
}

fn check_activity(catch: &Catch, ctx: &mut Ctx<'_, '_>) -> bool {
    catch.activity_id.is_some() || ctx.reject("ACTIVITY_REQUIRED", "activity")
}

fn check_date(catch: &Catch, ctx: &mut Ctx<'_, '_>) -> bool {
    let Some(date) = catch.date_caught else {
        return catch.no_date_recorded || ctx.reject("DATE_REQUIRED", "dateCaught");
    };
    let mut valid = true;
    if date > ctx.today {
        valid = ctx.reject("DATE_IN_FUTURE", "dateCaught");
    }
    if date.year() != ctx.season {
        valid = ctx.reject("DATE_YEAR_MISMATCH", "dateCaught");
    }
    valid
}

fn check_species(catch: &Catch, ctx: &mut Ctx<'_, '_>) -> bool {
    match catch.species_id {
        None => ctx.reject("SPECIES_REQUIRED", "species"),
        Some(id) if !ctx.reference.has_species(id) => ctx.reject("SPECIES_NOT_FOUND", "species"),
        Some(_) => true,
    }
}

/// Mass is compared in kilograms, so it is conciliated on a copy first.
fn check_mass(catch: &Catch, ctx: &mut Ctx<'_, '_>) -> bool {
    let Some(unit) = catch.mass.unit else {
        return ctx.reject("MASS_TYPE_REQUIRED", "mass.type");
    };
    let mut mass = catch.mass.clone();
    match mass.conciliate() {
        Ok(()) => {}
        Err(MassError::Overflow(_)) => return ctx.reject("MASS_MAX_EXCEEDED", "mass"),
        Err(MassError::MissingUnit) => {
            return match unit {
                MassUnit::Metric => ctx.reject("MASS_KG_REQUIRED", "mass.kg"),
                MassUnit::Imperial => ctx.reject("MASS_OZ_REQUIRED", "mass.oz"),
            };
        }
    }
    match mass.kilograms() {
        Some(kg) if kg <= Decimal::ZERO => ctx.reject("MASS_NOT_GREATER_THAN_ZERO", "mass"),
        Some(kg) if kg > max_mass_kg() => ctx.reject("MASS_MAX_EXCEEDED", "mass"),
        _ => true,
    }
}

fn check_method(catch: &Catch, ctx: &mut Ctx<'_, '_>) -> bool {
    match catch.method_id {
        None => ctx.reject("METHOD_REQUIRED", "method"),
        Some(id) if !ctx.reference.has_method(id) => ctx.reject("METHOD_NOT_FOUND", "method"),
        Some(_) => true,
    }
}

fn check_released(catch: &Catch, ctx: &mut Ctx<'_, '_>) -> bool {
    catch.released.is_some() || ctx.reject("RELEASED_REQUIRED", "released")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;
    use crate::mass::MassQuantity;
    use crate::reference::{ReferenceData, ReferenceItem};
    use crate::validation::FieldViolation;

    fn reference() -> ReferenceData {
        ReferenceData::new(
            vec![],
            vec![ReferenceItem::new(1, "Salmon"), ReferenceItem::new(2, "Sea Trout")],
            vec![ReferenceItem::new(1, "Fly"), ReferenceItem::new(2, "Spinner")],
            vec![],
        )
    }

    fn valid_catch() -> Catch {
        Catch {
            activity_id: Some(10),
            date_caught: NaiveDate::from_ymd_opt(2024, 6, 20),
            only_month_recorded: false,
            no_date_recorded: false,
            species_id: Some(1),
            mass: MassQuantity::metric(Decimal::from_str("4.5").unwrap()),
            method_id: Some(1),
            released: Some(true),
        }
    }

    fn violations(catch: &Catch) -> Vec<FieldViolation> {
        let reference = reference();
        let today = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let mut ctx = EntityContext::new(&reference, 2024, today);
        let valid = catch_validator().is_valid(catch, &mut ctx);
        assert_eq!(valid, ctx.violations().is_empty());
        ctx.violations().to_vec()
    }

    fn codes(catch: &Catch) -> Vec<String> {
        violations(catch).into_iter().map(|v| v.code).collect()
    }

    #[test]
    fn accepts_valid_catch() {
        assert!(codes(&valid_catch()).is_empty());
    }

    #[test]
    fn accepts_imperial_mass() {
        let catch = Catch {
            mass: MassQuantity::imperial(Decimal::from(160)),
            ..valid_catch()
        };
        assert!(codes(&catch).is_empty());
    }

    #[test]
    fn collects_every_missing_field() {
        let catch = Catch {
            activity_id: None,
            date_caught: None,
            species_id: None,
            mass: MassQuantity::default(),
            method_id: None,
            released: None,
            ..valid_catch()
        };
        assert_eq!(
            codes(&catch),
            [
                "CATCH_ACTIVITY_REQUIRED",
                "CATCH_DATE_REQUIRED",
                "CATCH_SPECIES_REQUIRED",
                "CATCH_MASS_TYPE_REQUIRED",
                "CATCH_METHOD_REQUIRED",
                "CATCH_RELEASED_REQUIRED",
            ]
        );
    }

    #[test]
    fn missing_date_allowed_when_not_recorded() {
        let catch = Catch {
            date_caught: None,
            no_date_recorded: true,
            ..valid_catch()
        };
        assert!(codes(&catch).is_empty());
    }

    #[test]
    fn future_date_in_next_year_reports_both_date_errors() {
        let catch = Catch {
            date_caught: NaiveDate::from_ymd_opt(2025, 1, 2),
            ..valid_catch()
        };
        assert_eq!(
            codes(&catch),
            ["CATCH_DATE_IN_FUTURE", "CATCH_DATE_YEAR_MISMATCH"]
        );
    }

    #[test]
    fn mass_amount_required_for_unit() {
        let mut catch = valid_catch();
        catch.mass.kg = None;
        assert_eq!(
            violations(&catch),
            vec![FieldViolation {
                code: "CATCH_MASS_KG_REQUIRED".into(),
                path: "mass.kg".into(),
            }]
        );
    }

    #[test]
    fn mass_bounds_checked_after_conciliation() {
        // 1800 oz is a little over 51 kg.
        let heavy = Catch {
            mass: MassQuantity::imperial(Decimal::from(1800)),
            ..valid_catch()
        };
        assert_eq!(codes(&heavy), ["CATCH_MASS_MAX_EXCEEDED"]);

        let weightless = Catch {
            mass: MassQuantity::metric(Decimal::ZERO),
            ..valid_catch()
        };
        assert_eq!(codes(&weightless), ["CATCH_MASS_NOT_GREATER_THAN_ZERO"]);
    }

    #[test]
    fn unconvertible_mass_is_too_heavy() {
        let huge = Catch {
            mass: MassQuantity::metric(Decimal::MAX),
            ..valid_catch()
        };
        assert_eq!(codes(&huge), ["CATCH_MASS_MAX_EXCEEDED"]);
    }

    #[test]
    fn unknown_references_rejected() {
        let catch = Catch {
            species_id: Some(9),
            method_id: Some(9),
            ..valid_catch()
        };
        assert_eq!(
            codes(&catch),
            ["CATCH_SPECIES_NOT_FOUND", "CATCH_METHOD_NOT_FOUND"]
        );
    }
}
