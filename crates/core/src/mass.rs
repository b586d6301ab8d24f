//! Mass quantities recorded in either metric or imperial units.
//!
//! A caller sets exactly one authoritative amount (kilograms for
//! [`MassUnit::Metric`], ounces for [`MassUnit::Imperial`]). The other
//! amount is derived by [`MassQuantity::conciliate`], which must run before
//! the quantity is compared or persisted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places kept when deriving ounces from kilograms.
pub const DERIVED_OUNCE_SCALE: u32 = 6;

/// One avoirdupois ounce expressed in kilograms.
pub fn kilograms_per_ounce() -> Decimal {
    Decimal::new(28_349_523_125, 12)
}

/// Which of the two amounts was entered by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MassUnit {
    Metric,
    Imperial,
}

/// Why a quantity could not be conciliated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MassError {
    /// Conciliated before its unit and amount were set.
    #[error("mass has no authoritative unit and amount to conciliate from")]
    MissingUnit,

    /// The derived amount does not fit in a decimal.
    #[error("mass of {0} is too large to convert")]
    Overflow(Decimal),
}

/// A mass held in both kilograms and ounces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassQuantity {
    #[serde(rename = "type")]
    pub unit: Option<MassUnit>,
    pub kg: Option<Decimal>,
    pub oz: Option<Decimal>,
}

impl MassQuantity {
    pub fn metric(kg: Decimal) -> Self {
        let mut mass = Self::default();
        mass.set(MassUnit::Metric, kg);
        mass
    }

    pub fn imperial(oz: Decimal) -> Self {
        let mut mass = Self::default();
        mass.set(MassUnit::Imperial, oz);
        mass
    }

    /// Record the authoritative unit and amount. The other amount is left
    /// untouched until [`conciliate`](Self::conciliate) runs.
    pub fn set(&mut self, unit: MassUnit, amount: Decimal) {
        self.unit = Some(unit);
        match unit {
            MassUnit::Metric => self.kg = Some(amount),
            MassUnit::Imperial => self.oz = Some(amount),
        }
    }

    /// The amount in the authoritative unit, if one has been set.
    pub fn authoritative_amount(&self) -> Option<Decimal> {
        match self.unit? {
            MassUnit::Metric => self.kg,
            MassUnit::Imperial => self.oz,
        }
    }

    /// Derive the non-authoritative amount from the authoritative one.
    ///
    /// Idempotent: the authoritative amount never changes, so repeated calls
    /// produce the same pair.
    pub fn conciliate(&mut self) -> Result<(), MassError> {
        let unit = self.unit.ok_or(MassError::MissingUnit)?;
        let amount = self.authoritative_amount().ok_or(MassError::MissingUnit)?;
        let overflow = || MassError::Overflow(amount);
        match unit {
            MassUnit::Imperial => {
                let kg = amount.checked_mul(kilograms_per_ounce()).ok_or_else(overflow)?;
                self.kg = Some(kg);
            }
            MassUnit::Metric => {
                let oz = amount
                    .checked_div(kilograms_per_ounce())
                    .ok_or_else(overflow)?
                    .round_dp_with_strategy(
                        DERIVED_OUNCE_SCALE,
                        RoundingStrategy::MidpointAwayFromZero,
                    );
                self.oz = Some(oz);
            }
        }
        Ok(())
    }

    /// Kilograms after conciliation. `None` if [`conciliate`](Self::conciliate)
    /// has not succeeded yet and the caller entered ounces.
    pub fn kilograms(&self) -> Option<Decimal> {
        self.kg
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn one_ounce_in_kilograms() {
        let mut mass = MassQuantity::imperial(Decimal::ONE);
        mass.conciliate().unwrap();
        assert_eq!(mass.kg, Some(dec("0.028349523125")));
        assert_eq!(mass.oz, Some(Decimal::ONE));
    }

    #[test]
    fn one_kilogram_in_ounces_rounds_half_up() {
        let mut mass = MassQuantity::metric(Decimal::ONE);
        mass.conciliate().unwrap();
        assert_eq!(mass.oz, Some(dec("35.273962")));
        assert_eq!(mass.kg, Some(Decimal::ONE));
    }

    #[test]
    fn set_does_not_touch_the_other_amount() {
        let mut mass = MassQuantity::imperial(dec("16"));
        mass.conciliate().unwrap();
        let derived_kg = mass.kg;
        mass.set(MassUnit::Imperial, dec("32"));
        assert_eq!(mass.kg, derived_kg);
    }

    #[test]
    fn conciliate_is_idempotent() {
        let mut mass = MassQuantity::metric(dec("4.2"));
        mass.conciliate().unwrap();
        let first = mass.clone();
        mass.conciliate().unwrap();
        assert_eq!(mass, first);
    }

    #[test]
    fn switching_unit_recomputes_from_new_authority() {
        let mut mass = MassQuantity::metric(dec("2"));
        mass.conciliate().unwrap();
        mass.set(MassUnit::Imperial, dec("10"));
        mass.conciliate().unwrap();
        assert_eq!(mass.kg, Some(dec("0.28349523125")));
    }

    #[test]
    fn conciliate_without_unit_fails() {
        let mut mass = MassQuantity::default();
        assert_matches!(mass.conciliate(), Err(MassError::MissingUnit));
    }

    #[test]
    fn conciliate_without_authoritative_amount_fails() {
        let mut mass = MassQuantity {
            unit: Some(MassUnit::Metric),
            kg: None,
            oz: Some(dec("3")),
        };
        assert_matches!(mass.conciliate(), Err(MassError::MissingUnit));
    }

    #[test]
    fn metric_amount_too_large_for_ounces_fails() {
        let mut mass = MassQuantity::metric(Decimal::MAX);
        assert_matches!(mass.conciliate(), Err(MassError::Overflow(_)));
        assert_eq!(mass.oz, None);
    }

    #[test]
    fn deserializes_from_client_shape() {
        let mass: MassQuantity =
            serde_json::from_str(r#"{"type":"IMPERIAL","oz":"12.5"}"#).unwrap();
        assert_eq!(mass.unit, Some(MassUnit::Imperial));
        assert_eq!(mass.oz, Some(dec("12.5")));
        assert_eq!(mass.kg, None);
    }
}
