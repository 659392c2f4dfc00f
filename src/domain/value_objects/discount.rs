//! # Discount Policy
//!
//! The online-booking discount, as a fraction with a derived display label.
//!
//! There is exactly one fallback rate in the crate,
//! [`DiscountPolicy::FALLBACK_RATE`]. Everything that shows a percentage
//! (price lines, "Save 15%" banners) reads it from a resolved
//! [`DiscountPolicy`] value rather than from a literal.
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::value_objects::DiscountPolicy;
//! use rust_decimal::Decimal;
//!
//! let policy = DiscountPolicy::new(Decimal::new(20, 2)).unwrap();
//! assert_eq!(policy.label(), "20%");
//! assert_eq!(policy.apply(Decimal::ONE_HUNDRED).unwrap(), Decimal::new(80, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{
    round_half_up, ArithmeticResult, CheckedArithmetic, Precision,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The active online discount.
///
/// # Invariants
///
/// - `rate` is a fraction in `[0, 1)`, never a percentage
/// - `label` is always `round(rate * 100)` followed by `%`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DiscountPolicyRepr", into = "DiscountPolicyRepr")]
pub struct DiscountPolicy {
    rate: Decimal,
    label: String,
}

impl DiscountPolicy {
    /// Rate used whenever configuration is unavailable or still loading.
    pub const FALLBACK_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

    /// Creates a policy from a fractional rate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDiscountRate` if `rate` is outside `[0, 1)`.
    pub fn new(rate: Decimal) -> DomainResult<Self> {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(DomainError::InvalidDiscountRate(rate));
        }
        let rate = rate.normalize();
        Ok(Self {
            label: format!("{}%", whole_percent(rate)),
            rate,
        })
    }

    /// Returns the fallback policy (15%).
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            rate: Self::FALLBACK_RATE,
            label: format!("{}%", whole_percent(Self::FALLBACK_RATE)),
        }
    }

    /// Returns the discount as a fraction.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the whole-percent figure shown to customers.
    #[inline]
    #[must_use]
    pub fn percent(&self) -> u32 {
        whole_percent(self.rate)
    }

    /// Returns the display text, e.g. `"15%"`.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `1 - rate`.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE - self.rate
    }

    /// Applies the discount and rounds to whole currency units.
    ///
    /// The result never exceeds the whole-unit part of `amount`, so a
    /// discounted line is never shown above its original price even when
    /// a tiny rate meets a fractional amount (`17.90 * 0.99` gives `17`,
    /// not `18`).
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the product overflows.
    pub fn apply(&self, amount: Decimal) -> ArithmeticResult<Decimal> {
        let discounted = round_half_up(amount.safe_mul(self.multiplier())?, Precision::Whole);
        Ok(discounted.min(amount.floor()))
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} off online", self.label)
    }
}

fn whole_percent(rate: Decimal) -> u32 {
    round_half_up(rate * Decimal::ONE_HUNDRED, Precision::Whole)
        .to_u32()
        .unwrap_or(0)
}

#[derive(Serialize, Deserialize)]
struct DiscountPolicyRepr {
    rate: Decimal,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<DiscountPolicyRepr> for DiscountPolicy {
    type Error = DomainError;

    fn try_from(repr: DiscountPolicyRepr) -> Result<Self, Self::Error> {
        // label is always re-derived from the rate
        Self::new(repr.rate)
    }
}

impl From<DiscountPolicy> for DiscountPolicyRepr {
    fn from(policy: DiscountPolicy) -> Self {
        Self {
            rate: policy.rate,
            label: Some(policy.label),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_fifteen_percent() {
        let policy = DiscountPolicy::fallback();
        assert_eq!(policy.rate(), Decimal::new(15, 2));
        assert_eq!(policy.percent(), 15);
        assert_eq!(policy.label(), "15%");
        assert_eq!(DiscountPolicy::default(), policy);
    }

    #[test]
    fn label_rounds_to_whole_percent() {
        let policy = DiscountPolicy::new(Decimal::new(1249, 4)).unwrap();
        assert_eq!(policy.label(), "12%");
        let policy = DiscountPolicy::new(Decimal::new(125, 3)).unwrap();
        assert_eq!(policy.label(), "13%");
    }

    #[test]
    fn zero_rate_is_allowed() {
        let policy = DiscountPolicy::new(Decimal::ZERO).unwrap();
        assert_eq!(policy.label(), "0%");
        assert_eq!(policy.apply(Decimal::new(95, 0)).unwrap(), Decimal::new(95, 0));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            DiscountPolicy::new(Decimal::ONE),
            Err(DomainError::InvalidDiscountRate(_))
        ));
        assert!(DiscountPolicy::new(Decimal::new(15, 0)).is_err());
        assert!(DiscountPolicy::new(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn apply_rounds_half_up() {
        let policy = DiscountPolicy::fallback();
        // 17.50 * 0.85 = 14.875
        assert_eq!(
            policy.apply(Decimal::new(1750, 2)).unwrap(),
            Decimal::new(15, 0)
        );
        assert_eq!(
            policy.apply(Decimal::ONE_HUNDRED).unwrap(),
            Decimal::new(85, 0)
        );
    }

    #[test]
    fn apply_never_exceeds_original() {
        let policy = DiscountPolicy::new(Decimal::new(1, 2)).unwrap();
        assert_eq!(
            policy.apply(Decimal::new(1790, 2)).unwrap(),
            Decimal::new(17, 0)
        );
        let none = DiscountPolicy::new(Decimal::ZERO).unwrap();
        assert_eq!(none.apply(Decimal::new(1750, 2)).unwrap(), Decimal::new(17, 0));
    }

    #[test]
    fn serde_rederives_label() {
        let policy: DiscountPolicy =
            serde_json::from_str(r#"{"rate":"0.2","label":"99%"}"#).unwrap();
        assert_eq!(policy.label(), "20%");

        let invalid = serde_json::from_str::<DiscountPolicy>(r#"{"rate":"1.5"}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn display_mentions_label() {
        assert_eq!(DiscountPolicy::fallback().to_string(), "15% off online");
    }
}
