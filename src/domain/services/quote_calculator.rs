//! # Quote Calculator
//!
//! Turns a base service price, trip distances and the active discount into
//! an itemized [`Quote`].
//!
//! # Line Items
//!
//! ```text
//! Service fee    base price                     always, if base > 0
//! Travel miles   travel_miles * travel rate     if travel_miles > 0
//! Tow miles      tow_miles * tow rate           if is_towing && tow_miles > 0
//! ```
//!
//! Every line is discounted and rounded to whole currency units on its own.
//! The totals are sums of those rounded lines.
//!
//! # Failure Semantics
//!
//! The calculator never fails. Non-positive or non-finite inputs, and
//! products too large to represent, drop the affected line.
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::services::quote_calculator::{compute_quote, MileageRates, TripDistances};
//! use tow_pricing::domain::value_objects::{DiscountPolicy, LineItemKind};
//! use rust_decimal::Decimal;
//!
//! // Tow miles are ignored for a non-towing service.
//! let trip = TripDistances::new(None, Some(50.0), false);
//! let quote = compute_quote(Decimal::new(95, 0), &trip, &DiscountPolicy::fallback(), &MileageRates::default());
//! assert!(!quote.has_line(LineItemKind::TowMiles));
//! ```

use crate::domain::entities::quote::{Quote, QuoteBuilder, QuoteLineItem};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use crate::domain::value_objects::{DiscountPolicy, LineItemKind, Miles};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default per-mile charge for driving to the customer: $1.75.
pub const DEFAULT_TRAVEL_RATE_PER_MILE: Decimal = Decimal::from_parts(175, 0, 0, false, 2);

/// Default per-mile charge for towing the vehicle: $8.
pub const DEFAULT_TOW_RATE_PER_MILE: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Per-mile charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MileageRates {
    travel_per_mile: Decimal,
    tow_per_mile: Decimal,
}

impl MileageRates {
    /// Creates mileage rates.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if either rate is negative.
    pub fn new(travel_per_mile: Decimal, tow_per_mile: Decimal) -> DomainResult<Self> {
        if travel_per_mile < Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "travel_rate_per_mile",
                value: travel_per_mile,
            });
        }
        if tow_per_mile < Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "tow_rate_per_mile",
                value: tow_per_mile,
            });
        }
        Ok(Self {
            travel_per_mile,
            tow_per_mile,
        })
    }

    /// Returns the travel charge per mile.
    #[inline]
    #[must_use]
    pub const fn travel_per_mile(&self) -> Decimal {
        self.travel_per_mile
    }

    /// Returns the tow charge per mile.
    #[inline]
    #[must_use]
    pub const fn tow_per_mile(&self) -> Decimal {
        self.tow_per_mile
    }
}

impl Default for MileageRates {
    fn default() -> Self {
        Self {
            travel_per_mile: DEFAULT_TRAVEL_RATE_PER_MILE,
            tow_per_mile: DEFAULT_TOW_RATE_PER_MILE,
        }
    }
}

/// Distances entered in the booking form, as raw numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TripDistances {
    /// Miles from the driver to the pickup point.
    pub travel_miles: Option<f64>,
    /// Miles from pickup to drop-off.
    pub tow_miles: Option<f64>,
    /// Whether the selected service is a tow.
    pub is_towing: bool,
}

impl TripDistances {
    /// Creates trip distances.
    #[must_use]
    pub const fn new(travel_miles: Option<f64>, tow_miles: Option<f64>, is_towing: bool) -> Self {
        Self {
            travel_miles,
            tow_miles,
            is_towing,
        }
    }

    /// A roadside (non-towing) trip.
    #[must_use]
    pub const fn roadside(travel_miles: Option<f64>) -> Self {
        Self::new(travel_miles, None, false)
    }

    /// A towing trip.
    #[must_use]
    pub const fn towing(travel_miles: Option<f64>, tow_miles: Option<f64>) -> Self {
        Self::new(travel_miles, tow_miles, true)
    }

    /// Sanitized travel distance.
    #[must_use]
    pub fn travel(&self) -> Option<Miles> {
        self.travel_miles.and_then(Miles::from_f64)
    }

    /// Sanitized tow distance; `None` unless the service is a tow.
    #[must_use]
    pub fn tow(&self) -> Option<Miles> {
        if !self.is_towing {
            return None;
        }
        self.tow_miles.and_then(Miles::from_f64)
    }
}

/// Stateless quote calculator bound to a set of mileage rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteCalculator {
    rates: MileageRates,
}

impl QuoteCalculator {
    /// Creates a calculator with the given mileage rates.
    #[must_use]
    pub const fn new(rates: MileageRates) -> Self {
        Self { rates }
    }

    /// Returns the mileage rates in use.
    #[inline]
    #[must_use]
    pub const fn rates(&self) -> &MileageRates {
        &self.rates
    }

    /// Computes an itemized quote.
    ///
    /// `service_base_price` must be the resolved catalog price; do not call
    /// this with a loading placeholder and present the result as final.
    #[must_use]
    pub fn compute(
        &self,
        service_base_price: Decimal,
        trip: &TripDistances,
        discount: &DiscountPolicy,
    ) -> Quote {
        let mut builder = QuoteBuilder::new(discount.clone());

        if service_base_price > Decimal::ZERO {
            push(&mut builder, LineItemKind::ServiceFee, Ok(service_base_price), discount);
        } else {
            warn!(
                base_price = %service_base_price,
                "non-positive service price, omitting service fee line"
            );
        }

        match trip.travel() {
            Some(miles) => push(
                &mut builder,
                LineItemKind::TravelMiles,
                miles.get().safe_mul(self.rates.travel_per_mile),
                discount,
            ),
            None if trip.travel_miles.is_some() => {
                debug!(travel_miles = ?trip.travel_miles, "unusable travel distance, line omitted");
            }
            None => {}
        }

        match trip.tow() {
            Some(miles) => push(
                &mut builder,
                LineItemKind::TowMiles,
                miles.get().safe_mul(self.rates.tow_per_mile),
                discount,
            ),
            None if trip.tow_miles.is_some() => {
                debug!(
                    tow_miles = ?trip.tow_miles,
                    is_towing = trip.is_towing,
                    "tow distance not billable, line omitted"
                );
            }
            None => {}
        }

        builder.build()
    }
}

/// Computes a quote with explicit mileage rates.
///
/// Convenience wrapper over [`QuoteCalculator::compute`].
#[must_use]
pub fn compute_quote(
    service_base_price: Decimal,
    trip: &TripDistances,
    discount: &DiscountPolicy,
    rates: &MileageRates,
) -> Quote {
    QuoteCalculator::new(*rates).compute(service_base_price, trip, discount)
}

fn push(
    builder: &mut QuoteBuilder,
    kind: LineItemKind,
    original: ArithmeticResult<Decimal>,
    discount: &DiscountPolicy,
) {
    let pushed = original
        .and_then(|amount| QuoteLineItem::discounted(kind, amount, discount))
        .and_then(|line| builder.push_line(line).map(|_| ()));
    if let Err(e) = pushed {
        warn!(line = %kind, error = %e, "quote line out of range, omitted");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fifteen() -> DiscountPolicy {
        DiscountPolicy::fallback()
    }

    fn sum_discounted(quote: &Quote) -> Decimal {
        quote
            .line_items()
            .iter()
            .map(QuoteLineItem::discounted_amount)
            .sum()
    }

    fn sum_original(quote: &Quote) -> Decimal {
        quote
            .line_items()
            .iter()
            .map(QuoteLineItem::original_amount)
            .sum()
    }

    mod scenarios {
        use super::*;

        #[test]
        fn full_towing_quote() {
            let trip = TripDistances::towing(Some(10.0), Some(20.0));
            let quote = compute_quote(
                Decimal::ONE_HUNDRED,
                &trip,
                &fifteen(),
                &MileageRates::default(),
            );

            let lines = quote.line_items();
            assert_eq!(lines.len(), 3);

            assert_eq!(lines[0].kind(), LineItemKind::ServiceFee);
            assert_eq!(lines[0].original_amount(), Decimal::ONE_HUNDRED);
            assert_eq!(lines[0].discounted_amount(), Decimal::new(85, 0));

            assert_eq!(lines[1].kind(), LineItemKind::TravelMiles);
            assert_eq!(lines[1].original_amount(), Decimal::new(1750, 2));
            assert_eq!(lines[1].discounted_amount(), Decimal::new(15, 0));

            assert_eq!(lines[2].kind(), LineItemKind::TowMiles);
            assert_eq!(lines[2].original_amount(), Decimal::new(160, 0));
            assert_eq!(lines[2].discounted_amount(), Decimal::new(136, 0));

            assert_eq!(quote.total(), Decimal::new(236, 0));
            assert_eq!(quote.original_total(), Decimal::new(27750, 2));
        }

        #[test]
        fn service_only() {
            let quote = compute_quote(
                Decimal::new(95, 0),
                &TripDistances::default(),
                &fifteen(),
                &MileageRates::default(),
            );
            assert_eq!(quote.line_items().len(), 1);
            assert_eq!(quote.total(), Decimal::new(81, 0));
            assert_eq!(quote.original_total(), Decimal::new(95, 0));
        }

        #[test]
        fn total_sums_rounded_lines_not_discounted_aggregate() {
            // three lines of 1.00 at 50%: each 0.50 rounds to 1, so the
            // total is 3; discounting the 3.00 aggregate would show 2
            let rates = MileageRates::new(Decimal::ONE, Decimal::ONE).unwrap();
            let policy = DiscountPolicy::new(Decimal::new(50, 2)).unwrap();
            let quote = compute_quote(
                Decimal::ONE,
                &TripDistances::towing(Some(1.0), Some(1.0)),
                &policy,
                &rates,
            );
            assert_eq!(quote.line_items().len(), 3);
            assert_eq!(quote.total(), Decimal::new(3, 0));
            assert_eq!(quote.total(), sum_discounted(&quote));
            assert_eq!(quote.original_total(), Decimal::new(3, 0));
        }

        #[test]
        fn custom_rates_apply() {
            let rates = MileageRates::new(Decimal::TWO, Decimal::TEN).unwrap();
            let quote = compute_quote(
                Decimal::ONE_HUNDRED,
                &TripDistances::towing(Some(5.0), Some(3.0)),
                &DiscountPolicy::new(Decimal::ZERO).unwrap(),
                &rates,
            );
            assert_eq!(quote.total(), Decimal::new(140, 0));
        }
    }

    mod towing_gating {
        use super::*;

        #[test]
        fn tow_line_absent_for_non_towing_even_with_distance() {
            let trip = TripDistances::new(None, Some(50.0), false);
            let quote = compute_quote(
                Decimal::ONE_HUNDRED,
                &trip,
                &fifteen(),
                &MileageRates::default(),
            );
            assert!(!quote.has_line(LineItemKind::TowMiles));
            assert_eq!(quote.total(), Decimal::new(85, 0));
        }

        #[test]
        fn tow_line_absent_for_towing_without_distance() {
            let quote = compute_quote(
                Decimal::ONE_HUNDRED,
                &TripDistances::towing(None, None),
                &fifteen(),
                &MileageRates::default(),
            );
            assert!(!quote.has_line(LineItemKind::TowMiles));
        }

        #[test]
        fn travel_line_allowed_for_roadside() {
            let quote = compute_quote(
                Decimal::ONE_HUNDRED,
                &TripDistances::roadside(Some(4.0)),
                &fifteen(),
                &MileageRates::default(),
            );
            assert!(quote.has_line(LineItemKind::TravelMiles));
            // 7.00 * 0.85 = 5.95 -> 6
            assert_eq!(
                quote.line(LineItemKind::TravelMiles).unwrap().discounted_amount(),
                Decimal::new(6, 0)
            );
        }
    }

    mod malformed_inputs {
        use super::*;

        #[test]
        fn negative_and_non_finite_distances_omitted() {
            for bad in [-5.0, 0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let trip = TripDistances::towing(Some(bad), Some(bad));
                let quote = compute_quote(
                    Decimal::ONE_HUNDRED,
                    &trip,
                    &fifteen(),
                    &MileageRates::default(),
                );
                assert_eq!(quote.line_items().len(), 1, "input {bad}");
                assert_eq!(quote.total(), Decimal::new(85, 0));
            }
        }

        #[test]
        fn non_positive_base_price_omits_service_line() {
            let quote = compute_quote(
                Decimal::new(-10, 0),
                &TripDistances::roadside(Some(10.0)),
                &fifteen(),
                &MileageRates::default(),
            );
            assert!(!quote.has_line(LineItemKind::ServiceFee));
            assert_eq!(quote.total(), Decimal::new(15, 0));
        }

        #[test]
        fn everything_invalid_yields_empty_zero_quote() {
            let quote = compute_quote(
                Decimal::ZERO,
                &TripDistances::towing(Some(-1.0), Some(f64::NAN)),
                &fifteen(),
                &MileageRates::default(),
            );
            assert!(quote.line_items().is_empty());
            assert_eq!(quote.total(), Decimal::ZERO);
            assert_eq!(quote.original_total(), Decimal::ZERO);
        }

        #[test]
        fn overflowing_mileage_omitted() {
            let rates = MileageRates::new(Decimal::MAX, Decimal::MAX).unwrap();
            let quote = compute_quote(
                Decimal::ONE_HUNDRED,
                &TripDistances::towing(Some(1e20), Some(1e20)),
                &fifteen(),
                &rates,
            );
            assert_eq!(quote.line_items().len(), 1);
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let calc = QuoteCalculator::default();
        let trip = TripDistances::towing(Some(12.3), Some(7.7));
        let first = calc.compute(Decimal::new(125, 0), &trip, &fifteen());
        let second = calc.compute(Decimal::new(125, 0), &trip, &fifteen());
        assert_eq!(first, second);
    }

    #[test]
    fn mileage_rates_reject_negative() {
        assert!(MileageRates::new(Decimal::new(-1, 0), Decimal::ONE).is_err());
        assert!(MileageRates::new(Decimal::ONE, Decimal::new(-1, 0)).is_err());
    }

    proptest! {
        #[test]
        fn totals_reconcile_exactly(
            base in 1u32..2_000,
            travel in proptest::option::of(-50.0f64..500.0),
            tow in proptest::option::of(-50.0f64..500.0),
            is_towing in any::<bool>(),
            rate_bp in 0u32..10_000,
        ) {
            let policy = DiscountPolicy::new(Decimal::new(i64::from(rate_bp), 4)).unwrap();
            let trip = TripDistances::new(travel, tow, is_towing);
            let quote = compute_quote(Decimal::from(base), &trip, &policy, &MileageRates::default());

            prop_assert_eq!(quote.total(), sum_discounted(&quote));
            prop_assert_eq!(quote.original_total(), sum_original(&quote));
            prop_assert!(quote.total() <= quote.original_total());
        }

        #[test]
        fn tow_line_requires_towing_flag(
            tow in 0.1f64..500.0,
            base in 1u32..2_000,
        ) {
            let trip = TripDistances::new(None, Some(tow), false);
            let quote = compute_quote(Decimal::from(base), &trip, &fifteen(), &MileageRates::default());
            prop_assert!(!quote.has_line(LineItemKind::TowMiles));
        }

        #[test]
        fn discount_never_exceeds_original(
            cents in 1i64..1_000_000,
            rate_bp in 0u32..10_000,
        ) {
            let original = Decimal::new(cents, 2);
            let policy = DiscountPolicy::new(Decimal::new(i64::from(rate_bp), 4)).unwrap();
            prop_assert!(policy.apply(original).unwrap() <= original);
        }

        #[test]
        fn discount_monotone_in_rate(
            cents in 1i64..1_000_000,
            low_bp in 0u32..9_999,
            step_bp in 1u32..5_000,
        ) {
            let high_bp = (low_bp + step_bp).min(9_999);
            prop_assume!(high_bp > low_bp);
            let original = Decimal::new(cents, 2);
            let low = DiscountPolicy::new(Decimal::new(i64::from(low_bp), 4)).unwrap();
            let high = DiscountPolicy::new(Decimal::new(i64::from(high_bp), 4)).unwrap();
            let at_low = low.apply(original).unwrap();
            let at_high = high.apply(original).unwrap();

            prop_assert!(at_high <= at_low);
            // once the rate step moves the amount by two whole units the
            // rounded figures must differ
            let moved = original * (high.rate() - low.rate());
            if moved >= Decimal::TWO {
                prop_assert!(at_high < at_low);
            }
        }

        #[test]
        fn discount_strict_for_whole_amounts(
            dollars in 1i64..100_000,
            low_bp in 0u32..9_999,
            step_bp in 1u32..5_000,
        ) {
            let high_bp = (low_bp + step_bp).min(9_999);
            prop_assume!(high_bp > low_bp);
            let original = Decimal::from(dollars);
            let low = DiscountPolicy::new(Decimal::new(i64::from(low_bp), 4)).unwrap();
            let high = DiscountPolicy::new(Decimal::new(i64::from(high_bp), 4)).unwrap();
            if original * (high.rate() - low.rate()) >= Decimal::ONE {
                prop_assert!(high.apply(original).unwrap() < low.apply(original).unwrap());
            }
        }
    }
}
