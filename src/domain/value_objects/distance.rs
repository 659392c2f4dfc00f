//! # Distance
//!
//! Mileage entered by customers, sanitized into a positive decimal.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive distance in miles.
///
/// Raw UI input arrives as `f64`; anything that is not a positive finite
/// number has no `Miles` representation, which is how the quote
/// calculator treats it as absent.
///
/// # Examples
///
/// ```
/// use tow_pricing::domain::value_objects::Miles;
///
/// assert!(Miles::from_f64(12.5).is_some());
/// assert!(Miles::from_f64(0.0).is_none());
/// assert!(Miles::from_f64(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Miles(Decimal);

impl Miles {
    /// Converts a raw input into miles.
    ///
    /// Returns `None` for zero, negative, NaN, infinite, or
    /// unrepresentably large values.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Decimal::from_f64(value)
            .filter(|d| d.is_sign_positive() && !d.is_zero())
            .map(Self)
    }

    /// Wraps a decimal distance.
    ///
    /// Returns `None` unless `value > 0`.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value))
    }

    /// Returns the distance as a decimal.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Miles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mi", self.0)
    }
}
