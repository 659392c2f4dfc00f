//! # Commission Rate
//!
//! A partner's share of a job's final price, stored as a percentage.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commission rate as a percentage in `[0, 100]`.
///
/// Unlike [`DiscountPolicy`](super::DiscountPolicy), which is a fraction,
/// this is stored the way partners see it: `15` means 15%.
///
/// # Examples
///
/// ```
/// use tow_pricing::domain::value_objects::CommissionRate;
/// use rust_decimal::Decimal;
///
/// let rate = CommissionRate::new(Decimal::new(15, 0)).unwrap();
/// assert_eq!(rate.as_fraction(), Decimal::new(15, 2));
/// assert!(CommissionRate::new(Decimal::new(101, 0)).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct CommissionRate(Decimal);

impl CommissionRate {
    /// Creates a commission rate from a percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCommissionRate` if `percent` is
    /// outside `[0, 100]`.
    pub fn new(percent: Decimal) -> DomainResult<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::InvalidCommissionRate(percent));
        }
        Ok(Self(percent))
    }

    /// Creates a commission rate from a whole percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCommissionRate` if `percent > 100`.
    pub fn from_percent(percent: u32) -> DomainResult<Self> {
        Self::new(Decimal::from(percent))
    }

    /// Returns the percentage value.
    #[inline]
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns `percent / 100`.
    #[inline]
    #[must_use]
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for CommissionRate {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommissionRate> for Decimal {
    fn from(rate: CommissionRate) -> Self {
        rate.0
    }
}

impl fmt::Display for CommissionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
