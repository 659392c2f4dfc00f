//! # Service Price
//!
//! Catalog entry pairing a service's phone price with its online price.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::DiscountPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Standard and online price for one service.
///
/// # Invariants
///
/// - `standard_price > 0`
/// - `online_price == discount.apply(standard_price)` for the policy it was
///   built with
///
/// # Examples
///
/// ```
/// use tow_pricing::domain::entities::ServicePrice;
/// use tow_pricing::domain::value_objects::DiscountPolicy;
/// use rust_decimal::Decimal;
///
/// let price = ServicePrice::new("Jump Start", Decimal::new(95, 0), false, &DiscountPolicy::fallback()).unwrap();
/// assert_eq!(price.online_price(), Decimal::new(81, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePrice {
    service_name: String,
    standard_price: Decimal,
    online_price: Decimal,
    towing: bool,
}

impl ServicePrice {
    /// Creates a catalog entry, deriving the online price from `discount`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if `standard_price` is not
    /// positive, or an arithmetic error if discounting overflows.
    pub fn new(
        service_name: impl Into<String>,
        standard_price: Decimal,
        towing: bool,
        discount: &DiscountPolicy,
    ) -> DomainResult<Self> {
        if standard_price <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "standard_price",
                value: standard_price,
            });
        }
        Ok(Self {
            service_name: service_name.into(),
            online_price: discount.apply(standard_price)?,
            standard_price,
            towing,
        })
    }

    /// Returns the service name as configured.
    #[inline]
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the phone-booking price.
    #[inline]
    #[must_use]
    pub fn standard_price(&self) -> Decimal {
        self.standard_price
    }

    /// Returns the self-service price.
    #[inline]
    #[must_use]
    pub fn online_price(&self) -> Decimal {
        self.online_price
    }

    /// Returns true for towing-type services, which bill tow miles.
    #[inline]
    #[must_use]
    pub fn is_towing(&self) -> bool {
        self.towing
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn online_price_tracks_policy() {
        let policy = DiscountPolicy::new(Decimal::new(10, 2)).unwrap();
        let price = ServicePrice::new("Towing", Decimal::new(125, 0), true, &policy).unwrap();
        // 112.5 rounds half up
        assert_eq!(price.online_price(), Decimal::new(113, 0));
        assert!(price.is_towing());
    }

    #[test]
    fn rejects_non_positive_standard_price() {
        let policy = DiscountPolicy::fallback();
        assert!(matches!(
            ServicePrice::new("Lockout", Decimal::ZERO, false, &policy),
            Err(DomainError::InvalidPrice { .. })
        ));
        assert!(ServicePrice::new("Lockout", Decimal::new(-5, 0), false, &policy).is_err());
    }
}
