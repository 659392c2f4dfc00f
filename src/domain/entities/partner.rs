//! # Partner Entity
//!
//! A referral partner and their running commission totals.
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::entities::Partner;
//! use tow_pricing::domain::value_objects::{CommissionRate, PartnerId};
//! use rust_decimal::Decimal;
//!
//! let mut partner = Partner::new(PartnerId::new("p-1"), "Main St Garage", CommissionRate::from_percent(10).unwrap());
//! partner.add_commission(Decimal::new(30, 0)).unwrap();
//! partner.record_payout(Decimal::new(20, 0)).unwrap();
//! assert_eq!(partner.commission_owed(), Decimal::new(10, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::{CommissionRate, PartnerId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A referral partner.
///
/// # Invariants
///
/// - `total_commission_earned` never decreases
/// - `total_paid >= 0`
/// - [`Partner::commission_owed`] is never negative; the raw
///   [`Partner::balance`] may be, after a payout correction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    id: PartnerId,
    name: String,
    commission_rate: CommissionRate,
    total_commission_earned: Decimal,
    total_paid: Decimal,
    created_at: Timestamp,
}

impl Partner {
    /// Signs up a new partner with zero totals.
    #[must_use]
    pub fn new(id: PartnerId, name: impl Into<String>, commission_rate: CommissionRate) -> Self {
        Self {
            id,
            name: name.into(),
            commission_rate,
            total_commission_earned: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the partner id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &PartnerId {
        &self.id
    }

    /// Returns the business name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rate new referrals are snapshotted at.
    #[inline]
    #[must_use]
    pub fn commission_rate(&self) -> CommissionRate {
        self.commission_rate
    }

    /// Returns lifetime commission earned.
    #[inline]
    #[must_use]
    pub fn total_commission_earned(&self) -> Decimal {
        self.total_commission_earned
    }

    /// Returns lifetime payouts.
    #[inline]
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }

    /// Returns signup time.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns `earned - paid`, which may be negative.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.total_commission_earned - self.total_paid
    }

    /// Returns the commission still owed, clamped at zero for display.
    #[must_use]
    pub fn commission_owed(&self) -> Decimal {
        self.balance().max(Decimal::ZERO)
    }

    /// Changes the rate for future referrals.
    ///
    /// Jobs already referred keep the rate they were created with.
    pub fn set_commission_rate(&mut self, rate: CommissionRate) {
        self.commission_rate = rate;
    }

    /// Adds commission from a completed job.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` for a negative amount, or an
    /// arithmetic error on overflow.
    pub fn add_commission(&mut self, amount: Decimal) -> DomainResult<()> {
        if amount < Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "commission",
                value: amount,
            });
        }
        self.total_commission_earned = self.total_commission_earned.safe_add(amount)?;
        Ok(())
    }

    /// Records a payout to the partner.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` unless `amount > 0`, or an
    /// arithmetic error on overflow.
    pub fn record_payout(&mut self, amount: Decimal) -> DomainResult<()> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "payout",
                value: amount,
            });
        }
        self.total_paid = self.total_paid.safe_add(amount)?;
        Ok(())
    }

    /// Overwrites lifetime payouts, for bookkeeping corrections.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` for a negative amount.
    pub fn correct_total_paid(&mut self, amount: Decimal) -> DomainResult<()> {
        if amount < Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "total_paid",
                value: amount,
            });
        }
        self.total_paid = amount;
        Ok(())
    }
}
