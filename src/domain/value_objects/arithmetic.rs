//! # Checked Arithmetic
//!
//! Safe decimal arithmetic and the rounding rules shared by every price
//! the engine produces.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`Precision`] - Currency precision a value is rounded to
//! - [`round_half_up`] - Midpoint-away-from-zero rounding
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::value_objects::arithmetic::{round_half_up, Precision};
//! use rust_decimal::Decimal;
//!
//! // 14.875 rounds to the nearest whole dollar
//! let rounded = round_half_up(Decimal::new(14875, 3), Precision::Whole);
//! assert_eq!(rounded, Decimal::new(15, 0));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Currency precision a money value is rounded to.
///
/// Customer-facing quote lines are shown in whole currency units; partner
/// commissions are tracked to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Whole currency units (no cents).
    Whole,
    /// Two decimal places.
    Cents,
}

impl Precision {
    /// Returns the number of decimal places for this precision.
    #[inline]
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        match self {
            Self::Whole => 0,
            Self::Cents => 2,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole => write!(f, "Whole"),
            Self::Cents => write!(f, "Cents"),
        }
    }
}

/// Rounds to the given precision, halves going away from zero.
///
/// For the non-negative amounts the engine deals in this is plain
/// round-half-up: `14.5 -> 15`, `14.49 -> 14`.
///
/// # Examples
///
/// ```
/// use tow_pricing::domain::value_objects::arithmetic::{round_half_up, Precision};
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_up(Decimal::new(145, 1), Precision::Whole), Decimal::new(15, 0));
/// assert_eq!(round_half_up(Decimal::new(12345, 3), Precision::Cents), Decimal::new(1235, 2));
/// ```
#[inline]
#[must_use]
pub fn round_half_up(value: Decimal, precision: Precision) -> Decimal {
    value.round_dp_with_strategy(
        precision.decimal_places(),
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Trait for checked arithmetic operations.
///
/// Provides safe arithmetic methods that return `Result` instead of
/// panicking on overflow or division by zero.
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}
