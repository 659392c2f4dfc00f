//! # Domain Errors
//!
//! Error types for business rule violations.
//!
//! The calculators themselves never fail: malformed inputs are dropped
//! from a quote instead of raising. These errors surface from value
//! object construction and from the job lifecycle.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::domain::value_objects::enums::JobStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Discount rate outside `[0, 1)`.
    #[error("invalid discount rate {0}: must be a fraction in [0, 1)")]
    InvalidDiscountRate(Decimal),

    /// Commission rate outside `[0, 100]`.
    #[error("invalid commission rate {0}: must be a percentage in [0, 100]")]
    InvalidCommissionRate(Decimal),

    /// Price that must be positive was not.
    #[error("invalid price for {field}: {value}")]
    InvalidPrice {
        /// Which price was rejected.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// Job status transition not allowed.
    #[error("invalid job status transition: {from} -> {to}")]
    InvalidStateTransition {
        /// Current status.
        from: JobStatus,
        /// Requested status.
        to: JobStatus,
    },

    /// Arithmetic failure.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Returns true if this error comes from an illegal lifecycle step.
    #[must_use]
    pub fn is_state_transition(&self) -> bool {
        matches!(self, Self::InvalidStateTransition { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
