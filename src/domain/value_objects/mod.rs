//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`JobId`]: UUID-based job identifier
//! - [`PartnerId`]: String-based partner identifier
//!
//! ## Numeric Types
//!
//! - [`DiscountPolicy`]: Online discount fraction with derived label
//! - [`CommissionRate`]: Partner commission percentage
//! - [`Miles`]: Sanitized positive distance
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//! - [`Precision`]: Currency rounding precision
//!
//! ## Domain Enums
//!
//! - `JobStatus`: Job lifecycle states
//! - `LineItemKind`: Quote line categories
//! - `QuoteBasis`: Provenance of a quote's base price

pub mod arithmetic;
pub mod commission_rate;
pub mod discount;
pub mod distance;
pub mod enums;
pub mod ids;
pub mod timestamp;

pub use arithmetic::{
    round_half_up, ArithmeticError, ArithmeticResult, CheckedArithmetic, Precision,
};
pub use commission_rate::CommissionRate;
pub use discount::DiscountPolicy;
pub use distance::Miles;
pub use enums::{JobStatus, LineItemKind, QuoteBasis};
pub use ids::{JobId, PartnerId};
pub use timestamp::{ReferenceMonth, Timestamp};
