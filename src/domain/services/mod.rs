//! # Domain Services
//!
//! Pure calculators that don't belong to a single entity.
//!
//! ## Services
//!
//! - [`quote_calculator`]: Itemized customer quotes
//! - [`commission`]: Partner commission and monthly earnings

pub mod commission;
pub mod quote_calculator;

pub use commission::{
    commission_for, compute_commission, compute_monthly_earnings, compute_total_earnings,
};
pub use quote_calculator::{compute_quote, MileageRates, QuoteCalculator, TripDistances};
