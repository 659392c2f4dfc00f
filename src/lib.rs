//! # Tow Pricing
//!
//! Quote and partner commission engine for a towing company's self-service
//! booking flow.
//!
//! ## Layers
//!
//! - [`domain`]: value objects, entities and the pure calculators
//!   (quote breakdown, commission)
//! - [`application`]: price catalog lookup, discount policy resolution,
//!   quote service and partner earnings workflows
//! - [`infrastructure`]: configuration store and record ports with
//!   in-memory adapters, settings loading and logging setup
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::services::quote_calculator::{compute_quote, MileageRates, TripDistances};
//! use tow_pricing::domain::value_objects::DiscountPolicy;
//! use rust_decimal::Decimal;
//!
//! let policy = DiscountPolicy::fallback();
//! let trip = TripDistances::towing(Some(10.0), Some(20.0));
//! let quote = compute_quote(Decimal::ONE_HUNDRED, &trip, &policy, &MileageRates::default());
//!
//! assert_eq!(quote.total(), Decimal::new(236, 0));
//! assert_eq!(quote.original_total(), Decimal::new(27750, 2));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
