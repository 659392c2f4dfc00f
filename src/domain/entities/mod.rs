//! # Domain Entities
//!
//! ## Aggregates
//!
//! - [`Job`]: Booked job with lifecycle and snapshotted commission rate
//! - [`Partner`]: Referral partner with commission totals
//!
//! ## Entities
//!
//! - [`Quote`]: Itemized customer quote
//! - [`ServicePrice`]: Catalog entry for one service

pub mod job;
pub mod partner;
pub mod quote;
pub mod service_price;

pub use job::Job;
pub use partner::Partner;
pub use quote::{Quote, QuoteBuilder, QuoteLineItem};
pub use service_price::ServicePrice;
