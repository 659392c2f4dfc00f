//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`PriceCatalog`]: Cached service prices with loading and error states
//! - [`DiscountPolicyResolver`]: Configured discount with fallback
//! - [`QuoteService`]: Per-request quote pricing
//! - [`JobCompletionService`] and [`PartnerEarningsService`]: Partner
//!   commission workflows

pub mod discount_policy;
pub mod partner_earnings;
pub mod price_catalog;
pub mod quote_service;

pub use discount_policy::{DiscountPolicyResolver, PolicySource};
pub use partner_earnings::{JobCompletionService, PartnerDashboard, PartnerEarningsService};
pub use price_catalog::{CatalogSnapshot, PriceCatalog, PriceLookup, PriceLookupError};
pub use quote_service::{PricedQuote, QuoteService};
