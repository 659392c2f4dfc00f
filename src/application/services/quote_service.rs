//! # Quote Service
//!
//! Prices a service request against the current catalog snapshot.
//!
//! Each call reads the catalog once, so the lookup, the discount policy
//! and the banner text all agree. Quotes built while the catalog is still
//! loading carry [`QuoteBasis::Placeholder`] and must not be shown as
//! final.

use crate::application::services::price_catalog::{PriceCatalog, PriceLookup};
use crate::domain::entities::Quote;
use crate::domain::services::quote_calculator::{MileageRates, QuoteCalculator, TripDistances};
use crate::domain::value_objects::{DiscountPolicy, QuoteBasis};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// A quote together with the lookup it was priced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedQuote {
    /// Requested service name.
    pub service_name: String,
    /// Catalog lookup used for the base price.
    pub lookup: PriceLookup,
    /// Itemized quote.
    pub quote: Quote,
}

impl PricedQuote {
    /// Returns true if the quote was built from configured prices.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.quote.is_final()
    }

    /// Returns the total to display, or `None` while it is a placeholder.
    #[must_use]
    pub fn display_total(&self) -> Option<Decimal> {
        self.is_final().then(|| self.quote.total())
    }
}

/// Builds quotes from the catalog and the calculator.
#[derive(Debug, Clone)]
pub struct QuoteService {
    catalog: Arc<PriceCatalog>,
    calculator: QuoteCalculator,
}

impl QuoteService {
    /// Creates a quote service.
    #[must_use]
    pub fn new(catalog: Arc<PriceCatalog>, rates: MileageRates) -> Self {
        Self {
            catalog,
            calculator: QuoteCalculator::new(rates),
        }
    }

    /// Returns the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<PriceCatalog> {
        &self.catalog
    }

    /// Prices `service_name` for `trip`.
    ///
    /// For a configured service the catalog's towing flag decides whether
    /// tow miles are billed; otherwise the trip's own flag is used.
    #[must_use]
    pub fn quote(&self, service_name: &str, trip: TripDistances) -> PricedQuote {
        let (lookup, discount) = self.catalog.lookup_with_policy(service_name);
        let basis = lookup.basis();

        let trip = match basis {
            QuoteBasis::Configured => TripDistances {
                is_towing: lookup.towing,
                ..trip
            },
            QuoteBasis::Fallback | QuoteBasis::Placeholder => {
                debug!(service = %service_name, %basis, "quoting without a configured price");
                trip
            }
        };

        let quote = self
            .calculator
            .compute(lookup.standard_price, &trip, &discount)
            .with_basis(basis);

        PricedQuote {
            service_name: service_name.to_string(),
            lookup,
            quote,
        }
    }

    /// Returns the active discount as a fraction.
    #[must_use]
    pub fn online_discount_rate(&self) -> Decimal {
        self.catalog.discount_policy().rate()
    }

    /// Returns the discount display text, e.g. `"15%"`.
    #[must_use]
    pub fn discount_text(&self) -> String {
        self.catalog.discount_policy().label().to_string()
    }

    /// Returns the banner advertising the online discount.
    #[must_use]
    pub fn savings_banner(&self) -> String {
        banner(&self.catalog.discount_policy())
    }
}

fn banner(policy: &DiscountPolicy) -> String {
    format!("Save {} when you book online", policy.label())
}
