//! # Price Catalog
//!
//! Cached view of the configuration store's service prices.
//!
//! This module provides:
//! - [`PriceCatalog`]: Snapshot holder with async refresh and sync lookup
//! - [`PriceLookup`]: Result of a lookup, with `loading` and `error` flags
//! - [`PriceLookupError`]: Why a lookup fell back
//!
//! # Lookup States
//!
//! ```text
//! never refreshed      → placeholder pair, loading = true
//! first refresh failed → fallback pair,    error = Unavailable
//! unknown service      → fallback pair,    error = UnknownService
//! known service        → configured pair
//! ```
//!
//! A failed refresh after a successful one keeps the previous snapshot.
//! Lookups never fail and never return a zero price.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tow_pricing::application::services::price_catalog::PriceCatalog;
//! use tow_pricing::infrastructure::persistence::in_memory::InMemoryPricingConfigStore;
//! use tow_pricing::infrastructure::persistence::ServicePriceRecord;
//! use rust_decimal::Decimal;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryPricingConfigStore::with_records(
//!     [ServicePriceRecord::new("Towing", Decimal::new(100, 0), true)],
//!     Some(Decimal::new(15, 2)),
//! );
//! let catalog = PriceCatalog::new(Arc::new(store));
//! assert!(catalog.lookup("Towing").loading);
//!
//! catalog.refresh().await.unwrap();
//! assert_eq!(catalog.lookup("Towing").display_price(), Some(Decimal::new(85, 0)));
//! assert_eq!(catalog.lookup("towing").display_price(), None);
//! # });
//! ```

use crate::application::error::{ApplicationResult, InfrastructureError};
use crate::application::services::discount_policy::{DiscountPolicyResolver, PolicySource};
use crate::domain::entities::ServicePrice;
use crate::domain::value_objects::{DiscountPolicy, QuoteBasis, Timestamp};
use crate::infrastructure::persistence::traits::{PricingConfigStore, ServicePriceRecord};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Standard price used for unknown services and while loading.
pub const DEFAULT_FALLBACK_STANDARD_PRICE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Why a lookup returned the fallback pair.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PriceLookupError {
    /// No catalog entry with this exact name.
    #[error("no price configured for service {0:?}")]
    UnknownService(String),

    /// The catalog has never loaded.
    #[error("price catalog unavailable: {0}")]
    Unavailable(String),
}

/// Prices for one service as the UI should see them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLookup {
    /// Phone-booking price.
    pub standard_price: Decimal,
    /// Self-service price.
    pub online_price: Decimal,
    /// Whether the service bills tow miles. False for placeholders.
    pub towing: bool,
    /// True until the catalog's first refresh.
    pub loading: bool,
    /// Set when the prices are the fallback pair.
    pub error: Option<PriceLookupError>,
}

impl PriceLookup {
    /// Returns the online price, or `None` if it should render as a
    /// placeholder.
    #[must_use]
    pub fn display_price(&self) -> Option<Decimal> {
        self.is_resolved().then_some(self.online_price)
    }

    /// Returns true if the prices are configured values.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.loading && self.error.is_none()
    }

    /// Returns the provenance a quote built from this lookup carries.
    #[must_use]
    pub fn basis(&self) -> QuoteBasis {
        if self.loading {
            QuoteBasis::Placeholder
        } else if self.error.is_some() {
            QuoteBasis::Fallback
        } else {
            QuoteBasis::Configured
        }
    }
}

/// One successful read of the configuration store.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    prices: HashMap<String, ServicePrice>,
    discount: DiscountPolicy,
    discount_source: PolicySource,
    refreshed_at: Timestamp,
}

impl CatalogSnapshot {
    /// Returns the number of services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no services are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Returns the policy resolved with this snapshot.
    #[must_use]
    pub fn discount(&self) -> &DiscountPolicy {
        &self.discount
    }

    /// Returns whether the policy came from the store or the fallback.
    #[must_use]
    pub fn discount_source(&self) -> PolicySource {
        self.discount_source
    }

    /// Returns when the snapshot was taken.
    #[must_use]
    pub fn refreshed_at(&self) -> Timestamp {
        self.refreshed_at
    }

    /// Returns every service, sorted by name.
    #[must_use]
    pub fn services(&self) -> Vec<ServicePrice> {
        let mut services: Vec<ServicePrice> = self.prices.values().cloned().collect();
        services.sort_by(|a, b| a.service_name().cmp(b.service_name()));
        services
    }
}

#[derive(Debug, Clone)]
enum CatalogState {
    Loading,
    Failed(String),
    Ready(Arc<CatalogSnapshot>),
}

/// Cached service prices and the discount policy they were derived with.
#[derive(Debug)]
pub struct PriceCatalog {
    store: Arc<dyn PricingConfigStore>,
    resolver: DiscountPolicyResolver,
    fallback_standard_price: Decimal,
    state: RwLock<CatalogState>,
}

impl PriceCatalog {
    /// Creates a catalog in the loading state.
    #[must_use]
    pub fn new(store: Arc<dyn PricingConfigStore>) -> Self {
        Self {
            store,
            resolver: DiscountPolicyResolver::default(),
            fallback_standard_price: DEFAULT_FALLBACK_STANDARD_PRICE,
            state: RwLock::new(CatalogState::Loading),
        }
    }

    /// Sets the discount resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: DiscountPolicyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the standard price of the fallback pair. Non-positive values
    /// are ignored.
    #[must_use]
    pub fn with_fallback_price(mut self, standard_price: Decimal) -> Self {
        if standard_price > Decimal::ZERO {
            self.fallback_standard_price = standard_price;
        } else {
            warn!(%standard_price, "non-positive fallback price ignored");
        }
        self
    }

    /// Reloads prices and the discount rate from the store.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Repository` if the service prices
    /// cannot be read. The previous snapshot stays in place; with none, the
    /// catalog enters the error state.
    pub async fn refresh(&self) -> ApplicationResult<()> {
        let records = match self.store.service_prices().await {
            Ok(records) => records,
            Err(e) => {
                let mut state = self.state.write();
                if matches!(*state, CatalogState::Ready(_)) {
                    warn!(error = %e, "price catalog refresh failed, keeping previous snapshot");
                } else {
                    warn!(error = %e, "price catalog unavailable, serving fallback prices");
                    *state = CatalogState::Failed(e.to_string());
                }
                return Err(InfrastructureError::from(e).into());
            }
        };

        let (discount, discount_source) = self.resolver.resolve(self.store.as_ref()).await;
        let prices = build_prices(records, &discount);
        info!(
            services = prices.len(),
            discount = %discount,
            "price catalog refreshed"
        );

        let snapshot = CatalogSnapshot {
            prices,
            discount,
            discount_source,
            refreshed_at: Timestamp::now(),
        };
        *self.state.write() = CatalogState::Ready(Arc::new(snapshot));
        Ok(())
    }

    /// Returns true until the first refresh attempt completes.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(*self.state.read(), CatalogState::Loading)
    }

    /// Returns the current snapshot, if any refresh has succeeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        match &*self.state.read() {
            CatalogState::Ready(snapshot) => Some(Arc::clone(snapshot)),
            CatalogState::Loading | CatalogState::Failed(_) => None,
        }
    }

    /// Looks up a service by exact name.
    #[must_use]
    pub fn lookup(&self, service_name: &str) -> PriceLookup {
        self.lookup_with_policy(service_name).0
    }

    /// Returns the active discount policy: the snapshot's, or the fallback.
    #[must_use]
    pub fn discount_policy(&self) -> DiscountPolicy {
        match &*self.state.read() {
            CatalogState::Ready(snapshot) => snapshot.discount.clone(),
            CatalogState::Loading | CatalogState::Failed(_) => self.resolver.fallback().clone(),
        }
    }

    /// Looks up a service and returns the policy its prices were derived
    /// with, read from the same snapshot.
    #[must_use]
    pub fn lookup_with_policy(&self, service_name: &str) -> (PriceLookup, DiscountPolicy) {
        let state = self.state.read().clone();
        match state {
            CatalogState::Loading => {
                let policy = self.resolver.fallback().clone();
                let lookup = self.fallback_pair(&policy, true, None);
                (lookup, policy)
            }
            CatalogState::Failed(message) => {
                let policy = self.resolver.fallback().clone();
                let lookup =
                    self.fallback_pair(&policy, false, Some(PriceLookupError::Unavailable(message)));
                (lookup, policy)
            }
            CatalogState::Ready(snapshot) => {
                let policy = snapshot.discount.clone();
                let lookup = match snapshot.prices.get(service_name) {
                    Some(price) => PriceLookup {
                        standard_price: price.standard_price(),
                        online_price: price.online_price(),
                        towing: price.is_towing(),
                        loading: false,
                        error: None,
                    },
                    None => self.fallback_pair(
                        &policy,
                        false,
                        Some(PriceLookupError::UnknownService(service_name.to_string())),
                    ),
                };
                (lookup, policy)
            }
        }
    }

    fn fallback_pair(
        &self,
        policy: &DiscountPolicy,
        loading: bool,
        error: Option<PriceLookupError>,
    ) -> PriceLookup {
        let standard_price = self.fallback_standard_price;
        PriceLookup {
            standard_price,
            online_price: policy.apply(standard_price).unwrap_or(standard_price),
            towing: false,
            loading,
            error,
        }
    }
}

fn build_prices(
    records: Vec<ServicePriceRecord>,
    discount: &DiscountPolicy,
) -> HashMap<String, ServicePrice> {
    let mut prices = HashMap::with_capacity(records.len());
    for record in records {
        let price = match ServicePrice::new(
            record.service_name.as_str(),
            record.standard_price,
            record.towing,
            discount,
        ) {
            Ok(price) => price,
            Err(e) => {
                warn!(service = %record.service_name, error = %e, "skipping invalid price record");
                continue;
            }
        };
        if let Some(stored) = record.online_price
            && stored != price.online_price()
        {
            warn!(
                service = %record.service_name,
                stored = %stored,
                derived = %price.online_price(),
                "stored online price disagrees with discount rate, using derived price"
            );
        }
        prices.insert(record.service_name, price);
    }
    prices
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory::InMemoryPricingConfigStore;

    fn store() -> InMemoryPricingConfigStore {
        InMemoryPricingConfigStore::with_records(
            [
                ServicePriceRecord::new("Towing", Decimal::new(100, 0), true),
                ServicePriceRecord::new("Jump Start", Decimal::new(95, 0), false),
            ],
            Some(Decimal::new(15, 2)),
        )
    }

    fn catalog(store: &InMemoryPricingConfigStore) -> PriceCatalog {
        PriceCatalog::new(Arc::new(store.clone()))
    }

    mod lookup_states {
        use super::*;

        #[test]
        fn loading_before_first_refresh() {
            let catalog = catalog(&store());
            let lookup = catalog.lookup("Towing");
            assert!(lookup.loading);
            assert!(lookup.error.is_none());
            assert!(lookup.standard_price > Decimal::ZERO);
            assert!(lookup.online_price > Decimal::ZERO);
            assert_eq!(lookup.display_price(), None);
            assert_eq!(lookup.basis(), QuoteBasis::Placeholder);
        }

        #[tokio::test]
        async fn known_service_after_refresh() {
            let catalog = catalog(&store());
            catalog.refresh().await.unwrap();

            let lookup = catalog.lookup("Towing");
            assert_eq!(lookup.standard_price, Decimal::new(100, 0));
            assert_eq!(lookup.online_price, Decimal::new(85, 0));
            assert!(lookup.towing);
            assert_eq!(lookup.display_price(), Some(Decimal::new(85, 0)));
            assert_eq!(lookup.basis(), QuoteBasis::Configured);
        }

        #[tokio::test]
        async fn name_match_is_case_sensitive() {
            let catalog = catalog(&store());
            catalog.refresh().await.unwrap();

            let lookup = catalog.lookup("towing");
            assert_eq!(
                lookup.error,
                Some(PriceLookupError::UnknownService("towing".to_string()))
            );
            assert_eq!(lookup.standard_price, DEFAULT_FALLBACK_STANDARD_PRICE);
            assert_eq!(lookup.online_price, Decimal::new(85, 0));
            assert_eq!(lookup.display_price(), None);
            assert_eq!(lookup.basis(), QuoteBasis::Fallback);
        }

        #[tokio::test]
        async fn custom_fallback_price() {
            let catalog = catalog(&store()).with_fallback_price(Decimal::new(150, 0));
            catalog.refresh().await.unwrap();
            let lookup = catalog.lookup("Winch Out");
            assert_eq!(lookup.standard_price, Decimal::new(150, 0));
            assert_eq!(lookup.online_price, Decimal::new(128, 0));
        }

        #[test]
        fn non_positive_fallback_price_ignored() {
            let catalog = catalog(&store()).with_fallback_price(Decimal::ZERO);
            assert_eq!(catalog.lookup("x").standard_price, DEFAULT_FALLBACK_STANDARD_PRICE);
        }
    }

    mod refresh {
        use super::*;

        #[tokio::test]
        async fn first_refresh_failure_enters_error_state() {
            let store = store();
            store.set_unavailable(true);
            let catalog = catalog(&store);

            assert!(catalog.refresh().await.is_err());
            assert!(!catalog.is_loading());

            let lookup = catalog.lookup("Towing");
            assert!(!lookup.loading);
            assert!(matches!(lookup.error, Some(PriceLookupError::Unavailable(_))));
            assert!(lookup.online_price > Decimal::ZERO);
        }

        #[tokio::test]
        async fn failed_refresh_keeps_previous_snapshot() {
            let store = store();
            let catalog = catalog(&store);
            catalog.refresh().await.unwrap();

            store.set_unavailable(true);
            let err = catalog.refresh().await.unwrap_err();
            assert!(err.is_retryable());
            assert_eq!(catalog.lookup("Jump Start").display_price(), Some(Decimal::new(81, 0)));
        }

        #[tokio::test]
        async fn recovers_after_failure() {
            let store = store();
            store.set_unavailable(true);
            let catalog = catalog(&store);
            let _ = catalog.refresh().await;

            store.set_unavailable(false);
            catalog.refresh().await.unwrap();
            assert!(catalog.lookup("Towing").is_resolved());
        }

        #[tokio::test]
        async fn online_price_follows_configured_rate() {
            let store = store();
            store.set_discount_rate(Some(Decimal::new(20, 2))).await;
            let catalog = catalog(&store);
            catalog.refresh().await.unwrap();

            assert_eq!(catalog.lookup("Towing").online_price, Decimal::new(80, 0));
            assert_eq!(catalog.discount_policy().label(), "20%");
            let snapshot = catalog.snapshot().unwrap();
            assert_eq!(snapshot.discount_source(), PolicySource::Configured);
        }

        #[tokio::test]
        async fn stored_online_price_is_not_authoritative() {
            let store = InMemoryPricingConfigStore::with_records(
                [ServicePriceRecord::new("Lockout", Decimal::new(75, 0), false)
                    .with_online_price(Decimal::new(60, 0))],
                Some(Decimal::new(15, 2)),
            );
            let catalog = catalog(&store);
            catalog.refresh().await.unwrap();

            // 75 * 0.85 = 63.75
            assert_eq!(catalog.lookup("Lockout").online_price, Decimal::new(64, 0));
        }

        #[tokio::test]
        async fn invalid_records_are_skipped() {
            let store = store();
            store
                .upsert_service(ServicePriceRecord::new("Free Check", Decimal::ZERO, false))
                .await;
            let catalog = catalog(&store);
            catalog.refresh().await.unwrap();

            let snapshot = catalog.snapshot().unwrap();
            assert_eq!(snapshot.len(), 2);
            assert_eq!(
                snapshot
                    .services()
                    .iter()
                    .map(ServicePrice::service_name)
                    .collect::<Vec<_>>(),
                vec!["Jump Start", "Towing"]
            );
            assert!(catalog.lookup("Free Check").error.is_some());
        }

        #[tokio::test]
        async fn invalid_rate_uses_fallback_policy() {
            let store = store();
            store.set_discount_rate(Some(Decimal::new(15, 0))).await;
            let catalog = catalog(&store);
            catalog.refresh().await.unwrap();

            assert_eq!(catalog.discount_policy(), DiscountPolicy::fallback());
            assert_eq!(
                catalog.snapshot().unwrap().discount_source(),
                PolicySource::Fallback
            );
        }
    }

    #[tokio::test]
    async fn lookup_and_policy_share_snapshot() {
        let catalog = catalog(&store());
        catalog.refresh().await.unwrap();
        let (lookup, policy) = catalog.lookup_with_policy("Towing");
        assert_eq!(policy.apply(lookup.standard_price).unwrap(), lookup.online_price);
    }
}
