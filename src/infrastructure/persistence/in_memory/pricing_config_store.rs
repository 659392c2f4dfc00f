//! # In-Memory Pricing Config Store
//!
//! In-memory implementation of [`PricingConfigStore`].
//!
//! Seeded from [`Settings`] by the CLI, and used by tests to simulate a
//! missing rate record or an unreachable store.

use crate::infrastructure::config::Settings;
use crate::infrastructure::persistence::traits::{
    PricingConfigStore, RepositoryError, RepositoryResult, ServicePriceRecord,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`PricingConfigStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPricingConfigStore {
    services: Arc<RwLock<BTreeMap<String, ServicePriceRecord>>>,
    discount_rate: Arc<RwLock<Option<Decimal>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryPricingConfigStore {
    /// Creates an empty store with no discount rate record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `services` and `discount_rate`.
    #[must_use]
    pub fn with_records(
        services: impl IntoIterator<Item = ServicePriceRecord>,
        discount_rate: Option<Decimal>,
    ) -> Self {
        let services = services
            .into_iter()
            .map(|record| (record.service_name.clone(), record))
            .collect();
        Self {
            services: Arc::new(RwLock::new(services)),
            discount_rate: Arc::new(RwLock::new(discount_rate)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a store seeded from the `services` and
    /// `pricing.discount_rate` settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_records(settings.services.iter().cloned(), settings.pricing.discount_rate)
    }

    /// Inserts or replaces a service record.
    pub async fn upsert_service(&self, record: ServicePriceRecord) {
        let mut services = self.services.write().await;
        services.insert(record.service_name.clone(), record);
    }

    /// Replaces the discount rate record; `None` removes it.
    pub async fn set_discount_rate(&self, rate: Option<Decimal>) {
        *self.discount_rate.write().await = rate;
    }

    /// Makes every read fail with `RepositoryError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("pricing configuration store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl PricingConfigStore for InMemoryPricingConfigStore {
    async fn service_prices(&self) -> RepositoryResult<Vec<ServicePriceRecord>> {
        self.check_available()?;
        let services = self.services.read().await;
        Ok(services.values().cloned().collect())
    }

    async fn discount_rate(&self) -> RepositoryResult<Option<Decimal>> {
        self.check_available()?;
        Ok(*self.discount_rate.read().await)
    }
}
