//! # Discount Policy Resolution
//!
//! Turns the configuration store's rate record into the one
//! [`DiscountPolicy`] used for a pricing context.
//!
//! ```text
//! store rate in [0, 1)  → configured policy
//! missing / invalid     → fallback policy (warn)
//! store unreachable     → fallback policy (warn)
//! ```
//!
//! Resolution never fails; the caller always gets a usable policy.

use crate::domain::value_objects::DiscountPolicy;
use crate::infrastructure::persistence::traits::PricingConfigStore;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Where a resolved policy came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySource {
    /// The store's rate record.
    Configured,
    /// The fallback, because the record was missing, invalid, or unreadable.
    Fallback,
}

/// Resolves the online discount policy, falling back when needed.
#[derive(Debug, Clone)]
pub struct DiscountPolicyResolver {
    fallback: DiscountPolicy,
}

impl Default for DiscountPolicyResolver {
    fn default() -> Self {
        Self::new(DiscountPolicy::fallback())
    }
}

impl DiscountPolicyResolver {
    /// Creates a resolver that falls back to `fallback`.
    #[must_use]
    pub fn new(fallback: DiscountPolicy) -> Self {
        Self { fallback }
    }

    /// Returns the fallback policy.
    #[must_use]
    pub fn fallback(&self) -> &DiscountPolicy {
        &self.fallback
    }

    /// Builds a policy from a raw rate record.
    #[must_use]
    pub fn policy_for(&self, rate: Option<Decimal>) -> (DiscountPolicy, PolicySource) {
        let Some(rate) = rate else {
            warn!(fallback = %self.fallback, "no discount rate configured, using fallback");
            return (self.fallback.clone(), PolicySource::Fallback);
        };
        match DiscountPolicy::new(rate) {
            Ok(policy) => {
                debug!(discount = %policy, "discount rate resolved");
                (policy, PolicySource::Configured)
            }
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback, "configured discount rate rejected");
                (self.fallback.clone(), PolicySource::Fallback)
            }
        }
    }

    /// Reads the rate record from `store` and builds a policy.
    pub async fn resolve(&self, store: &dyn PricingConfigStore) -> (DiscountPolicy, PolicySource) {
        match store.discount_rate().await {
            Ok(rate) => self.policy_for(rate),
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback, "discount rate unavailable");
                (self.fallback.clone(), PolicySource::Fallback)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory::InMemoryPricingConfigStore;

    #[test]
    fn configured_rate_is_authoritative() {
        let resolver = DiscountPolicyResolver::default();
        let (policy, source) = resolver.policy_for(Some(Decimal::new(20, 2)));
        assert_eq!(policy.rate(), Decimal::new(20, 2));
        assert_eq!(policy.label(), "20%");
        assert_eq!(source, PolicySource::Configured);
    }

    #[test]
    fn zero_rate_is_valid() {
        let (policy, source) = DiscountPolicyResolver::default().policy_for(Some(Decimal::ZERO));
        assert_eq!(policy.percent(), 0);
        assert_eq!(source, PolicySource::Configured);
    }

    #[test]
    fn missing_or_invalid_rate_falls_back() {
        let resolver = DiscountPolicyResolver::default();
        for record in [None, Some(Decimal::ONE), Some(Decimal::new(15, 0)), Some(Decimal::NEGATIVE_ONE)] {
            let (policy, source) = resolver.policy_for(record);
            assert_eq!(policy, DiscountPolicy::fallback(), "record {record:?}");
            assert_eq!(source, PolicySource::Fallback);
        }
    }

    #[test]
    fn custom_fallback() {
        let fallback = DiscountPolicy::new(Decimal::new(10, 2)).unwrap();
        let resolver = DiscountPolicyResolver::new(fallback.clone());
        assert_eq!(resolver.policy_for(None).0, fallback);
    }

    #[tokio::test]
    async fn resolve_reads_store() {
        let store = InMemoryPricingConfigStore::with_records([], Some(Decimal::new(25, 2)));
        let (policy, source) = DiscountPolicyResolver::default().resolve(&store).await;
        assert_eq!(policy.percent(), 25);
        assert_eq!(source, PolicySource::Configured);
    }

    #[tokio::test]
    async fn resolve_falls_back_when_store_offline() {
        let store = InMemoryPricingConfigStore::with_records([], Some(Decimal::new(25, 2)));
        store.set_unavailable(true);
        let (policy, source) = DiscountPolicyResolver::default().resolve(&store).await;
        assert_eq!(policy, DiscountPolicy::fallback());
        assert_eq!(source, PolicySource::Fallback);
    }
}
