//! # In-Memory Partner Repository
//!
//! In-memory implementation of [`PartnerRepository`] for testing.

use crate::domain::entities::Partner;
use crate::domain::value_objects::{JobId, PartnerId};
use crate::infrastructure::persistence::traits::{PartnerRepository, RepositoryResult};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct PartnerLedger {
    partners: HashMap<PartnerId, Partner>,
    credited_jobs: HashSet<JobId>,
}

/// In-memory implementation of [`PartnerRepository`].
///
/// Partners and the set of already credited jobs sit behind one lock, so
/// balance updates are applied whole.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPartnerRepository {
    storage: Arc<RwLock<PartnerLedger>>,
}

impl InMemoryPartnerRepository {
    /// Creates a new empty in-memory partner repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartnerRepository for InMemoryPartnerRepository {
    async fn save(&self, partner: &Partner) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.partners.insert(partner.id().clone(), partner.clone());
        Ok(())
    }

    async fn get(&self, id: &PartnerId) -> RepositoryResult<Option<Partner>> {
        let storage = self.storage.read().await;
        Ok(storage.partners.get(id).cloned())
    }

    async fn credit_commission(
        &self,
        id: &PartnerId,
        job_id: &JobId,
        amount: Decimal,
    ) -> RepositoryResult<Option<Partner>> {
        let mut storage = self.storage.write().await;
        let PartnerLedger {
            partners,
            credited_jobs,
        } = &mut *storage;

        let Some(partner) = partners.get_mut(id) else {
            return Ok(None);
        };
        if credited_jobs.contains(job_id) {
            debug!(partner_id = %id, job_id = %job_id, "commission already credited");
            return Ok(Some(partner.clone()));
        }

        partner.add_commission(amount)?;
        credited_jobs.insert(*job_id);
        Ok(Some(partner.clone()))
    }

    async fn record_payout(
        &self,
        id: &PartnerId,
        amount: Decimal,
    ) -> RepositoryResult<Option<Partner>> {
        let mut storage = self.storage.write().await;
        let Some(partner) = storage.partners.get_mut(id) else {
            return Ok(None);
        };
        partner.record_payout(amount)?;
        Ok(Some(partner.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CommissionRate;
    use crate::infrastructure::persistence::traits::RepositoryError;

    async fn seeded() -> (InMemoryPartnerRepository, PartnerId) {
        let repo = InMemoryPartnerRepository::new();
        let partner = Partner::new(
            PartnerId::new("p-1"),
            "Main St Garage",
            CommissionRate::from_percent(12).unwrap(),
        );
        repo.save(&partner).await.unwrap();
        (repo, partner.id().clone())
    }

    #[tokio::test]
    async fn save_and_get() {
        let (repo, id) = seeded().await;
        let mut partner = repo.get(&id).await.unwrap().unwrap();
        partner.set_commission_rate(CommissionRate::from_percent(20).unwrap());
        repo.save(&partner).await.unwrap();

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.commission_rate(), CommissionRate::from_percent(20).unwrap());
        assert!(repo.get(&PartnerId::new("p-2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn credits_each_job_once() {
        let (repo, id) = seeded().await;
        let first = JobId::new_v4();
        let second = JobId::new_v4();

        repo.credit_commission(&id, &first, Decimal::new(15, 0)).await.unwrap();
        repo.credit_commission(&id, &second, Decimal::new(5, 0)).await.unwrap();
        let partner = repo
            .credit_commission(&id, &first, Decimal::new(15, 0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(partner.total_commission_earned(), Decimal::new(20, 0));
    }

    #[tokio::test]
    async fn concurrent_credits_all_land() {
        let (repo, id) = seeded().await;
        let credits = (0..8).map(|_| {
            let repo = repo.clone();
            let id = id.clone();
            tokio::spawn(async move {
                repo.credit_commission(&id, &JobId::new_v4(), Decimal::new(250, 2))
                    .await
                    .unwrap();
            })
        });
        for handle in credits.collect::<Vec<_>>() {
            handle.await.unwrap();
        }

        let partner = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(partner.total_commission_earned(), Decimal::new(20, 0));
    }

    #[tokio::test]
    async fn rejected_credit_leaves_total() {
        let (repo, id) = seeded().await;
        let job_id = JobId::new_v4();
        let err = repo
            .credit_commission(&id, &job_id, Decimal::new(-1, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Rejected(_)));

        let partner = repo
            .credit_commission(&id, &job_id, Decimal::new(3, 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(partner.total_commission_earned(), Decimal::new(3, 0));
    }

    #[tokio::test]
    async fn payouts_accumulate() {
        let (repo, id) = seeded().await;
        repo.record_payout(&id, Decimal::new(10, 0)).await.unwrap();
        let partner = repo.record_payout(&id, Decimal::new(5, 0)).await.unwrap().unwrap();
        assert_eq!(partner.total_paid(), Decimal::new(15, 0));

        let err = repo.record_payout(&id, Decimal::ZERO).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Rejected(_)));
    }

    #[tokio::test]
    async fn unknown_partner_is_none() {
        let repo = InMemoryPartnerRepository::new();
        let id = PartnerId::new("ghost");
        assert!(
            repo.credit_commission(&id, &JobId::new_v4(), Decimal::ONE)
                .await
                .unwrap()
                .is_none()
        );
        assert!(repo.record_payout(&id, Decimal::ONE).await.unwrap().is_none());
    }
}
