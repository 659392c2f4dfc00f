//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! The pricing configuration lives in an external document store; jobs and
//! partners are records the site keeps alongside it. Implementations can be
//! swapped without touching the services.
//!
//! # Available Ports
//!
//! - [`PricingConfigStore`]: Service catalog and the discount rate record
//! - [`JobRepository`]: Persistence for jobs
//! - [`PartnerRepository`]: Persistence for referral partners
//!
//! # Examples
//!
//! ```ignore
//! use tow_pricing::infrastructure::persistence::traits::JobRepository;
//!
//! async fn referrals(repo: &impl JobRepository, partner: &PartnerId) {
//!     let jobs = repo.find_by_partner(partner).await?;
//!     println!("{} referrals", jobs.len());
//! }
//! ```

use crate::domain::entities::{Job, Partner};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{JobId, PartnerId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// An in-place update was refused by the entity's own rules.
    #[error("Update rejected: {0}")]
    Rejected(#[from] DomainError),
}

impl RepositoryError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Returns true if the store could not be reached.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A catalog entry as stored in the configuration store.
///
/// `online_price` is what the store happens to hold; the catalog re-derives
/// it from the configured discount rate and only compares against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePriceRecord {
    /// Display name, matched case-sensitively.
    pub service_name: String,
    /// Phone-booking price.
    pub standard_price: Decimal,
    /// Stored self-service price, if any.
    #[serde(default)]
    pub online_price: Option<Decimal>,
    /// Whether the service bills tow miles.
    #[serde(default)]
    pub towing: bool,
}

impl ServicePriceRecord {
    /// Creates a record without a stored online price.
    #[must_use]
    pub fn new(service_name: impl Into<String>, standard_price: Decimal, towing: bool) -> Self {
        Self {
            service_name: service_name.into(),
            standard_price,
            online_price: None,
            towing,
        }
    }

    /// Sets the stored online price.
    #[must_use]
    pub fn with_online_price(mut self, online_price: Decimal) -> Self {
        self.online_price = Some(online_price);
        self
    }
}

/// Read access to the pricing configuration.
///
/// # Examples
///
/// ```ignore
/// use tow_pricing::infrastructure::persistence::traits::PricingConfigStore;
///
/// async fn example(store: &impl PricingConfigStore) {
///     let rate = store.discount_rate().await?;
///     let prices = store.service_prices().await?;
/// }
/// ```
#[async_trait]
pub trait PricingConfigStore: Send + Sync + fmt::Debug {
    /// Returns every configured service price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if the store cannot be read.
    async fn service_prices(&self) -> RepositoryResult<Vec<ServicePriceRecord>>;

    /// Returns the configured online discount rate as a fraction.
    ///
    /// Returns `None` if no rate record exists. The value is not validated
    /// here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if the store cannot be read.
    async fn discount_rate(&self) -> RepositoryResult<Option<Decimal>>;
}

/// Repository for jobs.
#[async_trait]
pub trait JobRepository: Send + Sync + fmt::Debug {
    /// Saves a job, replacing any previous version.
    async fn save(&self, job: &Job) -> RepositoryResult<()>;

    /// Gets a job by ID.
    ///
    /// Returns `None` if the job does not exist.
    async fn get(&self, id: &JobId) -> RepositoryResult<Option<Job>>;

    /// Finds every job referred by a partner, oldest first.
    async fn find_by_partner(&self, partner_id: &PartnerId) -> RepositoryResult<Vec<Job>>;
}

/// Repository for referral partners.
///
/// Balance changes go through [`credit_commission`] and [`record_payout`],
/// which apply the change to the stored record in one step. Reading a
/// partner, changing it and calling [`save`] loses updates made in
/// between.
///
/// [`credit_commission`]: PartnerRepository::credit_commission
/// [`record_payout`]: PartnerRepository::record_payout
/// [`save`]: PartnerRepository::save
#[async_trait]
pub trait PartnerRepository: Send + Sync + fmt::Debug {
    /// Saves a partner, replacing any previous version.
    async fn save(&self, partner: &Partner) -> RepositoryResult<()>;

    /// Gets a partner by ID.
    ///
    /// Returns `None` if the partner does not exist.
    async fn get(&self, id: &PartnerId) -> RepositoryResult<Option<Partner>>;

    /// Adds the commission earned on `job_id` to the partner's lifetime
    /// total and returns the updated partner.
    ///
    /// Crediting the same job again leaves the total unchanged. Returns
    /// `None` if the partner does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` for a negative amount or an
    /// overflowing total.
    async fn credit_commission(
        &self,
        id: &PartnerId,
        job_id: &JobId,
        amount: Decimal,
    ) -> RepositoryResult<Option<Partner>>;

    /// Adds `amount` to the partner's lifetime payouts and returns the
    /// updated partner, or `None` if the partner does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Rejected` unless `amount > 0`.
    async fn record_payout(
        &self,
        id: &PartnerId,
        amount: Decimal,
    ) -> RepositoryResult<Option<Partner>>;
}
