//! # Job Entity
//!
//! A booked tow or roadside job, optionally referred by a partner.
//!
//! The commission rate is copied from the referring partner when the job
//! is created. Later changes to the partner's rate do not touch it.
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::entities::{Job, Partner};
//! use tow_pricing::domain::value_objects::{CommissionRate, JobStatus, PartnerId};
//! use rust_decimal::Decimal;
//!
//! let partner = Partner::new(PartnerId::new("p-1"), "Garage", CommissionRate::from_percent(10).unwrap());
//! let mut job = Job::referred("Towing", &partner);
//! job.accept().unwrap();
//! job.start().unwrap();
//! job.complete(Decimal::new(200, 0)).unwrap();
//!
//! assert_eq!(job.status(), JobStatus::Completed);
//! assert_eq!(job.commission_rate().percent(), Decimal::TEN);
//! ```

use crate::domain::entities::partner::Partner;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CommissionRate, JobId, JobStatus, PartnerId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A towing or roadside job.
///
/// # Invariants
///
/// - `commission_rate` is fixed at creation
/// - `final_price` and `completed_at` are set together on completion
/// - `commission_credited` is only set once the job is completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    service_name: String,
    partner_id: Option<PartnerId>,
    status: JobStatus,
    final_price: Option<Decimal>,
    commission_rate: CommissionRate,
    commission_amount: Option<Decimal>,
    #[serde(default)]
    commission_credited: bool,
    created_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl Job {
    /// Creates a job booked directly, with no referring partner.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            id: JobId::new_v4(),
            service_name: service_name.into(),
            partner_id: None,
            status: JobStatus::Pending,
            final_price: None,
            commission_rate: CommissionRate::default(),
            commission_amount: None,
            commission_credited: false,
            created_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// Creates a job referred by `partner`, snapshotting their current rate.
    #[must_use]
    pub fn referred(service_name: impl Into<String>, partner: &Partner) -> Self {
        Self {
            partner_id: Some(partner.id().clone()),
            commission_rate: partner.commission_rate(),
            ..Self::new(service_name)
        }
    }

    /// Overrides the creation time, for imported records.
    #[must_use]
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the job id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Returns the booked service.
    #[inline]
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the referring partner, if any.
    #[inline]
    #[must_use]
    pub fn partner_id(&self) -> Option<&PartnerId> {
        self.partner_id.as_ref()
    }

    /// Returns the lifecycle status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the price charged, once completed.
    #[inline]
    #[must_use]
    pub fn final_price(&self) -> Option<Decimal> {
        self.final_price
    }

    /// Returns the commission rate captured at referral time.
    #[inline]
    #[must_use]
    pub fn commission_rate(&self) -> CommissionRate {
        self.commission_rate
    }

    /// Returns the commission recorded on completion.
    #[inline]
    #[must_use]
    pub fn commission_amount(&self) -> Option<Decimal> {
        self.commission_amount
    }

    /// Returns true once the commission has been added to the partner's
    /// total.
    #[inline]
    #[must_use]
    pub fn commission_credited(&self) -> bool {
        self.commission_credited
    }

    /// Returns the creation time.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the completion time.
    #[inline]
    #[must_use]
    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    /// Returns true if the job counts toward partner earnings.
    #[must_use]
    pub fn contributes_to_earnings(&self) -> bool {
        self.status == JobStatus::Completed && self.final_price.is_some()
    }

    /// Marks the job accepted by a driver.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless pending.
    pub fn accept(&mut self) -> DomainResult<()> {
        self.transition(JobStatus::Accepted)
    }

    /// Marks the job in progress.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless accepted.
    pub fn start(&mut self) -> DomainResult<()> {
        self.transition(JobStatus::InProgress)
    }

    /// Cancels the job.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if already completed
    /// or cancelled.
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.transition(JobStatus::Cancelled)
    }

    /// Completes the job at `final_price`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` for a negative price, or
    /// `DomainError::InvalidStateTransition` unless in progress.
    pub fn complete(&mut self, final_price: Decimal) -> DomainResult<()> {
        if final_price < Decimal::ZERO {
            return Err(DomainError::InvalidPrice {
                field: "final_price",
                value: final_price,
            });
        }
        self.transition(JobStatus::Completed)?;
        self.final_price = Some(final_price);
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }

    /// Stores the commission computed for this job.
    pub fn record_commission(&mut self, amount: Decimal) {
        self.commission_amount = Some(amount);
    }

    /// Marks the commission as added to the partner's total.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless completed.
    pub fn mark_commission_credited(&mut self) -> DomainResult<()> {
        if self.status != JobStatus::Completed {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: JobStatus::Completed,
            });
        }
        self.commission_credited = true;
        Ok(())
    }

    fn transition(&mut self, to: JobStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
