//! # Partner Earnings
//!
//! Job completion and partner commission bookkeeping.
//!
//! This module provides:
//! - [`JobCompletionService`]: Books jobs, completes them, records payouts
//! - [`PartnerEarningsService`]: Read-only partner dashboard
//!
//! # Completion Flow
//!
//! ```text
//! load job ─► reject if completed and credited
//!          ─► (not yet completed) check partner, job.complete(final_price),
//!             commission = final_price × job.commission_rate / 100,
//!             save job
//!          ─► credit partner for this job id
//!          ─► mark job credited, save job
//! ```
//!
//! A job that is completed but not yet credited resumes at the credit
//! step. The partner store credits each job id at most once, so a failure
//! at any step can be retried without losing or doubling the commission.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{Job, Partner};
use crate::domain::services::commission::{compute_commission, compute_monthly_earnings};
use crate::domain::value_objects::{JobId, JobStatus, PartnerId, ReferenceMonth};
use crate::infrastructure::persistence::traits::{JobRepository, PartnerRepository};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Completes jobs and keeps partner totals in step.
#[derive(Debug, Clone)]
pub struct JobCompletionService {
    jobs: Arc<dyn JobRepository>,
    partners: Arc<dyn PartnerRepository>,
}

impl JobCompletionService {
    /// Creates a completion service.
    #[must_use]
    pub fn new(jobs: Arc<dyn JobRepository>, partners: Arc<dyn PartnerRepository>) -> Self {
        Self { jobs, partners }
    }

    /// Books a new job, snapshotting the referring partner's rate.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if `partner_id` is unknown, or
    /// a repository error.
    pub async fn book_job(
        &self,
        service_name: &str,
        partner_id: Option<&PartnerId>,
    ) -> ApplicationResult<Job> {
        let job = match partner_id {
            Some(partner_id) => {
                let partner = self.load_partner(partner_id).await?;
                Job::referred(service_name, &partner)
            }
            None => Job::new(service_name),
        };
        self.jobs.save(&job).await?;
        info!(
            job_id = %job.id(),
            service = %service_name,
            commission_rate = %job.commission_rate(),
            "job booked"
        );
        Ok(job)
    }

    /// Completes a job at `final_price` and credits the partner.
    ///
    /// Calling this again after a failure finishes crediting the partner
    /// at the price recorded by the first call.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::NotFound` if the job or its partner is missing
    /// - `ApplicationError::JobAlreadyCompleted` once the job is completed
    ///   and credited
    /// - `ApplicationError::Domain` for a negative price or a job that is
    ///   not in progress
    /// - `ApplicationError::Infrastructure` if a store fails; the call can
    ///   be retried
    pub async fn complete_job(&self, job_id: &JobId, final_price: Decimal) -> ApplicationResult<Job> {
        let mut job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Job", job_id))?;

        if job.status() == JobStatus::Completed {
            if job.commission_credited() {
                return Err(ApplicationError::job_already_completed(job_id));
            }
            if job.final_price() != Some(final_price) {
                warn!(
                    job_id = %job_id,
                    requested = %final_price,
                    recorded = ?job.final_price(),
                    "resuming completion at the recorded price"
                );
            }
        } else {
            if let Some(partner_id) = job.partner_id() {
                self.load_partner(partner_id).await?;
            }
            job.complete(final_price)?;
            job.record_commission(compute_commission(&job));
            self.jobs.save(&job).await?;
        }

        self.credit_partner(&mut job).await?;

        info!(
            job_id = %job_id,
            final_price = ?job.final_price(),
            commission = ?job.commission_amount(),
            partner_id = ?job.partner_id().map(PartnerId::as_str),
            "job completed"
        );
        Ok(job)
    }

    /// Records a payout to a partner.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the partner is unknown, or
    /// `ApplicationError::Domain` unless `amount > 0`.
    pub async fn record_payout(
        &self,
        partner_id: &PartnerId,
        amount: Decimal,
    ) -> ApplicationResult<Partner> {
        let partner = self
            .partners
            .record_payout(partner_id, amount)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Partner", partner_id))?;
        info!(
            partner_id = %partner_id,
            %amount,
            owed = %partner.commission_owed(),
            "payout recorded"
        );
        Ok(partner)
    }

    async fn credit_partner(&self, job: &mut Job) -> ApplicationResult<()> {
        if let Some(partner_id) = job.partner_id() {
            let commission = job.commission_amount().unwrap_or_default();
            self.partners
                .credit_commission(partner_id, &job.id(), commission)
                .await?
                .ok_or_else(|| ApplicationError::not_found("Partner", partner_id))?;
        }
        job.mark_commission_credited()?;
        self.jobs.save(job).await?;
        Ok(())
    }

    async fn load_partner(&self, partner_id: &PartnerId) -> ApplicationResult<Partner> {
        self.partners
            .get(partner_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Partner", partner_id))
    }
}

/// Summary shown on a partner's earnings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerDashboard {
    /// Partner shown.
    pub partner_id: PartnerId,
    /// Every job the partner referred.
    pub total_referrals: usize,
    /// Referrals that completed.
    pub completed_jobs: usize,
    /// Referrals still pending, accepted, or in progress.
    pub active_jobs: usize,
    /// Referrals called off.
    pub cancelled_jobs: usize,
    /// Lifetime commission.
    pub total_commission_earned: Decimal,
    /// Lifetime payouts.
    pub total_paid: Decimal,
    /// Earned minus paid, never below zero.
    pub commission_owed: Decimal,
    /// Month the earnings figure covers.
    pub month: ReferenceMonth,
    /// Commission from completed jobs created in `month`.
    pub month_earnings: Decimal,
}

/// Builds partner dashboards.
#[derive(Debug, Clone)]
pub struct PartnerEarningsService {
    jobs: Arc<dyn JobRepository>,
    partners: Arc<dyn PartnerRepository>,
}

impl PartnerEarningsService {
    /// Creates an earnings service.
    #[must_use]
    pub fn new(jobs: Arc<dyn JobRepository>, partners: Arc<dyn PartnerRepository>) -> Self {
        Self { jobs, partners }
    }

    /// Returns the dashboard for `partner_id`, with earnings for `month`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the partner is unknown, or a
    /// repository error.
    pub async fn dashboard(
        &self,
        partner_id: &PartnerId,
        month: ReferenceMonth,
    ) -> ApplicationResult<PartnerDashboard> {
        let partner = self
            .partners
            .get(partner_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Partner", partner_id))?;
        let jobs = self.jobs.find_by_partner(partner_id).await?;

        let count = |status: JobStatus| jobs.iter().filter(|job| job.status() == status).count();

        Ok(PartnerDashboard {
            partner_id: partner_id.clone(),
            total_referrals: jobs.len(),
            completed_jobs: count(JobStatus::Completed),
            active_jobs: jobs.iter().filter(|job| job.status().is_active()).count(),
            cancelled_jobs: count(JobStatus::Cancelled),
            total_commission_earned: partner.total_commission_earned(),
            total_paid: partner.total_paid(),
            commission_owed: partner.commission_owed(),
            month,
            month_earnings: compute_monthly_earnings(&jobs, month),
        })
    }
}
