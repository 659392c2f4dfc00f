//! # Commission Calculator
//!
//! Partner commission for completed jobs, and calendar-month aggregation.
//!
//! ```text
//! commission = final_price * job.commission_rate / 100   (rounded to cents)
//! ```
//!
//! The rate is always the one stored on the job at referral time.
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::services::commission::commission_for;
//! use tow_pricing::domain::value_objects::CommissionRate;
//! use rust_decimal::Decimal;
//!
//! let amount = commission_for(Decimal::new(200, 0), CommissionRate::from_percent(15).unwrap()).unwrap();
//! assert_eq!(amount, Decimal::new(3000, 2));
//! ```

use crate::domain::entities::Job;
use crate::domain::value_objects::arithmetic::{
    round_half_up, ArithmeticResult, CheckedArithmetic, Precision,
};
use crate::domain::value_objects::{CommissionRate, ReferenceMonth};
use rust_decimal::Decimal;
use tracing::warn;

/// Computes the commission on `final_price` at `rate`, rounded to cents.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the product overflows.
pub fn commission_for(final_price: Decimal, rate: CommissionRate) -> ArithmeticResult<Decimal> {
    let raw = final_price.safe_mul(rate.percent())?.safe_div(Decimal::ONE_HUNDRED)?;
    Ok(round_half_up(raw, Precision::Cents))
}

/// Computes the commission a job earns its partner.
///
/// Uses the job's snapshotted rate. Returns zero when the job has no
/// final price yet, or when the amount cannot be represented.
#[must_use]
pub fn compute_commission(job: &Job) -> Decimal {
    let Some(final_price) = job.final_price() else {
        return Decimal::ZERO;
    };
    commission_for(final_price, job.commission_rate()).unwrap_or_else(|e| {
        warn!(job_id = %job.id(), error = %e, "commission out of range, counting zero");
        Decimal::ZERO
    })
}

/// Sums commission over every job that counts toward earnings.
///
/// A job whose commission would overflow the running total is left out
/// and logged.
#[must_use]
pub fn compute_total_earnings<'a, I>(jobs: I) -> Decimal
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter()
        .filter(|job| job.contributes_to_earnings())
        .fold(Decimal::ZERO, |total, job| {
            let commission = compute_commission(job);
            total.safe_add(commission).unwrap_or_else(|e| {
                warn!(
                    job_id = %job.id(),
                    %commission,
                    error = %e,
                    "earnings total out of range, skipping job"
                );
                total
            })
        })
}

/// Sums commission for jobs created in `month`.
///
/// Only completed jobs with a final price contribute. Membership is by
/// the calendar month of `created_at`.
#[must_use]
pub fn compute_monthly_earnings<'a, I>(jobs: I, month: ReferenceMonth) -> Decimal
where
    I: IntoIterator<Item = &'a Job>,
{
    compute_total_earnings(
        jobs.into_iter()
            .filter(|job| month.contains(&job.created_at())),
    )
}
