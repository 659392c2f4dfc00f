//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Pricing reads never fail outward: catalog and discount problems degrade
//! to fallbacks and surface as flags on the result. These errors come from
//! the partner workflows and from loading settings.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - Business rule violations
//! ├── Infrastructure(InfrastructureError) - Store and config failures
//! ├── NotFound { .. }                     - Job or partner missing
//! └── JobAlreadyCompleted(String)         - Second completion attempt
//! ```
//!
//! # Examples
//!
//! ```
//! use tow_pricing::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::not_found("Partner", "p-42");
//! assert!(err.is_not_found());
//!
//! let app_err: ApplicationError = InfrastructureError::configuration("bad rate").into();
//! assert!(app_err.to_string().contains("bad rate"));
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
///
/// Failures from the configuration store, the record stores, and settings.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl InfrastructureError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if retrying later may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Repository(e) => e.is_unavailable(),
            Self::Configuration(_) => false,
        }
    }
}

/// Result type for infrastructure operations.
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from external systems.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Job was already completed; its commission has been counted.
    #[error("job already completed: {0}")]
    JobAlreadyCompleted(String),
}

impl ApplicationError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a job already completed error.
    #[must_use]
    pub fn job_already_completed(job_id: impl ToString) -> Self {
        Self::JobAlreadyCompleted(job_id.to_string())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if retrying later may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Infrastructure(e) if e.is_retryable())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Rejected(e) => Self::Domain(e),
            other => Self::Infrastructure(other.into()),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::JobStatus;
    use rust_decimal::Decimal;

    #[test]
    fn infrastructure_error_configuration() {
        let err = InfrastructureError::configuration("missing rate");
        assert!(err.to_string().contains("configuration"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn infrastructure_error_from_repository_error() {
        let infra_err: InfrastructureError = RepositoryError::unavailable("timeout").into();
        assert!(infra_err.to_string().contains("timeout"));
        assert!(infra_err.is_retryable());
    }

    #[test]
    fn application_error_not_found() {
        let err = ApplicationError::not_found("Job", "job-123");
        assert!(err.to_string().contains("Job"));
        assert!(err.to_string().contains("job-123"));
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[test]
    fn application_error_from_domain_error() {
        let domain_err = DomainError::InvalidStateTransition {
            from: JobStatus::Completed,
            to: JobStatus::Cancelled,
        };
        let app_err: ApplicationError = domain_err.into();
        assert!(app_err.to_string().contains("completed -> cancelled"));
    }

    #[test]
    fn application_error_from_repository_error() {
        let app_err: ApplicationError = RepositoryError::unavailable("offline").into();
        assert!(app_err.to_string().contains("infrastructure"));
        assert!(app_err.is_retryable());
    }

    #[test]
    fn rejected_update_surfaces_as_domain_error() {
        let rejected = RepositoryError::Rejected(DomainError::InvalidPrice {
            field: "payout",
            value: Decimal::ZERO,
        });
        let app_err: ApplicationError = rejected.into();
        assert!(matches!(app_err, ApplicationError::Domain(DomainError::InvalidPrice { .. })));
        assert!(!app_err.is_retryable());
    }

    #[test]
    fn application_error_not_retryable() {
        assert!(!ApplicationError::job_already_completed("job-1").is_retryable());
    }
}
