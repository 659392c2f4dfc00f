//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`JobStatus`] - Job lifecycle states
//! - [`LineItemKind`] - Which charge a quote line represents
//! - [`QuoteBasis`] - Where a quote's base price came from
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a towing job.
///
/// ```text
/// Pending -> Accepted -> InProgress -> Completed
///    \           \            \
///     +-----------+------------+----> Cancelled
/// ```
///
/// # Examples
///
/// ```
/// use tow_pricing::domain::value_objects::enums::JobStatus;
///
/// assert!(JobStatus::Pending.can_transition_to(JobStatus::Accepted));
/// assert!(!JobStatus::Completed.can_transition_to(JobStatus::Cancelled));
/// assert_eq!(JobStatus::InProgress.to_string(), "in_progress");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum JobStatus {
    /// Booked, waiting for a driver.
    #[default]
    Pending = 0,
    /// A driver accepted the job.
    Accepted = 1,
    /// Driver en route or towing.
    InProgress = 2,
    /// Job finished and priced.
    Completed = 3,
    /// Job called off.
    Cancelled = 4,
}

impl JobStatus {
    /// Returns true if no further transitions are allowed.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if the job is still being worked.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted | Self::InProgress)
    }

    /// Returns true if moving from `self` to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::Pending, Self::Accepted)
            | (Self::Accepted, Self::InProgress)
            | (Self::InProgress, Self::Completed) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The charge a quote line represents, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LineItemKind {
    /// Flat fee for the selected service.
    ServiceFee = 0,
    /// Distance from the driver to the pickup point.
    TravelMiles = 1,
    /// Distance from pickup to drop-off, towing services only.
    TowMiles = 2,
}

impl LineItemKind {
    /// Returns the label shown next to the line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ServiceFee => "Service fee",
            Self::TravelMiles => "Travel miles",
            Self::TowMiles => "Tow miles",
        }
    }
}

impl fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceFee => write!(f, "service_fee"),
            Self::TravelMiles => write!(f, "travel_miles"),
            Self::TowMiles => write!(f, "tow_miles"),
        }
    }
}

/// Where a quote's base service price came from.
///
/// Only [`QuoteBasis::Configured`] quotes are final. A `Placeholder` quote
/// was computed while the catalog was still loading; callers should keep
/// showing their loading state instead of presenting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteBasis {
    /// Price read from configuration.
    #[default]
    Configured,
    /// Configuration had no usable entry; hard-coded fallback used.
    Fallback,
    /// Configuration not yet loaded; conservative placeholder used.
    Placeholder,
}

impl QuoteBasis {
    /// Returns true if a quote on this basis can be shown as final.
    #[inline]
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Configured)
    }
}

impl fmt::Display for QuoteBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured => write!(f, "configured"),
            Self::Fallback => write!(f, "fallback"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}
