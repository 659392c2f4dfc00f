//! # Timestamp Value Object
//!
//! DateTime wrapper with the calendar helpers earnings reports need.
//!
//! This module provides:
//! - [`Timestamp`]: a UTC point in time
//! - [`ReferenceMonth`]: a calendar year/month used to bucket earnings
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::value_objects::timestamp::{ReferenceMonth, Timestamp};
//!
//! let ts = Timestamp::from_ymd_hms(2024, 3, 31, 23, 59, 59).unwrap();
//! assert!(ReferenceMonth::new(2024, 3).unwrap().contains(&ts));
//! assert!(!ReferenceMonth::new(2024, 4).unwrap().contains(&ts));
//! ```

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// # Invariants
///
/// - Always in UTC timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from calendar fields.
    ///
    /// Returns `None` if the fields do not form a valid date and time.
    #[must_use]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .map(Self)
    }

    /// Returns the calendar year.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the calendar month (1-12).
    #[inline]
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the calendar month this timestamp falls in.
    #[must_use]
    pub fn reference_month(&self) -> ReferenceMonth {
        ReferenceMonth {
            year: self.year(),
            month: self.month(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// A calendar month, used to bucket earnings.
///
/// Membership is by calendar year and month, not a rolling 30-day window:
/// March 31st and April 1st fall in different months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferenceMonth {
    year: i32,
    month: u32,
}

impl ReferenceMonth {
    /// Creates a reference month.
    ///
    /// Returns `None` if `month` is not in `1..=12`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Returns the month containing the current moment.
    #[must_use]
    pub fn current() -> Self {
        Timestamp::now().reference_month()
    }

    /// Returns the year.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[inline]
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns true if `ts` falls in this calendar month.
    #[inline]
    #[must_use]
    pub fn contains(&self, ts: &Timestamp) -> bool {
        ts.year() == self.year && ts.month() == self.month
    }
}

impl fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
