//! # Quote Entity
//!
//! An itemized, discount-applied price breakdown shown to a customer
//! before booking.
//!
//! Totals are aggregated from already-rounded line amounts as lines are
//! pushed; nothing re-rounds or re-discounts the aggregate, so a customer
//! adding up the displayed lines always lands on the displayed total.
//!
//! # Examples
//!
//! ```
//! use tow_pricing::domain::entities::quote::{QuoteBuilder, QuoteLineItem};
//! use tow_pricing::domain::value_objects::{DiscountPolicy, LineItemKind};
//! use rust_decimal::Decimal;
//!
//! let policy = DiscountPolicy::fallback();
//! let mut builder = QuoteBuilder::new(policy.clone());
//! builder
//!     .push_line(QuoteLineItem::discounted(LineItemKind::ServiceFee, Decimal::ONE_HUNDRED, &policy).unwrap())
//!     .unwrap();
//! let quote = builder.build();
//!
//! assert_eq!(quote.total(), Decimal::new(85, 0));
//! ```

use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use crate::domain::value_objects::{DiscountPolicy, LineItemKind, QuoteBasis};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One charge on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLineItem {
    kind: LineItemKind,
    label: String,
    original_amount: Decimal,
    discounted_amount: Decimal,
}

impl QuoteLineItem {
    /// Creates a line by discounting `original_amount` with `policy`.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error if discounting overflows.
    pub fn discounted(
        kind: LineItemKind,
        original_amount: Decimal,
        policy: &DiscountPolicy,
    ) -> ArithmeticResult<Self> {
        Ok(Self {
            kind,
            label: kind.label().to_string(),
            original_amount,
            discounted_amount: policy.apply(original_amount)?,
        })
    }

    /// Returns which charge this line is.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> LineItemKind {
        self.kind
    }

    /// Returns the display label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the undiscounted amount.
    #[inline]
    #[must_use]
    pub fn original_amount(&self) -> Decimal {
        self.original_amount
    }

    /// Returns the discounted, whole-unit amount.
    #[inline]
    #[must_use]
    pub fn discounted_amount(&self) -> Decimal {
        self.discounted_amount
    }
}

impl fmt::Display for QuoteLineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.label, self.original_amount, self.discounted_amount
        )
    }
}

/// An itemized quote.
///
/// # Invariants
///
/// - `total == Σ line.discounted_amount`
/// - `original_total == Σ line.original_amount`
/// - Lines appear in [`LineItemKind`] order, each kind at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    line_items: Vec<QuoteLineItem>,
    total: Decimal,
    original_total: Decimal,
    discount: DiscountPolicy,
    basis: QuoteBasis,
}

impl Quote {
    /// Returns the lines in display order.
    #[inline]
    #[must_use]
    pub fn line_items(&self) -> &[QuoteLineItem] {
        &self.line_items
    }

    /// Returns the line of the given kind, if present.
    #[must_use]
    pub fn line(&self, kind: LineItemKind) -> Option<&QuoteLineItem> {
        self.line_items.iter().find(|line| line.kind == kind)
    }

    /// Returns true if a line of the given kind is present.
    #[must_use]
    pub fn has_line(&self, kind: LineItemKind) -> bool {
        self.line(kind).is_some()
    }

    /// Returns the discounted total.
    #[inline]
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns the undiscounted total.
    #[inline]
    #[must_use]
    pub fn original_total(&self) -> Decimal {
        self.original_total
    }

    /// Returns how much the customer saves by booking online.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.original_total - self.total
    }

    /// Returns the discount policy the quote was computed with.
    #[inline]
    #[must_use]
    pub fn discount(&self) -> &DiscountPolicy {
        &self.discount
    }

    /// Returns where the base price came from.
    #[inline]
    #[must_use]
    pub fn basis(&self) -> QuoteBasis {
        self.basis
    }

    /// Returns true if the quote may be presented as final.
    #[inline]
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.basis.is_final()
    }

    /// Returns the quote with a different basis.
    #[must_use]
    pub fn with_basis(mut self, basis: QuoteBasis) -> Self {
        self.basis = basis;
        self
    }
}

/// Builder for [`Quote`].
///
/// Totals are updated as each line is pushed. A line whose amounts would
/// overflow the running totals is rejected and the quote is left as it was.
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    line_items: Vec<QuoteLineItem>,
    total: Decimal,
    original_total: Decimal,
    discount: DiscountPolicy,
    basis: QuoteBasis,
}

impl QuoteBuilder {
    /// Starts an empty quote under `discount`.
    #[must_use]
    pub fn new(discount: DiscountPolicy) -> Self {
        Self {
            line_items: Vec::with_capacity(3),
            total: Decimal::ZERO,
            original_total: Decimal::ZERO,
            discount,
            basis: QuoteBasis::default(),
        }
    }

    /// Sets the quote basis.
    #[must_use]
    pub fn basis(mut self, basis: QuoteBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Appends a line and folds it into both totals.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if either total would overflow;
    /// the builder is unchanged in that case.
    pub fn push_line(&mut self, line: QuoteLineItem) -> ArithmeticResult<&mut Self> {
        let total = self.total.safe_add(line.discounted_amount)?;
        let original_total = self.original_total.safe_add(line.original_amount)?;
        self.total = total;
        self.original_total = original_total;
        self.line_items.push(line);
        Ok(self)
    }

    /// Builds the quote.
    #[must_use]
    pub fn build(mut self) -> Quote {
        self.line_items.sort_by_key(QuoteLineItem::kind);
        Quote {
            line_items: self.line_items,
            total: self.total,
            original_total: self.original_total,
            discount: self.discount,
            basis: self.basis,
        }
    }
}
