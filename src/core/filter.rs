//! Predicate combinators that narrow a bill collection.
//!
//! All predicates are conjunctive. The filter is pure and stable: it never
//! mutates its input and preserves the input's relative order.

use chrono::NaiveDate;

use crate::core::services::ServiceError;
use crate::domain::{Bill, BillDirection, BillStatus};

/// Payment-state predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

/// Category predicate. `Name` is an exact, case-sensitive match: filter
/// values are chosen from the category list itself, never free-typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Name(String),
}

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ServiceError> {
        if end < start {
            return Err(ServiceError::Invalid(
                "window end must not be before start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Conjunctive filter over a bill collection.
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub search: String,
    /// When omitted, no direction restriction applies (the payables view
    /// omits it; the receivables view always supplies `Receivable`).
    pub direction: Option<BillDirection>,
    /// Matches on `payment_date`; bills without one are excluded while a
    /// window is active.
    pub payment_window: Option<DateWindow>,
}

impl BillFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category = CategoryFilter::Name(name.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_direction(mut self, direction: BillDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_payment_window(mut self, window: DateWindow) -> Self {
        self.payment_window = Some(window);
        self
    }

    pub fn matches(&self, bill: &Bill) -> bool {
        self.matches_status(bill)
            && self.matches_category(bill)
            && self.matches_search(bill)
            && self.matches_direction(bill)
            && self.matches_payment_window(bill)
    }

    /// Narrows `bills` to those matching every predicate, preserving order.
    pub fn apply<'a>(&self, bills: &'a [Bill]) -> Vec<&'a Bill> {
        bills.iter().filter(|bill| self.matches(bill)).collect()
    }

    fn matches_status(&self, bill: &Bill) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Paid => bill.status == BillStatus::Paid,
            StatusFilter::Unpaid => bill.status == BillStatus::Unpaid,
        }
    }

    fn matches_category(&self, bill: &Bill) -> bool {
        match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Name(name) => bill.category == *name,
        }
    }

    fn matches_search(&self, bill: &Bill) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        if bill.counterparty_name.to_lowercase().contains(&needle) {
            return true;
        }
        bill.notes
            .as_ref()
            .map(|notes| notes.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    fn matches_direction(&self, bill: &Bill) -> bool {
        match self.direction {
            None => true,
            Some(direction) => bill.direction == direction,
        }
    }

    fn matches_payment_window(&self, bill: &Bill) -> bool {
        match self.payment_window {
            None => true,
            Some(window) => bill
                .payment_date
                .map(|date| window.contains(date))
                .unwrap_or(false),
        }
    }
}
