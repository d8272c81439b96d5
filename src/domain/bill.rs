//! Domain types representing payable and receivable bills.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// Days ahead of the due date covered by the per-bill "due soon" badge.
pub const BADGE_DUE_SOON_DAYS: i64 = 3;
/// Days ahead of the due date covered by the dashboard "due soon" bucket.
/// Intentionally wider than the badge threshold.
pub const AGGREGATE_DUE_SOON_DAYS: i64 = 7;

/// Payment state persisted with the bill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Paid,
    Unpaid,
}

/// Which side of the books the bill lives on. A discriminator field, not an
/// entity of its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillDirection {
    Payable,
    Receivable,
}

/// Presentation status combining the payment state with due-date proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Paid,
    Overdue,
    DueSoon,
    Current,
}

/// A single payable or receivable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub counterparty_name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depositor_id: Option<Uuid>,
    pub status: BillStatus,
    pub direction: BillDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input accepted when creating a bill.
#[derive(Debug, Clone)]
pub struct BillDraft {
    pub counterparty_name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub category: String,
    pub category_id: Option<Uuid>,
    pub depositor_id: Option<Uuid>,
    pub status: BillStatus,
    pub direction: BillDirection,
    pub notes: Option<String>,
    pub invoice_number: Option<String>,
}

impl BillDraft {
    pub fn new(
        counterparty_name: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
        category: impl Into<String>,
        direction: BillDirection,
    ) -> Self {
        Self {
            counterparty_name: counterparty_name.into(),
            amount,
            due_date,
            payment_date: None,
            category: category.into(),
            category_id: None,
            depositor_id: None,
            status: BillStatus::Unpaid,
            direction,
            notes: None,
            invoice_number: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Bill {
    pub fn new(draft: BillDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            counterparty_name: draft.counterparty_name,
            amount: draft.amount,
            due_date: draft.due_date,
            payment_date: draft.payment_date,
            category: draft.category,
            category_id: draft.category_id,
            depositor_id: draft.depositor_id,
            status: draft.status,
            direction: draft.direction,
            notes: draft.notes,
            invoice_number: draft.invoice_number,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    /// Presentation status relative to the given calendar day.
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        derive_status(self.due_date, self.status, today)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Derives the presentation status from the payment state and due date.
///
/// `Paid` wins regardless of date. Otherwise the comparison happens at day
/// granularity: past due dates are `Overdue`, dates within the badge window
/// are `DueSoon`, anything later is `Current`.
pub fn derive_status(due_date: NaiveDate, status: BillStatus, today: NaiveDate) -> DisplayStatus {
    if status == BillStatus::Paid {
        return DisplayStatus::Paid;
    }
    if due_date < today {
        DisplayStatus::Overdue
    } else if due_date <= today + Duration::days(BADGE_DUE_SOON_DAYS) {
        DisplayStatus::DueSoon
    } else {
        DisplayStatus::Current
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Bill {
    fn name(&self) -> &str {
        &self.counterparty_name
    }
}

impl Displayable for Bill {
    fn display_label(&self) -> String {
        format!(
            "{} - R$ {} ({})",
            self.counterparty_name,
            self.amount.round_dp(2),
            self.due_date.format("%d/%m/%Y")
        )
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillStatus::Paid => "paid",
            BillStatus::Unpaid => "unpaid",
        };
        f.write_str(label)
    }
}

impl fmt::Display for BillDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillDirection::Payable => "payable",
            BillDirection::Receivable => "receivable",
        };
        f.write_str(label)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DisplayStatus::Paid => "Paid",
            DisplayStatus::Overdue => "Overdue",
            DisplayStatus::DueSoon => "Due soon",
            DisplayStatus::Current => "Current",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn paid_wins_regardless_of_due_date() {
        let today = day(2025, 6, 10);
        let yesterday = day(2025, 6, 9);
        assert_eq!(
            derive_status(yesterday, BillStatus::Paid, today),
            DisplayStatus::Paid
        );
    }

    #[test]
    fn overdue_boundary_is_strictly_before_today() {
        let today = day(2025, 6, 10);
        assert_eq!(
            derive_status(day(2025, 6, 9), BillStatus::Unpaid, today),
            DisplayStatus::Overdue
        );
        assert_ne!(
            derive_status(today, BillStatus::Unpaid, today),
            DisplayStatus::Overdue
        );
    }

    #[test]
    fn due_soon_badge_covers_exactly_three_days() {
        let today = day(2025, 6, 10);
        assert_eq!(
            derive_status(day(2025, 6, 13), BillStatus::Unpaid, today),
            DisplayStatus::DueSoon
        );
        assert_eq!(
            derive_status(day(2025, 6, 14), BillStatus::Unpaid, today),
            DisplayStatus::Current
        );
    }

    #[test]
    fn new_bill_carries_draft_fields() {
        let draft = BillDraft::new(
            "Acme Corp",
            dec!(120.50),
            day(2025, 7, 1),
            "rent",
            BillDirection::Payable,
        )
        .with_notes("July invoice");
        let bill = Bill::new(draft);
        assert_eq!(bill.counterparty_name, "Acme Corp");
        assert_eq!(bill.amount, dec!(120.50));
        assert_eq!(bill.status, BillStatus::Unpaid);
        assert_eq!(bill.notes.as_deref(), Some("July invoice"));
        assert_eq!(bill.created_at, bill.updated_at);
    }
}
