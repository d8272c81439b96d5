//! Aggregations over the full bill collection.
//!
//! These operate on the unfiltered collection and are recomputed whenever it
//! changes; they are independent of the filter engine.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::core::filter::BillFilter;
use crate::domain::{Bill, BillStatus, AGGREGATE_DUE_SOON_DAYS};

/// Dashboard totals plus display-limited urgency lists.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_due: Decimal,
    pub total_paid: Decimal,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    /// First `display_limit` overdue bills, input order.
    pub overdue: Vec<Bill>,
    /// First `display_limit` due-soon bills, input order.
    pub due_soon: Vec<Bill>,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of amounts over unpaid bills.
    pub fn total_due(bills: &[Bill]) -> Decimal {
        bills
            .iter()
            .filter(|bill| bill.status == BillStatus::Unpaid)
            .map(|bill| bill.amount)
            .sum()
    }

    /// Sum of amounts over paid bills.
    pub fn total_paid(bills: &[Bill]) -> Decimal {
        bills
            .iter()
            .filter(|bill| bill.status == BillStatus::Paid)
            .map(|bill| bill.amount)
            .sum()
    }

    /// Unpaid bills whose due date is strictly before `today`.
    pub fn overdue_bills<'a>(bills: &'a [Bill], today: NaiveDate) -> Vec<&'a Bill> {
        bills
            .iter()
            .filter(|bill| bill.status == BillStatus::Unpaid && bill.due_date < today)
            .collect()
    }

    /// Unpaid bills due within the aggregate window, `today` inclusive on
    /// both ends.
    pub fn due_soon_bills<'a>(bills: &'a [Bill], today: NaiveDate) -> Vec<&'a Bill> {
        let horizon = today + Duration::days(AGGREGATE_DUE_SOON_DAYS);
        bills
            .iter()
            .filter(|bill| {
                bill.status == BillStatus::Unpaid
                    && bill.due_date >= today
                    && bill.due_date <= horizon
            })
            .collect()
    }

    pub fn dashboard(bills: &[Bill], today: NaiveDate, display_limit: usize) -> DashboardSummary {
        let overdue = Self::overdue_bills(bills, today);
        let due_soon = Self::due_soon_bills(bills, today);
        DashboardSummary {
            total_due: Self::total_due(bills),
            total_paid: Self::total_paid(bills),
            overdue_count: overdue.len(),
            due_soon_count: due_soon.len(),
            overdue: overdue.into_iter().take(display_limit).cloned().collect(),
            due_soon: due_soon.into_iter().take(display_limit).cloned().collect(),
        }
    }

    /// Receivables listing: applies the filter, then re-sorts the result by
    /// `created_at` descending. The re-sort is this caller-side step, not
    /// part of the filter contract.
    pub fn filtered_recent_first<'a>(bills: &'a [Bill], filter: &BillFilter) -> Vec<&'a Bill> {
        let mut matched = filter.apply(bills);
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillDirection, BillDraft};
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill(amount: Decimal, due: NaiveDate, status: BillStatus) -> Bill {
        let mut draft = BillDraft::new("Acme", amount, due, "rent", BillDirection::Payable);
        draft.status = status;
        Bill::new(draft)
    }

    #[test]
    fn totals_split_by_payment_state() {
        let bills = vec![
            bill(dec!(10), day(2025, 6, 1), BillStatus::Unpaid),
            bill(dec!(20.50), day(2025, 6, 2), BillStatus::Unpaid),
            bill(dec!(5), day(2025, 6, 3), BillStatus::Paid),
        ];
        assert_eq!(SummaryService::total_due(&bills), dec!(30.50));
        assert_eq!(SummaryService::total_paid(&bills), dec!(5));
    }

    #[test]
    fn aggregate_due_soon_window_is_seven_days_inclusive() {
        let today = day(2025, 6, 10);
        let bills = vec![
            bill(dec!(10), day(2025, 6, 17), BillStatus::Unpaid),
            bill(dec!(10), day(2025, 6, 18), BillStatus::Unpaid),
        ];
        let due_soon = SummaryService::due_soon_bills(&bills, today);
        assert_eq!(due_soon.len(), 1);
        assert_eq!(due_soon[0].due_date, day(2025, 6, 17));
    }

    #[test]
    fn overdue_excludes_today_and_paid_bills() {
        let today = day(2025, 6, 10);
        let bills = vec![
            bill(dec!(10), day(2025, 6, 9), BillStatus::Unpaid),
            bill(dec!(10), day(2025, 6, 10), BillStatus::Unpaid),
            bill(dec!(10), day(2025, 6, 1), BillStatus::Paid),
        ];
        let overdue = SummaryService::overdue_bills(&bills, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].due_date, day(2025, 6, 9));
    }

    #[test]
    fn dashboard_truncates_lists_but_keeps_full_counts() {
        let today = day(2025, 6, 10);
        let bills: Vec<Bill> = (1..=5)
            .map(|offset| bill(dec!(10), day(2025, 6, 10 - offset), BillStatus::Unpaid))
            .collect();
        let summary = SummaryService::dashboard(&bills, today, 3);
        assert_eq!(summary.overdue_count, 5);
        assert_eq!(summary.overdue.len(), 3);
    }

    #[test]
    fn filtered_recent_first_sorts_by_creation_descending() {
        let first = bill(dec!(10), day(2025, 6, 1), BillStatus::Unpaid);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = bill(dec!(10), day(2025, 6, 1), BillStatus::Unpaid);
        let bills = vec![first.clone(), second.clone()];
        let listed = SummaryService::filtered_recent_first(&bills, &BillFilter::new());
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }
}
