//! Splits a total amount into evenly spaced installment drafts.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::BillDraft;

/// Upper bound accepted for an installment count.
pub const MAX_INSTALLMENTS: u32 = 48;

/// Fixed spacing between consecutive installments. Not calendar-month-aware.
pub const INSTALLMENT_STRIDE_DAYS: i64 = 30;

/// Parameters of an installment split.
#[derive(Debug, Clone, Copy)]
pub struct InstallmentPlan {
    pub count: u32,
    pub total: Decimal,
    pub first_due_date: NaiveDate,
}

impl InstallmentPlan {
    pub fn new(count: u32, total: Decimal, first_due_date: NaiveDate) -> Self {
        Self {
            count,
            total,
            first_due_date,
        }
    }
}

/// Expands `base` into `plan.count` sibling drafts, ascending by installment
/// index, 30 days apart, names suffixed `" - Parcela {i}/{n}"`.
///
/// Each installment carries `total / count` rounded to cents; the last one
/// absorbs the rounding remainder so the siblings sum to `total` exactly.
/// Splits that would produce a non-positive installment are rejected.
pub fn expand_installments(base: &BillDraft, plan: &InstallmentPlan) -> ServiceResult<Vec<BillDraft>> {
    if plan.count == 0 || plan.count > MAX_INSTALLMENTS {
        return Err(ServiceError::Invalid(format!(
            "installment count must be between 1 and {}",
            MAX_INSTALLMENTS
        )));
    }
    if plan.total <= Decimal::ZERO {
        return Err(ServiceError::Invalid(
            "installment total must be positive".into(),
        ));
    }

    let count = Decimal::from(plan.count);
    let per_installment = (plan.total / count).round_dp(2);
    let last = plan.total - per_installment * Decimal::from(plan.count - 1);
    if per_installment <= Decimal::ZERO || last <= Decimal::ZERO {
        return Err(ServiceError::Invalid(
            "total is too small to split into that many installments".into(),
        ));
    }

    let mut drafts = Vec::with_capacity(plan.count as usize);
    for index in 0..plan.count {
        let ordinal = index + 1;
        let mut draft = base.clone();
        draft.amount = if ordinal == plan.count {
            last
        } else {
            per_installment
        };
        draft.due_date =
            plan.first_due_date + Duration::days(index as i64 * INSTALLMENT_STRIDE_DAYS);
        draft.counterparty_name = format!(
            "{} - Parcela {}/{}",
            base.counterparty_name, ordinal, plan.count
        );
        draft.notes = Some(match base.notes.as_deref() {
            Some(notes) if !notes.is_empty() => {
                format!("{} - Parcela {} de {}", notes, ordinal, plan.count)
            }
            _ => format!("Parcela {} de {}", ordinal, plan.count),
        });
        drafts.push(draft);
    }
    Ok(drafts)
}
