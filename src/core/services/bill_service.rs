//! Lifecycle operations for bills.
//!
//! Every operation persists through the store first and mutates the
//! workspace only after the store call succeeds, so a failed call leaves
//! local state untouched.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::installment::{expand_installments, InstallmentPlan};
use crate::core::services::{ServiceError, ServiceResult};
use crate::core::workspace::Workspace;
use crate::domain::{Bill, BillDraft, BillStatus};
use crate::storage::DataStore;

pub struct BillService;

impl BillService {
    /// Persists a new bill and appends it to the workspace.
    pub fn create(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        draft: BillDraft,
    ) -> ServiceResult<Uuid> {
        validate_name(&draft.counterparty_name)?;
        validate_amount(draft.amount)?;
        let bill = Bill::new(draft);
        store.insert_bill(&bill)?;
        tracing::info!(bill = %bill.id, "bill created");
        Ok(workspace.add_bill(bill))
    }

    /// Expands `base` into installment siblings and persists them as one
    /// all-or-nothing batch. Returns the new ids in installment order.
    pub fn create_installments(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        base: BillDraft,
        plan: InstallmentPlan,
    ) -> ServiceResult<Vec<Uuid>> {
        validate_name(&base.counterparty_name)?;
        let drafts = expand_installments(&base, &plan)?;
        let bills: Vec<Bill> = drafts.into_iter().map(Bill::new).collect();
        store.insert_bills(&bills)?;
        tracing::info!(count = bills.len(), "installment batch created");
        let ids = bills.iter().map(|bill| bill.id).collect();
        workspace.bills.extend(bills);
        Ok(ids)
    }

    /// Updates the bill identified by `id` via the provided mutator. The
    /// mutated copy is validated and persisted before the workspace record
    /// is replaced; its `updated_at` is refreshed on success.
    pub fn update<F>(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut Bill),
    {
        let index = workspace
            .bill_index(id)
            .ok_or_else(|| ServiceError::Invalid("Bill not found".into()))?;
        let mut updated = workspace.bills[index].clone();
        mutator(&mut updated);
        // The mutator cannot retarget the record.
        updated.id = id;
        validate_name(&updated.counterparty_name)?;
        validate_amount(updated.amount)?;
        updated.touch();
        store.update_bill(&updated)?;
        workspace.bills[index] = updated;
        Ok(())
    }

    /// Marks the bill as paid. Marking an already-paid bill is a no-op that
    /// still succeeds.
    pub fn mark_paid(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
    ) -> ServiceResult<()> {
        Self::update(store, workspace, id, |bill| bill.status = BillStatus::Paid)
    }

    /// Removes the bill, returning the removed record.
    pub fn delete(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
    ) -> ServiceResult<Bill> {
        if workspace.bill(id).is_none() {
            return Err(ServiceError::Invalid("Bill not found".into()));
        }
        store.delete_bill(id)?;
        tracing::info!(bill = %id, "bill deleted");
        workspace
            .remove_bill(id)
            .ok_or_else(|| ServiceError::Invalid("Bill not found".into()))
    }
}

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::Invalid(
            "Counterparty name must not be empty".into(),
        ));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> ServiceResult<()> {
    if amount <= Decimal::ZERO {
        return Err(ServiceError::Invalid("Amount must be positive".into()));
    }
    Ok(())
}
