//! In-memory state container owned by the composition root.
//!
//! Holds the client-side view of the persisted collections. Services mutate
//! it only after the corresponding store operation has succeeded.

use uuid::Uuid;

use crate::domain::{Bill, Category, Depositor};
use crate::storage::{DataStore, StoreResult};

#[derive(Debug, Default)]
pub struct Workspace {
    pub bills: Vec<Bill>,
    pub categories: Vec<Category>,
    pub depositors: Vec<Depositor>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates the workspace from a storage backend.
    pub fn load_from(store: &dyn DataStore) -> StoreResult<Self> {
        Ok(Self {
            bills: store.load_bills()?,
            categories: store.load_categories()?,
            depositors: store.load_depositors()?,
        })
    }

    pub fn bill(&self, id: Uuid) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    pub fn bill_index(&self, id: Uuid) -> Option<usize> {
        self.bills.iter().position(|bill| bill.id == id)
    }

    pub fn add_bill(&mut self, bill: Bill) -> Uuid {
        let id = bill.id;
        self.bills.push(bill);
        id
    }

    pub fn remove_bill(&mut self, id: Uuid) -> Option<Bill> {
        let index = self.bill_index(id)?;
        Some(self.bills.remove(index))
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        id
    }

    pub fn depositor(&self, id: Uuid) -> Option<&Depositor> {
        self.depositors.iter().find(|depositor| depositor.id == id)
    }

    pub fn depositor_index(&self, id: Uuid) -> Option<usize> {
        self.depositors.iter().position(|depositor| depositor.id == id)
    }

    pub fn add_depositor(&mut self, depositor: Depositor) -> Uuid {
        let id = depositor.id;
        self.depositors.push(depositor);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillDirection, BillDraft};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn remove_bill_returns_the_removed_record() {
        let mut ws = Workspace::new();
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let id = ws.add_bill(Bill::new(BillDraft::new(
            "Acme",
            dec!(10),
            due,
            "rent",
            BillDirection::Payable,
        )));
        let removed = ws.remove_bill(id).expect("bill exists");
        assert_eq!(removed.id, id);
        assert!(ws.bill(id).is_none());
    }
}
