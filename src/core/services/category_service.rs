//! Validated CRUD for categories.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::core::workspace::Workspace;
use crate::domain::Category;
use crate::storage::DataStore;

pub struct CategoryService;

impl CategoryService {
    pub fn add(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        name: impl Into<String>,
    ) -> ServiceResult<Uuid> {
        let name = name.into();
        Self::validate_name(workspace, None, &name)?;
        let category = Category::new(name.trim());
        store.insert_category(&category)?;
        Ok(workspace.add_category(category))
    }

    pub fn rename(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
        name: impl Into<String>,
    ) -> ServiceResult<()> {
        let name = name.into();
        Self::validate_name(workspace, Some(id), &name)?;
        let mut updated = workspace
            .category(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        updated.name = name.trim().to_string();
        updated.touch();
        store.update_category(&updated)?;
        if let Some(category) = workspace.category_mut(id) {
            *category = updated;
        }
        Ok(())
    }

    /// Removes the category. Rejected without touching the store while any
    /// bill still references it, by id or by label.
    pub fn remove(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
    ) -> ServiceResult<()> {
        let category = workspace
            .category(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        let in_use = workspace
            .bills
            .iter()
            .any(|bill| bill.category_id == Some(id) || bill.category == category.name);
        if in_use {
            return Err(ServiceError::Invalid(
                "Category is referenced by existing bills".into(),
            ));
        }
        store.delete_category(id)?;
        workspace.categories.retain(|candidate| candidate.id != id);
        Ok(())
    }

    pub fn list(workspace: &Workspace) -> Vec<&Category> {
        workspace.categories.iter().collect()
    }

    fn validate_name(
        workspace: &Workspace,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid("Category name must not be empty".into()));
        }
        let normalized = candidate.trim().to_lowercase();
        let duplicate = workspace.categories.iter().any(|category| {
            let name = category.name.trim().to_lowercase();
            name == normalized && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bill, BillDirection, BillDraft};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bill_in(category: &Category) -> Bill {
        let due = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let mut draft = BillDraft::new("Acme", dec!(10), due, &category.name, BillDirection::Payable);
        draft.category_id = Some(category.id);
        Bill::new(draft)
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let store = MemoryStore::new();
        let mut ws = Workspace::new();
        CategoryService::add(&store, &mut ws, "Rent").unwrap();
        let err = CategoryService::add(&store, &mut ws, "rent")
            .expect_err("duplicate must be rejected");
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("already exists")));
    }

    #[test]
    fn remove_is_rejected_while_bills_reference_the_category() {
        let store = MemoryStore::new();
        let mut ws = Workspace::new();
        let id = CategoryService::add(&store, &mut ws, "rent").unwrap();
        let category = ws.category(id).cloned().unwrap();
        ws.add_bill(bill_in(&category));

        let err = CategoryService::remove(&store, &mut ws, id)
            .expect_err("referenced category must not be deleted");
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("referenced")));
        // The store was never asked to delete.
        assert_eq!(store.load_categories().unwrap().len(), 1);
        assert_eq!(ws.categories.len(), 1);
    }

    #[test]
    fn remove_succeeds_once_unreferenced() {
        let store = MemoryStore::new();
        let mut ws = Workspace::new();
        let id = CategoryService::add(&store, &mut ws, "rent").unwrap();
        CategoryService::remove(&store, &mut ws, id).unwrap();
        assert!(ws.categories.is_empty());
        assert!(store.load_categories().unwrap().is_empty());
    }

    #[test]
    fn rename_refreshes_workspace_and_store() {
        let store = MemoryStore::new();
        let mut ws = Workspace::new();
        let id = CategoryService::add(&store, &mut ws, "rent").unwrap();
        CategoryService::rename(&store, &mut ws, id, "housing").unwrap();
        assert_eq!(ws.category(id).unwrap().name, "housing");
        assert_eq!(store.load_categories().unwrap()[0].name, "housing");
    }
}
