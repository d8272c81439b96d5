//! Persistence contracts shared by all storage backends.

pub mod json_backend;

pub use json_backend::JsonStore;

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Bill, Category, Depositor, UserProfile};
use crate::errors::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Abstraction over backends capable of storing the four collections.
/// `insert_bills` persists its whole batch or nothing.
pub trait DataStore: Send + Sync {
    fn load_bills(&self) -> StoreResult<Vec<Bill>>;
    fn insert_bill(&self, bill: &Bill) -> StoreResult<()>;
    fn insert_bills(&self, bills: &[Bill]) -> StoreResult<()>;
    fn update_bill(&self, bill: &Bill) -> StoreResult<()>;
    fn delete_bill(&self, id: Uuid) -> StoreResult<()>;

    fn load_categories(&self) -> StoreResult<Vec<Category>>;
    fn insert_category(&self, category: &Category) -> StoreResult<()>;
    fn update_category(&self, category: &Category) -> StoreResult<()>;
    fn delete_category(&self, id: Uuid) -> StoreResult<()>;

    fn load_depositors(&self) -> StoreResult<Vec<Depositor>>;
    fn insert_depositor(&self, depositor: &Depositor) -> StoreResult<()>;
    fn update_depositor(&self, depositor: &Depositor) -> StoreResult<()>;
    fn delete_depositor(&self, id: Uuid) -> StoreResult<()>;

    fn load_profiles(&self) -> StoreResult<Vec<UserProfile>>;
    fn profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>>;
    fn insert_profile(&self, profile: &UserProfile) -> StoreResult<()>;
    fn update_profile(&self, profile: &UserProfile) -> StoreResult<()>;
}

/// The persisted shape shared by the provided backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default = "StoreDocument::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub depositors: Vec<Depositor>,
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            bills: Vec::new(),
            categories: Vec::new(),
            depositors: Vec::new(),
            profiles: Vec::new(),
        }
    }
}

impl StoreDocument {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn insert_bill(&mut self, bill: &Bill) -> StoreResult<()> {
        if self.bills.iter().any(|existing| existing.id == bill.id) {
            return Err(StoreError::Conflict(format!("bill {}", bill.id)));
        }
        self.bills.push(bill.clone());
        Ok(())
    }

    pub fn insert_bills(&mut self, bills: &[Bill]) -> StoreResult<()> {
        let mut incoming = HashSet::new();
        for bill in bills {
            if !incoming.insert(bill.id) || self.bills.iter().any(|existing| existing.id == bill.id)
            {
                return Err(StoreError::Conflict(format!("bill {}", bill.id)));
            }
        }
        self.bills.extend(bills.iter().cloned());
        Ok(())
    }

    pub fn update_bill(&mut self, bill: &Bill) -> StoreResult<()> {
        let slot = self
            .bills
            .iter_mut()
            .find(|existing| existing.id == bill.id)
            .ok_or_else(|| StoreError::NotFound(format!("bill {}", bill.id)))?;
        *slot = bill.clone();
        Ok(())
    }

    pub fn delete_bill(&mut self, id: Uuid) -> StoreResult<()> {
        let before = self.bills.len();
        self.bills.retain(|bill| bill.id != id);
        if self.bills.len() == before {
            return Err(StoreError::NotFound(format!("bill {}", id)));
        }
        Ok(())
    }

    pub fn insert_category(&mut self, category: &Category) -> StoreResult<()> {
        if self.categories.iter().any(|existing| existing.id == category.id) {
            return Err(StoreError::Conflict(format!("category {}", category.id)));
        }
        self.categories.push(category.clone());
        Ok(())
    }

    pub fn update_category(&mut self, category: &Category) -> StoreResult<()> {
        let slot = self
            .categories
            .iter_mut()
            .find(|existing| existing.id == category.id)
            .ok_or_else(|| StoreError::NotFound(format!("category {}", category.id)))?;
        *slot = category.clone();
        Ok(())
    }

    pub fn delete_category(&mut self, id: Uuid) -> StoreResult<()> {
        let before = self.categories.len();
        self.categories.retain(|category| category.id != id);
        if self.categories.len() == before {
            return Err(StoreError::NotFound(format!("category {}", id)));
        }
        Ok(())
    }

    pub fn insert_depositor(&mut self, depositor: &Depositor) -> StoreResult<()> {
        if self
            .depositors
            .iter()
            .any(|existing| existing.id == depositor.id)
        {
            return Err(StoreError::Conflict(format!("depositor {}", depositor.id)));
        }
        self.depositors.push(depositor.clone());
        Ok(())
    }

    pub fn update_depositor(&mut self, depositor: &Depositor) -> StoreResult<()> {
        let slot = self
            .depositors
            .iter_mut()
            .find(|existing| existing.id == depositor.id)
            .ok_or_else(|| StoreError::NotFound(format!("depositor {}", depositor.id)))?;
        *slot = depositor.clone();
        Ok(())
    }

    pub fn delete_depositor(&mut self, id: Uuid) -> StoreResult<()> {
        let before = self.depositors.len();
        self.depositors.retain(|depositor| depositor.id != id);
        if self.depositors.len() == before {
            return Err(StoreError::NotFound(format!("depositor {}", id)));
        }
        Ok(())
    }

    pub fn insert_profile(&mut self, profile: &UserProfile) -> StoreResult<()> {
        if self.profiles.iter().any(|existing| existing.id == profile.id) {
            return Err(StoreError::Conflict(format!("profile {}", profile.id)));
        }
        self.profiles.push(profile.clone());
        Ok(())
    }

    pub fn update_profile(&mut self, profile: &UserProfile) -> StoreResult<()> {
        let slot = self
            .profiles
            .iter_mut()
            .find(|existing| existing.id == profile.id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", profile.id)))?;
        *slot = profile.clone();
        Ok(())
    }
}

/// Detects dangling references within a persisted document.
pub fn document_warnings(document: &StoreDocument) -> Vec<String> {
    let category_ids: HashSet<_> = document.categories.iter().map(|c| c.id).collect();
    let depositor_ids: HashSet<_> = document.depositors.iter().map(|d| d.id).collect();
    let mut warnings = Vec::new();

    for bill in &document.bills {
        if let Some(category) = bill.category_id {
            if !category_ids.contains(&category) {
                warnings.push(format!(
                    "bill {} references missing category {}",
                    bill.id, category
                ));
            }
        }
        if let Some(depositor) = bill.depositor_id {
            if !depositor_ids.contains(&depositor) {
                warnings.push(format!(
                    "bill {} references missing depositor {}",
                    bill.id, depositor
                ));
            }
        }
    }
    warnings
}

/// Volatile backend used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<StoreDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreDocument> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DataStore for MemoryStore {
    fn load_bills(&self) -> StoreResult<Vec<Bill>> {
        Ok(self.lock().bills.clone())
    }

    fn insert_bill(&self, bill: &Bill) -> StoreResult<()> {
        self.lock().insert_bill(bill)
    }

    fn insert_bills(&self, bills: &[Bill]) -> StoreResult<()> {
        self.lock().insert_bills(bills)
    }

    fn update_bill(&self, bill: &Bill) -> StoreResult<()> {
        self.lock().update_bill(bill)
    }

    fn delete_bill(&self, id: Uuid) -> StoreResult<()> {
        self.lock().delete_bill(id)
    }

    fn load_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.lock().categories.clone())
    }

    fn insert_category(&self, category: &Category) -> StoreResult<()> {
        self.lock().insert_category(category)
    }

    fn update_category(&self, category: &Category) -> StoreResult<()> {
        self.lock().update_category(category)
    }

    fn delete_category(&self, id: Uuid) -> StoreResult<()> {
        self.lock().delete_category(id)
    }

    fn load_depositors(&self) -> StoreResult<Vec<Depositor>> {
        Ok(self.lock().depositors.clone())
    }

    fn insert_depositor(&self, depositor: &Depositor) -> StoreResult<()> {
        self.lock().insert_depositor(depositor)
    }

    fn update_depositor(&self, depositor: &Depositor) -> StoreResult<()> {
        self.lock().update_depositor(depositor)
    }

    fn delete_depositor(&self, id: Uuid) -> StoreResult<()> {
        self.lock().delete_depositor(id)
    }

    fn load_profiles(&self) -> StoreResult<Vec<UserProfile>> {
        Ok(self.lock().profiles.clone())
    }

    fn profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|profile| profile.id == user_id)
            .cloned())
    }

    fn insert_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.lock().insert_profile(profile)
    }

    fn update_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.lock().update_profile(profile)
    }
}
