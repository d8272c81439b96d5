//! File-backed storage: one JSON document per data directory, written
//! atomically through a staged tmp file.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use uuid::Uuid;

use crate::core::utils::{app_data_dir, ensure_dir, write_atomic};
use crate::domain::{Bill, Category, Depositor, UserProfile};
use crate::errors::StoreError;

use super::{
    document_warnings, DataStore, StoreDocument, StoreResult, CURRENT_SCHEMA_VERSION,
};

const DOCUMENT_FILE: &str = "workspace.json";

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl JsonStore {
    /// Opens (or initializes) the document under `root`. Dangling references
    /// found in an existing document are logged, not rejected.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        let path = root.join(DOCUMENT_FILE);
        let document = if path.exists() {
            let data = fs::read_to_string(&path)?;
            let document: StoreDocument = serde_json::from_str(&data)?;
            if document.schema_version > CURRENT_SCHEMA_VERSION {
                return Err(StoreError::Rejected(format!(
                    "document `{}` is from a newer schema version",
                    path.display()
                )));
            }
            for warning in document_warnings(&document) {
                tracing::warn!("{warning}");
            }
            document
        } else {
            StoreDocument::default()
        };
        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Opens the store in the default application data directory.
    pub fn open_default() -> StoreResult<Self> {
        Self::open(app_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, StoreDocument> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `apply` to a copy of the document, persists the copy, and
    /// commits it in memory only once the write succeeded. Failures leave
    /// both the file and the cached document untouched.
    fn commit<F>(&self, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut StoreDocument) -> StoreResult<()>,
    {
        let mut guard = self.lock();
        let mut next = guard.clone();
        apply(&mut next)?;
        let json = serde_json::to_string_pretty(&next)?;
        write_atomic(&self.path, &json)?;
        *guard = next;
        Ok(())
    }
}

impl DataStore for JsonStore {
    fn load_bills(&self) -> StoreResult<Vec<Bill>> {
        Ok(self.lock().bills.clone())
    }

    fn insert_bill(&self, bill: &Bill) -> StoreResult<()> {
        self.commit(|document| document.insert_bill(bill))
    }

    fn insert_bills(&self, bills: &[Bill]) -> StoreResult<()> {
        self.commit(|document| document.insert_bills(bills))
    }

    fn update_bill(&self, bill: &Bill) -> StoreResult<()> {
        self.commit(|document| document.update_bill(bill))
    }

    fn delete_bill(&self, id: Uuid) -> StoreResult<()> {
        self.commit(|document| document.delete_bill(id))
    }

    fn load_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.lock().categories.clone())
    }

    fn insert_category(&self, category: &Category) -> StoreResult<()> {
        self.commit(|document| document.insert_category(category))
    }

    fn update_category(&self, category: &Category) -> StoreResult<()> {
        self.commit(|document| document.update_category(category))
    }

    fn delete_category(&self, id: Uuid) -> StoreResult<()> {
        self.commit(|document| document.delete_category(id))
    }

    fn load_depositors(&self) -> StoreResult<Vec<Depositor>> {
        Ok(self.lock().depositors.clone())
    }

    fn insert_depositor(&self, depositor: &Depositor) -> StoreResult<()> {
        self.commit(|document| document.insert_depositor(depositor))
    }

    fn update_depositor(&self, depositor: &Depositor) -> StoreResult<()> {
        self.commit(|document| document.update_depositor(depositor))
    }

    fn delete_depositor(&self, id: Uuid) -> StoreResult<()> {
        self.commit(|document| document.delete_depositor(id))
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
        self.commit(|document| document.insert_profile(profile))
    }

    fn update_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.commit(|document| document.update_profile(profile))
    }
}
