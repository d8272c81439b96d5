mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use contas_core::core::installment::InstallmentPlan;
use contas_core::core::services::{BillService, CategoryService, ServiceError};
use contas_core::core::workspace::Workspace;
use contas_core::domain::{
    Bill, BillDirection, BillDraft, Category, Depositor, UserProfile,
};
use contas_core::errors::StoreError;
use contas_core::storage::{DataStore, MemoryStore, StoreResult};

use common::setup_test_env;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(name: &str) -> BillDraft {
    BillDraft::new(name, dec!(100), day(2025, 5, 20), "rent", BillDirection::Payable)
}

/// Rejects every mutation while still answering reads.
struct FailingStore;

impl DataStore for FailingStore {
    fn load_bills(&self) -> StoreResult<Vec<Bill>> {
        Ok(Vec::new())
    }
    fn insert_bill(&self, _: &Bill) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn insert_bills(&self, _: &[Bill]) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn update_bill(&self, _: &Bill) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn delete_bill(&self, _: Uuid) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn load_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(Vec::new())
    }
    fn insert_category(&self, _: &Category) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn update_category(&self, _: &Category) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn delete_category(&self, _: Uuid) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn load_depositors(&self) -> StoreResult<Vec<Depositor>> {
        Ok(Vec::new())
    }
    fn insert_depositor(&self, _: &Depositor) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn update_depositor(&self, _: &Depositor) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn delete_depositor(&self, _: Uuid) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn load_profiles(&self) -> StoreResult<Vec<UserProfile>> {
        Ok(Vec::new())
    }
    fn profile_by_user(&self, _: Uuid) -> StoreResult<Option<UserProfile>> {
        Ok(None)
    }
    fn insert_profile(&self, _: &UserProfile) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
    fn update_profile(&self, _: &UserProfile) -> StoreResult<()> {
        Err(StoreError::Rejected("injected failure".into()))
    }
}

/// Counts destructive category calls while delegating to a real backend.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryStore,
    category_deletes: AtomicUsize,
}

impl DataStore for RecordingStore {
    fn load_bills(&self) -> StoreResult<Vec<Bill>> {
        self.inner.load_bills()
    }
    fn insert_bill(&self, bill: &Bill) -> StoreResult<()> {
        self.inner.insert_bill(bill)
    }
    fn insert_bills(&self, bills: &[Bill]) -> StoreResult<()> {
        self.inner.insert_bills(bills)
    }
    fn update_bill(&self, bill: &Bill) -> StoreResult<()> {
        self.inner.update_bill(bill)
    }
    fn delete_bill(&self, id: Uuid) -> StoreResult<()> {
        self.inner.delete_bill(id)
    }
    fn load_categories(&self) -> StoreResult<Vec<Category>> {
        self.inner.load_categories()
    }
    fn insert_category(&self, category: &Category) -> StoreResult<()> {
        self.inner.insert_category(category)
    }
    fn update_category(&self, category: &Category) -> StoreResult<()> {
        self.inner.update_category(category)
    }
    fn delete_category(&self, id: Uuid) -> StoreResult<()> {
        self.category_deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_category(id)
    }
    fn load_depositors(&self) -> StoreResult<Vec<Depositor>> {
        self.inner.load_depositors()
    }
    fn insert_depositor(&self, depositor: &Depositor) -> StoreResult<()> {
        self.inner.insert_depositor(depositor)
    }
    fn update_depositor(&self, depositor: &Depositor) -> StoreResult<()> {
        self.inner.update_depositor(depositor)
    }
    fn delete_depositor(&self, id: Uuid) -> StoreResult<()> {
        self.inner.delete_depositor(id)
    }
    fn load_profiles(&self) -> StoreResult<Vec<UserProfile>> {
        self.inner.load_profiles()
    }
    fn profile_by_user(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>> {
        self.inner.profile_by_user(user_id)
    }
    fn insert_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.inner.insert_profile(profile)
    }
    fn update_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.inner.update_profile(profile)
    }
}

#[test]
fn failed_create_leaves_workspace_unchanged() {
    let store = FailingStore;
    let mut ws = Workspace::new();
    let err = BillService::create(&store, &mut ws, draft("Acme")).expect_err("store rejects");
    assert!(matches!(err, ServiceError::Store(StoreError::Rejected(_))));
    assert!(ws.bills.is_empty());
}

#[test]
fn failed_batch_leaves_workspace_unchanged() {
    let store = FailingStore;
    let mut ws = Workspace::new();
    let plan = InstallmentPlan::new(3, dec!(90.00), day(2025, 5, 20));
    BillService::create_installments(&store, &mut ws, draft("Loja"), plan)
        .expect_err("store rejects");
    assert!(ws.bills.is_empty());
}

#[test]
fn failed_update_keeps_the_previous_record() {
    let memory = MemoryStore::new();
    let mut ws = Workspace::new();
    let id = BillService::create(&memory, &mut ws, draft("Acme")).unwrap();

    let failing = FailingStore;
    BillService::update(&failing, &mut ws, id, |bill| bill.amount = dec!(999))
        .expect_err("store rejects");
    assert_eq!(ws.bill(id).unwrap().amount, dec!(100));
}

#[test]
fn guarded_category_delete_never_reaches_the_store() {
    let store = RecordingStore::default();
    let mut ws = Workspace::new();
    let category_id = CategoryService::add(&store, &mut ws, "rent").unwrap();
    BillService::create(&store, &mut ws, draft("Acme")).unwrap();

    CategoryService::remove(&store, &mut ws, category_id)
        .expect_err("referenced category must be rejected");
    assert_eq!(store.category_deletes.load(Ordering::SeqCst), 0);
}

#[test]
fn lifecycle_roundtrip_through_the_json_store() {
    let (store, mut ws, _config) = setup_test_env();

    let id = BillService::create(&store, &mut ws, draft("Imobiliária Sul")).unwrap();
    BillService::mark_paid(&store, &mut ws, id).unwrap();

    // A fresh workspace sees the persisted state.
    let reloaded = Workspace::load_from(&store).unwrap();
    assert_eq!(reloaded.bills.len(), 1);
    assert!(reloaded.bills[0].is_paid());
}

#[test]
fn installment_batch_roundtrips_with_exact_total() {
    let (store, mut ws, _config) = setup_test_env();
    let plan = InstallmentPlan::new(3, dec!(100.00), day(2025, 5, 20));
    BillService::create_installments(&store, &mut ws, draft("Loja de Móveis"), plan).unwrap();

    let reloaded = Workspace::load_from(&store).unwrap();
    assert_eq!(reloaded.bills.len(), 3);
    let total: rust_decimal::Decimal = reloaded.bills.iter().map(|bill| bill.amount).sum();
    assert_eq!(total, dec!(100.00));
    assert!(reloaded.bills[0].counterparty_name.ends_with("Parcela 1/3"));
}
