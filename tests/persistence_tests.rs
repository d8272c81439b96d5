mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use contas_core::core::services::{BillService, CategoryService, DepositorService};
use contas_core::core::workspace::Workspace;
use contas_core::domain::{BillDirection, BillDraft, Depositor};

use common::setup_test_env;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn all_collections_survive_reopen() {
    let (store, mut ws, _config) = setup_test_env();

    CategoryService::add(&store, &mut ws, "rent").unwrap();
    DepositorService::add(&store, &mut ws, Depositor::new("Imobiliária Sul")).unwrap();
    BillService::create(
        &store,
        &mut ws,
        BillDraft::new(
            "Imobiliária Sul",
            dec!(900.00),
            day(2025, 7, 5),
            "rent",
            BillDirection::Payable,
        ),
    )
    .unwrap();

    let reloaded = Workspace::load_from(&store).unwrap();
    assert_eq!(reloaded.categories.len(), 1);
    assert_eq!(reloaded.depositors.len(), 1);
    assert_eq!(reloaded.bills.len(), 1);
    assert_eq!(reloaded.bills[0].amount, dec!(900.00));
}

#[test]
fn deletions_are_persisted() {
    let (store, mut ws, _config) = setup_test_env();

    let id = BillService::create(
        &store,
        &mut ws,
        BillDraft::new(
            "Fornecedor",
            dec!(50.00),
            day(2025, 7, 5),
            "utilities",
            BillDirection::Payable,
        ),
    )
    .unwrap();
    BillService::delete(&store, &mut ws, id).unwrap();

    let reloaded = Workspace::load_from(&store).unwrap();
    assert!(reloaded.bills.is_empty());
}

#[test]
fn updates_overwrite_the_stored_record() {
    let (store, mut ws, _config) = setup_test_env();

    let id = BillService::create(
        &store,
        &mut ws,
        BillDraft::new(
            "Fornecedor",
            dec!(50.00),
            day(2025, 7, 5),
            "utilities",
            BillDirection::Payable,
        ),
    )
    .unwrap();
    BillService::update(&store, &mut ws, id, |bill| {
        bill.amount = dec!(75.00);
        bill.notes = Some("ajuste".into());
    })
    .unwrap();

    let reloaded = Workspace::load_from(&store).unwrap();
    assert_eq!(reloaded.bills[0].amount, dec!(75.00));
    assert_eq!(reloaded.bills[0].notes.as_deref(), Some("ajuste"));
    assert!(reloaded.bills[0].updated_at >= reloaded.bills[0].created_at);
}
