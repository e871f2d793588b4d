#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{BudgetPatch, TransactionKind};
use crate::storage::{MemoryStorage, StorageCall};

fn empty_budgets(storage: &MemoryStorage) -> BudgetStore {
    BudgetStore::load(storage).0
}

// ── Loading ───────────────────────────────────────────────────

#[test]
fn test_load_missing_key() {
    let storage = MemoryStorage::default();
    let (store, outcome) = TransactionStore::load(&storage);
    assert!(store.items().is_empty());
    assert_eq!(outcome, LoadOutcome::RecoveredDefault(Recovery::Missing));
    assert!(!outcome.lost_data());
    assert_eq!(
        storage.calls(),
        vec![StorageCall::Load("transactions".into())]
    );
}

#[test]
fn test_load_malformed_json() {
    let storage = MemoryStorage::with_value("budgets", "{not json");
    let (store, outcome) = BudgetStore::load(&storage);
    assert!(store.items().is_empty());
    assert!(matches!(
        outcome,
        LoadOutcome::RecoveredDefault(Recovery::Malformed(_))
    ));
    assert!(outcome.lost_data());
}

#[test]
fn test_load_wrong_shape_is_malformed() {
    let storage = MemoryStorage::with_value("transactions", r#"{"rows":[]}"#);
    let (store, outcome) = TransactionStore::load(&storage);
    assert!(store.items().is_empty());
    assert!(outcome.lost_data());
}

#[test]
fn test_load_empty_string_is_missing() {
    let storage = MemoryStorage::with_value("transactions", "");
    let (_, outcome) = TransactionStore::load(&storage);
    assert_eq!(outcome, LoadOutcome::RecoveredDefault(Recovery::Missing));
}

#[test]
fn test_load_existing_data() {
    let raw = r##"{"items":[
        {"id":"1700000000000","name":"Car","target":5000,"color":"#22c55e",
         "savings":[{"month":"2024-01","amount":200}]},
        {"id":"1700000000001","name":"Trip","target":800.5,"savings":[]}
    ]}"##;
    let storage = MemoryStorage::with_value("budgets", raw);
    let (store, outcome) = BudgetStore::load(&storage);
    assert_eq!(outcome, LoadOutcome::Ok);
    assert_eq!(store.items().len(), 2);
    assert_eq!(store.items()[0].name, "Car");
    assert_eq!(store.items()[0].savings[0].amount, dec!(200));
    assert_eq!(store.items()[1].target, dec!(800.5));
    assert!(store.items()[1].color.is_none());
}

#[test]
fn test_loaded_ids_are_not_reused() {
    let raw = r#"{"items":[{"id":"99999999999999","type":"income","amount":1,"description":"x"}]}"#;
    let mut storage = MemoryStorage::with_value("transactions", raw);
    let (mut store, _) = TransactionStore::load(&storage);
    let (id, _) = store.add_transaction(
        &mut storage,
        TransactionKind::Expense,
        dec!(5),
        "y".into(),
    );
    assert_eq!(id, "100000000000000");
}

// ── TransactionStore ──────────────────────────────────────────

#[test]
fn test_add_transactions_unique_ids() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);

    for i in 0..50 {
        let kind = if i % 2 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let (_, status) =
            store.add_transaction(&mut storage, kind, dec!(10), format!("txn {i}"));
        assert_eq!(status, SaveStatus::Saved);
    }

    assert_eq!(store.items().len(), 50);
    let ids: HashSet<&str> = store.items().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_add_transaction_appends_in_order() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);
    store.add_transaction(&mut storage, TransactionKind::Income, dec!(3000), "Salary".into());
    store.add_transaction(&mut storage, TransactionKind::Expense, dec!(1200), "Rent".into());

    let names: Vec<&str> = store.items().iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["Salary", "Rent"]);
}

#[test]
fn test_add_transaction_writes_whole_state() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);
    storage.clear_calls();

    let (id, _) =
        store.add_transaction(&mut storage, TransactionKind::Income, dec!(10), "Gift".into());

    let expected = format!(
        r#"{{"items":[{{"id":"{id}","type":"income","amount":10,"description":"Gift"}}]}}"#
    );
    assert_eq!(
        storage.calls(),
        vec![StorageCall::Save("transactions".into(), expected)]
    );
}

#[test]
fn test_add_transaction_accepts_anything() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);
    let (_, status) =
        store.add_transaction(&mut storage, TransactionKind::Expense, dec!(0), String::new());
    assert_eq!(status, SaveStatus::Saved);
    assert_eq!(store.items().len(), 1);
}

#[test]
fn test_failed_write_keeps_memory_state() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);
    storage.fail_writes(true);

    let (_, status) =
        store.add_transaction(&mut storage, TransactionKind::Income, dec!(5), "Tip".into());

    assert_eq!(status, SaveStatus::Failed);
    assert_eq!(store.items().len(), 1);
    assert_eq!(storage.value("transactions"), None);

    // Reload sees only what was persisted
    let (reloaded, _) = TransactionStore::load(&storage);
    assert!(reloaded.items().is_empty());
}

#[test]
fn test_transaction_roundtrip() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);
    store.add_transaction(&mut storage, TransactionKind::Income, dec!(3000), "Salary".into());
    store.add_transaction(&mut storage, TransactionKind::Expense, dec!(42.99), "Books".into());

    let (reloaded, outcome) = TransactionStore::load(&storage);
    assert_eq!(outcome, LoadOutcome::Ok);
    assert_eq!(reloaded.items(), store.items());
}

#[test]
fn test_high_precision_amount_roundtrip() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);
    store.add_transaction(
        &mut storage,
        TransactionKind::Income,
        dec!(1234567890.123456789),
        "Bonus".into(),
    );

    let (reloaded, outcome) = TransactionStore::load(&storage);
    assert_eq!(outcome, LoadOutcome::Ok);
    assert_eq!(reloaded.items(), store.items());
}

#[test]
fn test_max_decimal_amount_does_not_lose_earlier_records() {
    let mut storage = MemoryStorage::default();
    let (mut store, _) = TransactionStore::load(&storage);
    store.add_transaction(&mut storage, TransactionKind::Expense, dec!(5.00), "keep".into());
    store.add_transaction(&mut storage, TransactionKind::Income, Decimal::MAX, "max".into());

    let (reloaded, outcome) = TransactionStore::load(&storage);
    assert_eq!(outcome, LoadOutcome::Ok);
    assert_eq!(reloaded.items().len(), 2);
    assert_eq!(reloaded.items()[0].description, "keep");
    assert_eq!(reloaded.items()[1].amount, Decimal::MAX);
}

// ── BudgetStore ───────────────────────────────────────────────

#[test]
fn test_car_budget_progress() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    store.add_saving(&mut storage, &id, "2024-01".into(), dec!(200));
    store.add_saving(&mut storage, &id, "2024-02".into(), dec!(300));

    let progress = store.items()[0].progress();
    assert_eq!(progress.total_saved, dec!(500));
    assert_eq!(progress.percent, dec!(10.0));
    assert_eq!(progress.amount_left, dec!(4500));
}

#[test]
fn test_add_budget_starts_empty() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, status) =
        store.add_budget(&mut storage, "Laptop".into(), dec!(1500), Some("#22c55e".into()));

    assert_eq!(status, SaveStatus::Saved);
    let budget = &store.items()[0];
    assert_eq!(budget.id, id);
    assert_eq!(budget.color.as_deref(), Some("#22c55e"));
    assert!(budget.left_color.is_none());
    assert!(budget.savings.is_empty());
}

#[test]
fn test_add_saving_unknown_budget_is_noop() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    storage.clear_calls();

    let status = store.add_saving(&mut storage, "missing", "2024-01".into(), dec!(10));

    assert_eq!(status, SaveStatus::Skipped);
    assert!(store.items()[0].savings.is_empty());
    assert!(storage.calls().is_empty());
}

#[test]
fn test_duplicate_months_accumulate() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    store.add_saving(&mut storage, &id, "2024-01".into(), dec!(100));
    store.add_saving(&mut storage, &id, "2024-01".into(), dec!(150));

    assert_eq!(store.items()[0].savings.len(), 2);
    assert_eq!(store.items()[0].total_saved(), dec!(250));
}

#[test]
fn test_edit_budget_target_only() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), Some("#111111".into()));
    store.edit_budget(
        &mut storage,
        &id,
        BudgetPatch {
            left_color: Some("#222222".into()),
            ..Default::default()
        },
    );

    let status = store.edit_budget(
        &mut storage,
        &id,
        BudgetPatch {
            target: Some(dec!(1000)),
            ..Default::default()
        },
    );

    assert_eq!(status, SaveStatus::Saved);
    let budget = &store.items()[0];
    assert_eq!(budget.target, dec!(1000));
    assert_eq!(budget.name, "Car");
    assert_eq!(budget.color.as_deref(), Some("#111111"));
    assert_eq!(budget.left_color.as_deref(), Some("#222222"));
}

#[test]
fn test_edit_budget_colors_together() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    store.edit_budget(
        &mut storage,
        &id,
        BudgetPatch {
            color: Some("#0000ff".into()),
            left_color: Some("#ff0000".into()),
            ..Default::default()
        },
    );

    let budget = &store.items()[0];
    assert_eq!(budget.color.as_deref(), Some("#0000ff"));
    assert_eq!(budget.left_color.as_deref(), Some("#ff0000"));
}

#[test]
fn test_edit_unknown_budget_is_noop() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    storage.clear_calls();

    let status = store.edit_budget(
        &mut storage,
        "missing",
        BudgetPatch {
            name: Some("Boat".into()),
            ..Default::default()
        },
    );

    assert_eq!(status, SaveStatus::Skipped);
    assert_eq!(store.items()[0].name, "Car");
    assert_eq!(storage.save_count(), 0);
}

#[test]
fn test_remove_saving_removes_all_matches() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    store.add_saving(&mut storage, &id, "2024-01".into(), dec!(100));
    store.add_saving(&mut storage, &id, "2024-02".into(), dec!(50));
    store.add_saving(&mut storage, &id, "2024-01".into(), dec!(150));

    let status = store.remove_saving(&mut storage, &id, "2024-01");

    assert_eq!(status, SaveStatus::Saved);
    let savings = &store.items()[0].savings;
    assert_eq!(savings.len(), 1);
    assert_eq!(savings[0].month, "2024-02");
}

#[test]
fn test_remove_saving_unknown_budget_is_noop() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    storage.clear_calls();
    let status = store.remove_saving(&mut storage, "missing", "2024-01");
    assert_eq!(status, SaveStatus::Skipped);
    assert!(storage.calls().is_empty());
}

#[test]
fn test_remove_budget() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (car, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    store.add_budget(&mut storage, "Trip".into(), dec!(800), None);
    store.add_saving(&mut storage, &car, "2024-01".into(), dec!(100));

    store.remove_budget(&mut storage, &car);

    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].name, "Trip");
}

#[test]
fn test_remove_unknown_budget_leaves_list_and_still_saves() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    let before = store.items().to_vec();
    storage.clear_calls();

    let status = store.remove_budget(&mut storage, "missing");

    assert_eq!(status, SaveStatus::Saved);
    assert_eq!(store.items(), before.as_slice());
    assert_eq!(storage.save_count(), 1);
}

#[test]
fn test_zero_target_percent() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, _) = store.add_budget(&mut storage, "Free".into(), dec!(0), None);
    store.add_saving(&mut storage, &id, "2024-01".into(), dec!(75));
    assert_eq!(store.items()[0].progress().percent, dec!(0));
}

#[test]
fn test_budget_roundtrip() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (car, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), Some("#22c55e".into()));
    let (trip, _) = store.add_budget(&mut storage, "Trip".into(), dec!(800), None);
    store.add_saving(&mut storage, &car, "2024-01".into(), dec!(200.25));
    store.add_saving(&mut storage, &trip, "2024-03".into(), dec!(80));
    store.edit_budget(
        &mut storage,
        &trip,
        BudgetPatch {
            left_color: Some("#ef4444".into()),
            ..Default::default()
        },
    );

    let (reloaded, outcome) = BudgetStore::load(&storage);
    assert_eq!(outcome, LoadOutcome::Ok);
    assert_eq!(reloaded.items(), store.items());
}

#[test]
fn test_call_sequence() {
    let mut storage = MemoryStorage::default();
    let mut store = empty_budgets(&storage);
    let (id, _) = store.add_budget(&mut storage, "Car".into(), dec!(5000), None);
    store.add_saving(&mut storage, "missing", "2024-01".into(), dec!(1));
    store.add_saving(&mut storage, &id, "2024-01".into(), dec!(1));
    store.remove_budget(&mut storage, &id);

    let keys: Vec<String> = storage
        .calls()
        .into_iter()
        .map(|c| match c {
            StorageCall::Load(k) => format!("load:{k}"),
            StorageCall::Save(k, _) => format!("save:{k}"),
        })
        .collect();
    assert_eq!(
        keys,
        vec!["load:budgets", "save:budgets", "save:budgets", "save:budgets"]
    );
    assert_eq!(storage.value("budgets").as_deref(), Some(r#"{"items":[]}"#));
}
