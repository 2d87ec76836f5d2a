// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketbook::ledger::DEFAULT_CATEGORIES;
use pocketbook::money::MAX_AMOUNT;
use pocketbook::models::{NewTask, NewTransaction};
use pocketbook::{Error, Ledger, Storage, TaskList, TaskStorage};
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::tempdir;

fn add(l: &mut Ledger, date: &str, kind: &str, category: &str, amount: &str, desc: &str) {
    l.add(NewTransaction {
        date: date.into(),
        r#type: kind.into(),
        category: category.into(),
        amount: amount.into(),
        description: desc.into(),
    })
    .unwrap();
}

#[test]
fn missing_file_loads_default_ledger() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("wallet.json"));
    let l = storage.load().unwrap();
    assert!(l.transactions().is_empty());
    assert_eq!(l.categories(), DEFAULT_CATEGORIES);
    assert_eq!(l.next_id(), 1);
}

#[test]
fn empty_ledger_round_trips() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("wallet.json"));
    let mut l = Ledger::new();
    l.add_category("Pets").unwrap();
    storage.save(&l).unwrap();

    let back = storage.load().unwrap();
    assert!(back.transactions().is_empty());
    assert_eq!(back.categories(), l.categories());
}

#[test]
fn every_field_survives_a_round_trip() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("nested").join("wallet.json"));
    let mut l = Ledger::new();
    add(&mut l, "2025-03-01", "Income", "Salary", "2500.00", "March pay");
    add(&mut l, "2025-03-02", "Expense", "Groceries", "0.10", "gum, \"mint\"");
    add(&mut l, "2025-03-03", "Expense", "Utilities", "99.99", "");
    l.delete([3]);
    l.set_budget("Groceries", Decimal::from_str("300").unwrap())
        .unwrap();
    storage.save(&l).unwrap();

    let back = storage.load().unwrap();
    assert_eq!(back, l);
    assert_eq!(back.next_id(), 4);
}

#[test]
fn document_uses_plain_numbers_and_expected_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wallet.json");
    let storage = Storage::new(&path);
    let mut l = Ledger::new();
    add(&mut l, "2025-03-02", "Expense", "Groceries", "12.50", "bread");
    l.set_budget("Groceries", Decimal::from_str("300").unwrap())
        .unwrap();
    storage.save(&l).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let tx = &raw["transactions"][0];
    assert_eq!(tx["id"], 1);
    assert_eq!(tx["date"], "2025-03-02");
    assert_eq!(tx["type"], "Expense");
    assert_eq!(tx["category"], "Groceries");
    assert_eq!(tx["description"], "bread");
    // amounts are bare numbers with exactly two decimals
    assert!(tx["amount"].is_number());
    assert_eq!(tx["amount"].to_string(), "12.50");
    assert_eq!(raw["budget_limits"]["Groceries"].to_string(), "300.00");
    assert!(raw["last_updated"].is_string());
    assert!(raw["categories"].is_array());
}

#[test]
fn loads_documents_without_next_id() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wallet.json");
    std::fs::write(
        &path,
        r#"{
            "transactions": [
                {"id": 7, "date": "2025-01-02", "type": "Income", "category": "Salary", "amount": 10, "description": ""}
            ],
            "categories": ["Salary", "Pets"],
            "budget_limits": {"Pets": "25.5"},
            "last_updated": "2025-01-02T10:00:00"
        }"#,
    )
    .unwrap();
    let l = Storage::new(&path).load().unwrap();
    assert_eq!(l.next_id(), 8);
    assert_eq!(l.categories().len(), 7);
    assert_eq!(l.categories()[6], "Pets");
    assert_eq!(
        l.budget_limits()["Pets"],
        Decimal::from_str("25.50").unwrap()
    );
}

#[test]
fn malformed_json_is_a_persistence_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wallet.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = Storage::new(&path).load().unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
    assert!(err.to_string().starts_with("Malformed JSON in"));
}

#[test]
fn failed_save_leaves_memory_alone() {
    let dir = tempdir().unwrap();
    // the target path is a directory, so the write must fail
    let storage = Storage::new(dir.path());
    let mut l = Ledger::new();
    add(&mut l, "2025-03-02", "Expense", "Groceries", "12.50", "bread");
    let before = l.clone();
    let err = storage.save(&l).unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
    assert_eq!(l, before);
}

#[test]
fn task_list_round_trips() {
    let dir = tempdir().unwrap();
    let storage = TaskStorage::new(dir.path().join("tasks.json"));
    assert!(storage.load().unwrap().tasks().is_empty());

    let mut list = TaskList::new();
    list.add(NewTask {
        task: "Write report".into(),
        category: "Work".into(),
        priority: "high".into(),
    })
    .unwrap();
    let t = list
        .add(NewTask {
            task: "Buy milk".into(),
            category: "Shopping".into(),
            priority: String::new(),
        })
        .unwrap();
    list.toggle(t.id).unwrap();
    list.delete([t.id]);
    storage.save(&list).unwrap();

    let back = storage.load().unwrap();
    assert_eq!(back, list);
    assert_eq!(back.next_id(), 3);
}

#[test]
fn largest_amounts_survive_a_round_trip_exactly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wallet.json");
    let storage = Storage::new(&path);
    let mut l = Ledger::new();
    add(&mut l, "2025-03-01", "Income", "Salary", "999999999999.99", "");
    add(&mut l, "2025-03-02", "Income", "Salary", &MAX_AMOUNT.to_string(), "");
    add(&mut l, "2025-03-03", "Expense", "Other", "0.01", "");
    l.set_budget("Other", MAX_AMOUNT).unwrap();
    storage.save(&l).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("999999999999.99"));
    assert!(text.contains("1000000000000.00"));

    let back = storage.load().unwrap();
    assert_eq!(back, l);
    assert_eq!(
        back.transactions()[0].amount,
        Decimal::from_str("999999999999.99").unwrap()
    );
    assert_eq!(back.transactions()[1].amount, MAX_AMOUNT);
}

#[test]
fn amounts_beyond_the_maximum_never_reach_the_file() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("wallet.json"));
    let mut l = Ledger::new();
    for too_big in ["1000000000000.01", "12345678901234567.89", "79228162514264337593543950335"] {
        let err = l
            .add(NewTransaction {
                date: "2025-03-01".into(),
                r#type: "Income".into(),
                category: "Salary".into(),
                amount: too_big.into(),
                description: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{too_big}: {err}");
    }
    assert!(matches!(
        l.set_budget("Other", MAX_AMOUNT + Decimal::ONE),
        Err(Error::Validation(_))
    ));
    storage.save(&l).unwrap();
    assert_eq!(storage.load().unwrap(), l);
}

#[test]
fn hand_edited_out_of_range_amount_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wallet.json");
    std::fs::write(
        &path,
        r#"{"transactions": [
            {"id": 1, "date": "2025-01-02", "type": "Income", "category": "Salary",
             "amount": 79228162514264337593543950335, "description": ""}
        ]}"#,
    )
    .unwrap();
    let err = Storage::new(&path).load().unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
}

#[test]
fn ids_at_the_end_of_the_range_are_rejected_not_wrapped() {
    let dir = tempdir().unwrap();
    let wallet = dir.path().join("wallet.json");
    let tx = |id: i64| {
        format!(
            r#"{{"transactions": [{{"id": {id}, "date": "2025-01-02", "type": "Income",
                "category": "Salary", "amount": 1, "description": ""}}]}}"#
        )
    };

    std::fs::write(&wallet, tx(i64::MAX)).unwrap();
    let err = Storage::new(&wallet).load().unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
    assert!(err.to_string().starts_with("Invalid data in"));

    std::fs::write(&wallet, tx(i64::MAX - 1)).unwrap();
    let mut l = Storage::new(&wallet).load().unwrap();
    assert_eq!(l.next_id(), i64::MAX);
    let before = l.clone();
    let err = l
        .add(NewTransaction {
            date: "2025-01-03".into(),
            r#type: "Expense".into(),
            category: "Other".into(),
            amount: "1".into(),
            description: String::new(),
        })
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(l, before);

    let tasks = dir.path().join("tasks.json");
    std::fs::write(
        &tasks,
        format!(
            r#"{{"tasks": [{{"id": {}, "task": "t", "category": "Work", "priority": "Low",
                "created": "2025-01-01T08:00:00"}}]}}"#,
            i64::MAX
        ),
    )
    .unwrap();
    let err = TaskStorage::new(&tasks).load().unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
}
