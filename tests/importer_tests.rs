// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::import::merge_document;
use pocketbook::models::{NewTransaction, TxType};
use pocketbook::{Error, Ledger, Storage, cli, commands::importer};
use rust_decimal::Decimal;
use serde_json::json;
use std::io::Write;
use std::str::FromStr;
use tempfile::{NamedTempFile, tempdir};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn seeded() -> Ledger {
    let mut l = Ledger::new();
    for amount in ["10", "20"] {
        l.add(NewTransaction {
            date: "2025-05-01".into(),
            r#type: "Expense".into(),
            category: "Groceries".into(),
            amount: amount.into(),
            description: String::new(),
        })
        .unwrap();
    }
    l
}

#[test]
fn imported_records_get_fresh_ids() {
    let mut l = seeded();
    l.delete([2]);
    let doc = json!({
        "transactions": [
            {"id": 1, "date": "2025-05-03", "type": "Income", "category": "Salary", "amount": 500, "description": "bonus"},
            {"id": 1, "date": "2025-05-04", "type": "Expense", "category": "Transport", "amount": "12.5"}
        ]
    });
    let summary = merge_document(&mut l, &doc, today()).unwrap();
    assert_eq!(summary.transactions, 2);
    let ids: Vec<i64> = l.transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
    assert_eq!(l.transactions()[1].description, "bonus");
    assert_eq!(l.transactions()[2].amount, Decimal::from_str("12.50").unwrap());
    assert_eq!(l.transactions()[2].description, "");
}

#[test]
fn unparseable_fields_fall_back_to_defaults() {
    let mut l = Ledger::new();
    let doc = json!({
        "transactions": [
            {"date": "2025-05-03", "type": "Income", "category": "Salary", "amount": "abc"},
            {"date": "not a date", "type": "Gift", "category": "Mystery", "amount": 3.333},
            {}
        ]
    });
    merge_document(&mut l, &doc, today()).unwrap();
    let txs = l.transactions();
    assert_eq!(txs.len(), 3);

    assert_eq!(format!("{:.2}", txs[0].amount), "0.00");
    assert_eq!(txs[0].r#type, TxType::Income);

    assert_eq!(txs[1].date, today());
    assert_eq!(txs[1].r#type, TxType::Expense);
    assert_eq!(txs[1].category, "Other");
    assert_eq!(txs[1].amount, Decimal::from_str("3.33").unwrap());

    assert_eq!(txs[2].amount, Decimal::ZERO);
    assert_eq!(txs[2].category, "Other");
}

#[test]
fn categories_and_budgets_are_merged() {
    let mut l = Ledger::new();
    l.set_budget("Groceries", Decimal::from_str("100").unwrap())
        .unwrap();
    l.set_budget("Transport", Decimal::from_str("40").unwrap())
        .unwrap();
    let doc = json!({
        "transactions": [
            {"date": "2025-05-03", "type": "Expense", "category": "Pets", "amount": 9}
        ],
        "categories": ["Salary", "Pets", "Pets", "", 42],
        "budget_limits": {"Groceries": 250.0, "Pets": "30", "Broken": "x", "Negative": -5}
    });
    let summary = merge_document(&mut l, &doc, today()).unwrap();
    assert_eq!(summary.categories, 1);
    assert_eq!(summary.budgets, 2);
    assert_eq!(l.categories().last().map(String::as_str), Some("Pets"));
    // the record's category became known through the same document
    assert_eq!(l.transactions()[0].category, "Pets");
    assert_eq!(l.budget_limits()["Groceries"], Decimal::from_str("250").unwrap());
    assert_eq!(l.budget_limits()["Transport"], Decimal::from_str("40").unwrap());
    assert_eq!(l.budget_limits()["Pets"], Decimal::from_str("30").unwrap());
    assert!(!l.budget_limits().contains_key("Broken"));
    assert!(!l.budget_limits().contains_key("Negative"));
}

#[test]
fn bad_shapes_are_rejected_before_any_change() {
    let before = seeded();
    for doc in [
        json!([1, 2, 3]),
        json!({"transactions": {"id": 1}}),
        json!({"categories": ["Pets"]}),
        json!({"transactions": [{"amount": 1}, "oops"], "categories": ["Pets"]}),
    ] {
        let mut l = before.clone();
        let err = merge_document(&mut l, &doc, today()).unwrap_err();
        assert!(matches!(err, Error::ImportFormat(_)), "{doc}: {err}");
        assert_eq!(l, before);
    }
}

#[test]
fn importer_command_merges_and_saves() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("wallet.json"));
    let mut ledger = seeded();

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"transactions": [{{"date": "2025-02-03", "type": "Expense", "category": "Groceries", "amount": "abc"}}]}}"#
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let padded = format!("  {}  ", path);
    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["pocketbook", "import", "transactions", "--path", &padded]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(&mut ledger, &storage, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }

    assert_eq!(ledger.transactions().len(), 3);
    assert_eq!(ledger.transactions()[2].id, 3);
    assert_eq!(ledger.transactions()[2].amount, Decimal::ZERO);
    assert_eq!(storage.load().unwrap(), ledger);
}

#[test]
fn importer_command_reports_malformed_json() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("wallet.json"));
    let mut ledger = seeded();

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ nope").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["pocketbook", "import", "transactions", "--path", &path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        let err = importer::handle(&mut ledger, &storage, import_m).unwrap_err();
        assert!(err.to_string().contains("Failed to import"));
    } else {
        panic!("no import subcommand");
    }
    assert_eq!(ledger.transactions().len(), 2);
    assert!(!storage.path().exists());
}

#[test]
fn out_of_range_amounts_import_as_zero() {
    let mut l = Ledger::new();
    let doc: serde_json::Value = serde_json::from_str(
        r#"{
            "transactions": [
                {"date": "2025-05-03", "type": "Income", "category": "Salary",
                 "amount": 79228162514264337593543950335},
                {"date": "2025-05-04", "type": "Income", "category": "Salary",
                 "amount": "12345678901234.5"},
                {"date": "2025-05-05", "type": "Income", "category": "Salary",
                 "amount": 999999999999.99}
            ],
            "budget_limits": {"Salary": 1e15, "Other": 1e3}
        }"#,
    )
    .unwrap();
    let summary = merge_document(&mut l, &doc, today()).unwrap();
    assert_eq!(summary.budgets, 1);
    let amounts: Vec<Decimal> = l.transactions().iter().map(|t| t.amount).collect();
    assert_eq!(
        amounts,
        vec![
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::from_str("999999999999.99").unwrap()
        ]
    );
    assert_eq!(l.budget_limits()["Other"], Decimal::from(1000));
    assert!(!l.budget_limits().contains_key("Salary"));
}
