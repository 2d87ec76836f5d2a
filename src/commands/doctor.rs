// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// `(issue, detail)` pairs describing inconsistencies in the ledger.
pub fn find_issues(ledger: &Ledger) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    // 1) Transactions filed under a category that was since removed
    for tx in ledger.transactions() {
        if !ledger.is_known_category(&tx.category) {
            rows.push(("unknown_category".into(), format!("#{} {}", tx.id, tx.category)));
        }
    }

    // 2) Budgets for categories no longer in the list
    for cat in ledger.budget_limits().keys() {
        if !ledger.is_known_category(cat) {
            rows.push(("budget_unknown_category".into(), cat.clone()));
        }
    }

    // 3) Non-positive amounts, usually from a lenient import
    for tx in ledger.transactions() {
        if tx.amount <= Decimal::ZERO {
            rows.push(("non_positive_amount".into(), format!("#{} {:.2}", tx.id, tx.amount)));
        }
    }

    // 4) Hand-edited files can repeat ids
    let mut seen = HashSet::new();
    for tx in ledger.transactions() {
        if !seen.insert(tx.id) {
            rows.push(("duplicate_id".into(), format!("#{}", tx.id)));
        }
    }
    rows
}

pub fn handle(ledger: &Ledger) -> Result<()> {
    let rows: Vec<Vec<String>> = find_issues(ledger)
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
