// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{optional, required, today};
use crate::ledger::{Ledger, TransactionFilter};
use crate::models::{NewTransaction, Transaction, TxType};
use crate::storage::Storage;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, storage, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, storage, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let input = NewTransaction {
        date: optional(sub, "date").unwrap_or_else(|| today().to_string()),
        r#type: required(sub, "type")?.to_string(),
        category: optional(sub, "category").unwrap_or_default(),
        amount: required(sub, "amount")?.to_string(),
        description: optional(sub, "description").unwrap_or_default(),
    };
    let tx = ledger.add(input)?;
    storage.save(ledger)?;
    println!(
        "Recorded #{} {} {} on {} ({})",
        tx.id,
        tx.r#type,
        fmt_money(&tx.amount),
        tx.date,
        tx.category
    );
    println!("Balance: {}", fmt_money(&ledger.aggregate_totals().balance));
    Ok(())
}

fn rm(ledger: &mut Ledger, storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let ids: Vec<i64> = sub.get_many::<i64>("id").into_iter().flatten().copied().collect();
    let removed = ledger.delete(ids);
    storage.save(ledger)?;
    println!("Deleted {} transaction(s)", removed);
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = filter_from_args(sub)?;
    let data = rows(ledger, &filter);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let table_rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description"],
                table_rows,
            )
        );
        if filter.is_empty() {
            println!("Showing all {} transactions", data.len());
        } else {
            println!(
                "Showing {} of {} transactions",
                data.len(),
                ledger.transactions().len()
            );
        }
        let totals = ledger.aggregate_totals();
        println!(
            "Balance: {} | Income: {} | Expenses: {}",
            fmt_money(&totals.balance),
            fmt_money(&totals.income),
            fmt_money(&totals.expense)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            date: tx.date.to_string(),
            r#type: tx.r#type.to_string(),
            category: tx.category.clone(),
            amount: fmt_money(&tx.amount),
            description: tx.description.clone(),
        }
    }
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let r#type = match optional(sub, "type").as_deref() {
        None | Some("") | Some("All") => None,
        Some(t) => Some(t.parse::<TxType>()?),
    };
    let category = optional(sub, "category").filter(|c| c != "All");
    Ok(TransactionFilter {
        search: optional(sub, "search"),
        category,
        r#type,
        month: optional(sub, "month")
            .filter(|m| !m.is_empty())
            .map(|m| parse_month(&m))
            .transpose()?,
    })
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_args(sub)?;
    Ok(rows(ledger, &filter))
}

fn rows(ledger: &Ledger, filter: &TransactionFilter) -> Vec<TransactionRow> {
    ledger
        .filter(filter)
        .into_iter()
        .map(TransactionRow::from)
        .collect()
}
