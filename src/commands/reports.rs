// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::today;
use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(ledger, sub)?,
        Some(("by-category", sub)) => by_category(ledger, sub)?,
        Some(("monthly", sub)) => monthly(ledger, sub)?,
        Some(("stats", sub)) => stats(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn totals(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let t = ledger.aggregate_totals();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Balance"],
                vec![vec![
                    fmt_money(&t.income),
                    fmt_money(&t.expense),
                    fmt_money(&t.balance),
                ]],
            )
        );
    }
    Ok(())
}

fn by_category(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let mut items: Vec<_> = ledger.expenses_by_category().into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let total: rust_decimal::Decimal = items.iter().map(|(_, v)| *v).sum();
    let data: Vec<Vec<String>> = items
        .iter()
        .map(|(cat, amt)| {
            let share = if total.is_zero() {
                rust_decimal::Decimal::ZERO
            } else {
                *amt * rust_decimal::Decimal::ONE_HUNDRED / total
            };
            vec![cat.clone(), fmt_money(amt), format!("{:.1}%", share)]
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No expense data available");
        } else {
            println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
        }
    }
    Ok(())
}

fn monthly(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<Vec<String>> = ledger
        .monthly_totals()
        .iter()
        .map(|(m, t)| vec![m.clone(), fmt_money(&t.income), fmt_money(&t.expense)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn stats(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let s = ledger.stats(today());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Total Balance".into(), fmt_money(&s.overall.balance)],
        vec!["Total Income".into(), fmt_money(&s.overall.income)],
        vec!["Total Expenses".into(), fmt_money(&s.overall.expense)],
        vec![format!("Income ({})", s.month), fmt_money(&s.month_totals.income)],
        vec![format!("Expenses ({})", s.month), fmt_money(&s.month_totals.expense)],
        vec![format!("Savings ({})", s.month), fmt_money(&s.month_totals.balance)],
        vec!["Transactions".into(), s.transactions.to_string()],
        vec!["Income Transactions".into(), s.income_transactions.to_string()],
        vec!["Expense Transactions".into(), s.expense_transactions.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}
