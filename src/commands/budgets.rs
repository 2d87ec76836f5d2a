// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{optional, required, today};
use crate::ledger::Ledger;
use crate::models::BudgetStatus;
use crate::storage::Storage;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(ledger: &mut Ledger, storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ledger, storage, sub)?,
        Some(("status", sub)) => status(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(ledger: &mut Ledger, storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let cat = required(sub, "category")?.trim();
    let amount = parse_decimal(required(sub, "amount")?)?;
    ledger.set_budget(cat, amount)?;
    storage.save(ledger)?;
    println!("Budget for {} set to {}", cat, fmt_money(&amount));
    Ok(())
}

/// Budget rows for `category`, or for every budgeted category.
pub fn statuses(ledger: &Ledger, category: Option<&str>) -> Result<Vec<BudgetStatus>> {
    let today = today();
    match category {
        Some(cat) => ledger
            .budget_status(cat, today)
            .map(|s| vec![s])
            .ok_or_else(|| anyhow!("No budget set for '{}'", cat)),
        None => Ok(ledger.budget_overview(today)),
    }
}

fn status(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let category = optional(sub, "category");
    let data = statuses(ledger, category.as_deref())?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }

    let rows = data
        .iter()
        .map(|s| {
            vec![
                s.category.clone(),
                fmt_money(&s.limit),
                fmt_money(&s.spent),
                fmt_money(&s.remaining),
                s.status.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Budget", "Spent", "Remaining", "Status"], rows)
    );

    let alerts: Vec<String> = data.iter().filter_map(BudgetStatus::alert_message).collect();
    if alerts.is_empty() {
        println!("All budgets are within limits");
    } else {
        for a in alerts {
            println!("{}", a);
        }
    }
    Ok(())
}
