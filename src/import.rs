// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Merging externally supplied JSON documents into the stores.
//!
//! Imported records always receive fresh ids from the target store. Field
//! values are read leniently: anything missing or unparseable falls back to
//! a fixed default instead of failing the whole import. Only the document's
//! top-level shape is checked strictly, and that check runs before the store
//! is touched.

use crate::error::{Error, Result};
use crate::ledger::{FALLBACK_CATEGORY, Ledger};
use crate::models::{Priority, Task, Transaction, TxType};
use crate::money;
use crate::todo::TaskList;
use crate::utils::parse_date;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub transactions: usize,
    pub categories: usize,
    pub budgets: usize,
}

/// Reads the wallet document at `path` and merges it into `ledger`.
/// `today` stands in for missing or invalid dates.
pub fn import_merge(path: &Path, ledger: &mut Ledger, today: NaiveDate) -> Result<ImportSummary> {
    let doc = read_document(path)?;
    let summary = merge_document(ledger, &doc, today)?;
    debug!(path = %path.display(), ?summary, "imported wallet document");
    Ok(summary)
}

pub fn merge_document(ledger: &mut Ledger, doc: &Value, today: NaiveDate) -> Result<ImportSummary> {
    let obj = top_level(doc)?;
    let records = object_list(obj, "transactions")?;
    if !ledger.has_room_for(records.len()) {
        return Err(Error::ImportFormat(format!(
            "{} transactions do not fit in the remaining id range",
            records.len()
        )));
    }
    let mut summary = ImportSummary::default();

    if let Some(Value::Array(cats)) = obj.get("categories") {
        for c in cats.iter().filter_map(Value::as_str) {
            if ledger.merge_category(c) {
                summary.categories += 1;
            }
        }
    }

    for rec in records {
        let tx = transaction_from_json(rec, ledger, today);
        ledger.push(tx)?;
        summary.transactions += 1;
    }

    if let Some(Value::Object(budgets)) = obj.get("budget_limits") {
        for (category, raw) in budgets {
            match money::from_json(raw).filter(|d| *d > Decimal::ZERO) {
                Some(limit) => {
                    ledger.merge_budget(category, limit);
                    summary.budgets += 1;
                }
                None => warn!(category = %category, value = %raw, "skipping invalid budget limit"),
            }
        }
    }
    Ok(summary)
}

fn transaction_from_json(rec: &Map<String, Value>, ledger: &Ledger, today: NaiveDate) -> Transaction {
    let amount = match rec.get("amount") {
        None => Decimal::ZERO,
        Some(raw) => money::from_json(raw).unwrap_or_else(|| {
            warn!(value = %raw, "unparseable or out-of-range amount, importing as 0.00");
            Decimal::ZERO
        }),
    };
    let r#type = str_field(rec, "type")
        .and_then(|s| s.parse::<TxType>().ok())
        .unwrap_or(TxType::Expense);
    let category = str_field(rec, "category")
        .map(str::trim)
        .filter(|c| ledger.is_known_category(c))
        .unwrap_or(FALLBACK_CATEGORY)
        .to_string();
    let date = str_field(rec, "date")
        .and_then(|s| parse_date(s).ok())
        .unwrap_or(today);
    Transaction {
        id: 0,
        date,
        r#type,
        category,
        amount,
        description: str_field(rec, "description").unwrap_or_default().to_string(),
    }
}

/// Reads a task document at `path` and appends its tasks to `list`.
/// Entries without task text are skipped. Returns how many were added.
pub fn import_tasks(path: &Path, list: &mut TaskList) -> Result<usize> {
    let doc = read_document(path)?;
    let now = Local::now().naive_local();
    merge_tasks(list, &doc, now)
}

pub fn merge_tasks(list: &mut TaskList, doc: &Value, now: NaiveDateTime) -> Result<usize> {
    let records = object_list(top_level(doc)?, "tasks")?;
    if !list.has_room_for(records.len()) {
        return Err(Error::ImportFormat(format!(
            "{} tasks do not fit in the remaining id range",
            records.len()
        )));
    }
    let mut added = 0;
    for rec in records {
        let Some(text) = str_field(rec, "task").map(str::trim).filter(|s| !s.is_empty()) else {
            warn!("skipping task without text");
            continue;
        };
        let task = Task {
            id: 0,
            task: text.to_string(),
            category: str_field(rec, "category")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(FALLBACK_CATEGORY)
                .to_string(),
            priority: str_field(rec, "priority")
                .and_then(|s| s.parse::<Priority>().ok())
                .unwrap_or_default(),
            created: str_field(rec, "created")
                .and_then(|s| s.parse::<NaiveDateTime>().ok())
                .unwrap_or(now),
            done: rec.get("done").and_then(Value::as_bool).unwrap_or(false),
        };
        list.push(task)?;
        added += 1;
    }
    Ok(added)
}

fn read_document(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|e| Error::persistence("Failed to read", path, e))?;
    serde_json::from_str(&raw).map_err(|e| Error::persistence("Malformed JSON in", path, e))
}

fn top_level(doc: &Value) -> Result<&Map<String, Value>> {
    doc.as_object()
        .ok_or_else(|| Error::ImportFormat("expected a JSON object at the top level".into()))
}

fn object_list<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Vec<&'a Map<String, Value>>> {
    let items = obj
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::ImportFormat(format!("expected a list under '{}'", key)))?;
    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_object()
                .ok_or_else(|| Error::ImportFormat(format!("{}[{}] is not an object", key, i)))
        })
        .collect()
}

fn str_field<'a>(rec: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    rec.get(key).and_then(Value::as_str)
}
