// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON documents backing the ledger and the task list.
//!
//! Writes are plain `fs::write` calls: a crash mid-write can leave a
//! truncated file behind.

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::{Task, Transaction};
use crate::todo::TaskList;
use chrono::{Local, SecondsFormat};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Serialize)]
struct LedgerDocumentOut<'a> {
    transactions: &'a [Transaction],
    categories: &'a [String],
    #[serde(with = "crate::money::map")]
    budget_limits: &'a BTreeMap<String, Decimal>,
    last_updated: String,
    next_id: i64,
}

#[derive(Deserialize)]
struct LedgerDocument {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default, with = "crate::money::map")]
    budget_limits: BTreeMap<String, Decimal>,
    #[serde(default)]
    next_id: Option<i64>,
}

#[derive(Serialize)]
struct TaskDocumentOut<'a> {
    tasks: &'a [Task],
    next_id: i64,
    last_updated: String,
}

#[derive(Deserialize)]
struct TaskDocument {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    next_id: Option<i64>,
}

/// The wallet file: transactions, categories and budget limits.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the ledger. A missing file is an empty ledger with the default
    /// categories.
    pub fn load(&self) -> Result<Ledger> {
        let Some(doc) = read_json::<LedgerDocument>(&self.path)? else {
            debug!(path = %self.path.display(), "no wallet file yet");
            return Ok(Ledger::new());
        };
        let ledger = Ledger::from_parts(
            doc.transactions,
            doc.categories,
            doc.budget_limits,
            doc.next_id,
        )
        .map_err(|e| Error::persistence("Invalid data in", &self.path, e))?;
        debug!(
            path = %self.path.display(),
            transactions = ledger.transactions().len(),
            "loaded wallet"
        );
        Ok(ledger)
    }

    /// Writes the whole ledger. On failure the ledger in memory is untouched
    /// and the caller may retry.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let doc = LedgerDocumentOut {
            transactions: ledger.transactions(),
            categories: ledger.categories(),
            budget_limits: ledger.budget_limits(),
            last_updated: timestamp(),
            next_id: ledger.next_id(),
        };
        write_json(&self.path, &doc)
    }
}

/// The to-do file.
#[derive(Debug, Clone)]
pub struct TaskStorage {
    path: PathBuf,
}

impl TaskStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<TaskList> {
        Ok(match read_json::<TaskDocument>(&self.path)? {
            Some(doc) => TaskList::from_parts(doc.tasks, doc.next_id)
                .map_err(|e| Error::persistence("Invalid data in", &self.path, e))?,
            None => TaskList::new(),
        })
    }

    pub fn save(&self, list: &TaskList) -> Result<()> {
        let doc = TaskDocumentOut {
            tasks: list.tasks(),
            next_id: list.next_id(),
            last_updated: timestamp(),
        };
        write_json(&self.path, &doc)
    }
}

pub(crate) fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|e| Error::persistence("Failed to read", path, e))?;
    let doc = serde_json::from_str(&raw)
        .map_err(|e| Error::persistence("Malformed JSON in", path, e))?;
    Ok(Some(doc))
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::persistence("Failed to create", dir, e))?;
    }
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| Error::persistence("Failed to encode", path, e))?;
    fs::write(path, body).map_err(|e| Error::persistence("Failed to write", path, e))?;
    debug!(path = %path.display(), "saved");
    Ok(())
}
