// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{required, today};
use crate::import::import_merge;
use crate::ledger::Ledger;
use crate::storage::Storage;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(ledger: &mut Ledger, storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(ledger, storage, sub),
        _ => Ok(()),
    }
}

fn import_transactions(ledger: &mut Ledger, storage: &Storage, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?.trim();
    let summary = import_merge(Path::new(path), ledger, today())
        .with_context(|| format!("Failed to import {}", path))?;
    storage.save(ledger)?;
    println!(
        "Imported {} transactions from {} ({} new categories, {} budgets)",
        summary.transactions, path, summary.categories, summary.budgets
    );
    Ok(())
}
