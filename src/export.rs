// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::storage::{timestamp, write_json};
use crate::utils::fmt_money;
use serde::Serialize;
use std::io;
use std::path::Path;

pub const CSV_HEADER: [&str; 6] = ["ID", "Date", "Type", "Category", "Amount", "Description"];

/// Writes one row per transaction, in ledger order. Returns the row count.
pub fn export_csv(ledger: &Ledger, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path).map_err(|e| Error::persistence("Failed to create", path, e))?;
    write_csv(ledger, file).map_err(|e| Error::persistence("Failed to write", path, e))
}

pub fn write_csv<W: io::Write>(ledger: &Ledger, out: W) -> csv::Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for tx in ledger.transactions() {
        wtr.write_record([
            tx.id.to_string(),
            tx.date.to_string(),
            tx.r#type.to_string(),
            tx.category.clone(),
            fmt_money(&tx.amount),
            tx.description.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(ledger.transactions().len())
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    transactions: &'a [Transaction],
    categories: &'a [String],
    exported_at: String,
}

/// Writes transactions and categories as a JSON document that
/// [`crate::import::import_merge`] can read back.
pub fn export_json(ledger: &Ledger, path: &Path) -> Result<usize> {
    let doc = ExportDocument {
        transactions: ledger.transactions(),
        categories: ledger.categories(),
        exported_at: timestamp(),
    };
    write_json(path, &doc)?;
    Ok(doc.transactions.len())
}
