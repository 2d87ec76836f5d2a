// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::export::{export_csv, export_json};
use crate::ledger::Ledger;
use anyhow::{Result, bail};
use std::path::Path;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.trim().to_lowercase();
    let out = required(sub, "out")?.trim();

    let n = match fmt.as_str() {
        "csv" => export_csv(ledger, Path::new(out))?,
        "json" => export_json(ledger, Path::new(out))?,
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    };
    println!("Exported {} transactions to {}", n, out);
    Ok(())
}
