// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::ledger::{DEFAULT_CATEGORIES, Ledger};
use crate::storage::Storage;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, storage: &Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?.trim();
            ledger.add_category(name)?;
            storage.save(ledger)?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let data = ledger
                .categories()
                .iter()
                .map(|c| {
                    let kind = if DEFAULT_CATEGORIES.contains(&c.as_str()) {
                        "default"
                    } else {
                        "custom"
                    };
                    vec![c.clone(), kind.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Kind"], data));
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?.trim();
            ledger.remove_category(name)?;
            storage.save(ledger)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
