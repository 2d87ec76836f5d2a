// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod transactions;
pub mod budgets;
pub mod reports;
pub mod importer;
pub mod exporter;
pub mod tasks;
pub mod doctor;

use anyhow::{Context, Result};
use chrono::NaiveDate;

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("--{} is required", name))
}

pub(crate) fn optional(m: &clap::ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name).map(|s| s.trim().to_string())
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
