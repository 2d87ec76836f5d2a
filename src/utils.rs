// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::money;
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        Error::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s.trim()))
    })
}

/// Validates a `YYYY-MM` month and returns it zero-padded.
pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("Invalid month '{}', expected YYYY-MM", s)))?;
    Ok(month_key(first))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| Error::validation(format!("Invalid amount '{}'", s.trim())))
}

/// Parses a strictly positive amount and rounds it to cents.
pub fn parse_positive_amount(s: &str) -> Result<Decimal> {
    if s.trim().is_empty() {
        return Err(Error::validation("Amount is required"));
    }
    let d = parse_decimal(s).map_err(|_| {
        Error::validation(format!(
            "Invalid amount '{}', expected a positive number",
            s.trim()
        ))
    })?;
    let d = d.round_dp(2);
    if d <= Decimal::ZERO {
        return Err(Error::validation(format!(
            "Invalid amount '{}', expected a positive number",
            s.trim()
        )));
    }
    if !money::in_range(&d) {
        return Err(amount_too_large(&d));
    }
    Ok(d)
}

pub(crate) fn amount_too_large(d: &Decimal) -> Error {
    Error::validation(format!(
        "Amount {} exceeds the maximum of {}",
        fmt_money(d),
        fmt_money(&money::MAX_AMOUNT)
    ))
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
