// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Serde helpers that store `Decimal` amounts as plain JSON numbers.
//!
//! Amounts live in memory as `Decimal` rounded to cents. On disk they are
//! exact numbers with two decimals (`"amount": 12.50`, via serde_json's
//! `arbitrary_precision`), and on the way back in both numbers and numeric
//! strings are accepted. Use with `#[serde(with = "crate::money")]`
//! on a single amount, or `crate::money::map` on a name → amount map.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::str::FromStr;

/// Largest absolute amount (one trillion) a single record or budget limit
/// may hold. Keeps every sum over a ledger far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3567587328, 232, 0, false, 0);

/// Whether `amount` lies within `±MAX_AMOUNT`.
pub fn in_range(amount: &Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// The amount as a JSON number carrying exactly two decimals.
pub fn to_number(amount: &Decimal) -> Option<Number> {
    Number::from_str(&format!("{:.2}", amount.round_dp(2))).ok()
}

pub fn serialize<S: Serializer>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error> {
    match to_number(amount) {
        Some(n) => n.serialize(s),
        None => Err(<S::Error as serde::ser::Error>::custom(format!(
            "amount {} out of range",
            amount
        ))),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let raw = Value::deserialize(d)?;
    from_json(&raw).ok_or_else(|| D::Error::custom(format!("invalid amount {}", raw)))
}

/// Best-effort amount parse for loosely shaped JSON: numbers and numeric
/// strings within `±MAX_AMOUNT` are accepted, anything else yields `None`.
pub fn from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_text(&n.to_string())
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => parse_text(s),
        _ => None,
    }
    .map(|d| d.round_dp(2))
    .filter(in_range)
}

fn parse_text(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

struct AsNumber<'a>(&'a Decimal);

impl Serialize for AsNumber<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize(self.0, s)
    }
}

pub mod map {
    use super::{AsNumber, from_json};
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        amounts: &BTreeMap<String, Decimal>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(amounts.len()))?;
        for (k, v) in amounts {
            map.serialize_entry(k, &AsNumber(v))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<BTreeMap<String, Decimal>, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(d)?;
        raw.into_iter()
            .map(|(k, v)| match from_json(&v) {
                Some(amount) => Ok((k, amount)),
                None => Err(D::Error::custom(format!("invalid amount for '{}'", k))),
            })
            .collect()
    }
}
