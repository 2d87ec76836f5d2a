// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            _ => Err(Error::validation(format!(
                "Invalid type '{}', expected Income or Expense",
                s.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub r#type: TxType,
    pub category: String,
    #[serde(with = "crate::money")]
    pub amount: Decimal, // rounded to cents
    #[serde(default)]
    pub description: String,
}

/// Raw form input for a new transaction, validated by `Ledger::add`.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::validation(format!(
                "Invalid priority '{}', expected Low, Medium or High",
                s.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub task: String,
    pub category: String,
    pub priority: Priority,
    pub created: NaiveDateTime,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub task: String,
    pub category: String,
    /// Empty means `Priority::Medium`.
    pub priority: String,
}

/// Fields to replace on an existing task; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub task: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    #[serde(with = "crate::money")]
    pub income: Decimal,
    #[serde(with = "crate::money")]
    pub expense: Decimal,
    #[serde(with = "crate::money")]
    pub balance: Decimal,
}

impl Totals {
    pub(crate) fn record(&mut self, tx: &Transaction) {
        match tx.r#type {
            TxType::Income => self.income += tx.amount,
            TxType::Expense => self.expense += tx.amount,
        }
        self.balance = self.income - self.expense;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskTotals {
    pub done: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetState {
    #[serde(rename = "Within Budget")]
    Within,
    #[serde(rename = "Over Budget")]
    Over,
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetState::Within => f.write_str("Within Budget"),
            BudgetState::Over => f.write_str("Over Budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetAlert {
    /// Spending exceeded the limit by `by`.
    Over {
        #[serde(with = "crate::money")]
        by: Decimal,
    },
    /// Less than 20% of the limit is left.
    NearLimit {
        #[serde(with = "crate::money")]
        remaining: Decimal,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    #[serde(with = "crate::money")]
    pub limit: Decimal,
    #[serde(with = "crate::money")]
    pub spent: Decimal,
    #[serde(with = "crate::money")]
    pub remaining: Decimal,
    pub status: BudgetState,
    pub alert: Option<BudgetAlert>,
}

impl BudgetStatus {
    pub fn alert_message(&self) -> Option<String> {
        match self.alert? {
            BudgetAlert::Over { by } => Some(format!(
                "OVER BUDGET: {} exceeded by {:.2}",
                self.category, by
            )),
            BudgetAlert::NearLimit { remaining } => Some(format!(
                "WARNING: {} has only {:.2} remaining",
                self.category, remaining
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub overall: Totals,
    pub month: String, // YYYY-MM
    pub month_totals: Totals,
    pub transactions: usize,
    pub income_transactions: usize,
    pub expense_transactions: usize,
}
