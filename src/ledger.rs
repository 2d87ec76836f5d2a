// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The wallet ledger: transactions, categories and monthly budget limits.
//!
//! `Ledger` is the single owner of wallet state. It assigns ids, validates
//! input on `add`, and answers every read the front end needs (filtered
//! views, totals, groupings, budget status). It never touches the disk;
//! see [`crate::storage`] for that.

use crate::error::{Error, Result};
use crate::models::{
    BudgetAlert, BudgetState, BudgetStatus, NewTransaction, Stats, Totals, Transaction, TxType,
};
use crate::money;
use crate::utils::{amount_too_large, month_key, parse_date, parse_positive_amount};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Categories every ledger starts with. These can never be removed.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Salary",
    "Groceries",
    "Transport",
    "Entertainment",
    "Utilities",
    "Other",
];

/// Category used when none is given.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Predicates for [`Ledger::filter`]. Unset (or empty) fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description or the category.
    pub search: Option<String>,
    pub category: Option<String>,
    pub r#type: Option<TxType>,
    /// Prefix of the ISO date, usually `YYYY-MM`.
    pub month: Option<String>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.search).is_none()
            && non_empty(&self.category).is_none()
            && self.r#type.is_none()
            && non_empty(&self.month).is_none()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(term) = non_empty(&self.search) {
            let term = term.to_lowercase();
            if !tx.description.to_lowercase().contains(&term)
                && !tx.category.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if let Some(cat) = non_empty(&self.category) {
            if tx.category != cat {
                return false;
            }
        }
        if let Some(t) = self.r#type {
            if tx.r#type != t {
                return false;
            }
        }
        if let Some(month) = non_empty(&self.month) {
            if !tx.date.to_string().starts_with(month) {
                return false;
            }
        }
        true
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    categories: Vec<String>,
    budget_limits: BTreeMap<String, Decimal>,
    next_id: i64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            budget_limits: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a ledger from persisted parts. Default categories always come
    /// first; the id high-water mark never drops below `max(id) + 1`.
    pub(crate) fn from_parts(
        transactions: Vec<Transaction>,
        categories: Vec<String>,
        budget_limits: BTreeMap<String, Decimal>,
        next_id: Option<i64>,
    ) -> Result<Self> {
        let mut ledger = Self::new();
        for c in categories {
            ledger.merge_category(&c);
        }
        ledger.next_id = resume_id(transactions.iter().map(|t| t.id), next_id)?;
        ledger.transactions = transactions;
        ledger.budget_limits = budget_limits;
        Ok(ledger)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn budget_limits(&self) -> &BTreeMap<String, Decimal> {
        &self.budget_limits
    }

    /// The id the next added transaction will receive.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn is_known_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// Validates `input`, assigns the next id and appends the transaction.
    /// On error nothing changes.
    pub fn add(&mut self, input: NewTransaction) -> Result<Transaction> {
        let amount = parse_positive_amount(&input.amount)?;
        let date = parse_date(&input.date)?;
        let r#type: TxType = input.r#type.parse()?;
        let category = match input.category.trim() {
            "" => FALLBACK_CATEGORY.to_string(),
            c => c.to_string(),
        };
        if !self.is_known_category(&category) {
            return Err(Error::validation(format!(
                "Category '{}' not found",
                category
            )));
        }
        let tx = Transaction {
            id: self.next_id,
            date,
            r#type,
            category,
            amount,
            description: input.description.trim().to_string(),
        };
        self.push(tx.clone())?;
        debug!(id = tx.id, amount = %tx.amount, "added transaction");
        Ok(tx)
    }

    /// Appends `tx` under a fresh id, ignoring whatever id it carried.
    pub(crate) fn push(&mut self, mut tx: Transaction) -> Result<i64> {
        tx.id = self.next_id;
        self.next_id = next_after(self.next_id)?;
        let id = tx.id;
        self.transactions.push(tx);
        Ok(id)
    }

    /// Whether `n` more records can still receive ids.
    pub(crate) fn has_room_for(&self, n: usize) -> bool {
        has_room(self.next_id, n)
    }

    /// Removes every transaction whose id is in `ids`. Unknown ids are
    /// ignored. Returns how many were removed.
    pub fn delete<I: IntoIterator<Item = i64>>(&mut self, ids: I) -> usize {
        let ids: HashSet<i64> = ids.into_iter().collect();
        let before = self.transactions.len();
        self.transactions.retain(|t| !ids.contains(&t.id));
        let removed = before - self.transactions.len();
        debug!(removed, "deleted transactions");
        removed
    }

    /// Transactions matching all predicates, in insertion order.
    pub fn filter(&self, f: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| f.matches(t)).collect()
    }

    pub fn aggregate_totals(&self) -> Totals {
        totals_of(self.transactions.iter())
    }

    /// Groups transactions by `key_fn` and totals each group.
    pub fn group_by<K, F>(&self, key_fn: F) -> BTreeMap<K, Totals>
    where
        K: Ord,
        F: Fn(&Transaction) -> K,
    {
        let mut groups: BTreeMap<K, Totals> = BTreeMap::new();
        for tx in &self.transactions {
            groups.entry(key_fn(tx)).or_default().record(tx);
        }
        groups
    }

    /// Expense total per category. Categories without expenses are absent.
    pub fn expenses_by_category(&self) -> BTreeMap<String, Decimal> {
        self.group_by(|t| t.category.clone())
            .into_iter()
            .filter(|(_, totals)| !totals.expense.is_zero())
            .map(|(cat, totals)| (cat, totals.expense))
            .collect()
    }

    /// Income and expense per `YYYY-MM`, ascending by month.
    pub fn monthly_totals(&self) -> BTreeMap<String, Totals> {
        self.group_by(|t| month_key(t.date))
    }

    pub fn stats(&self, today: NaiveDate) -> Stats {
        let month = month_key(today);
        let month_totals = totals_of(
            self.transactions
                .iter()
                .filter(|t| month_key(t.date) == month),
        );
        let income_transactions = self
            .transactions
            .iter()
            .filter(|t| t.r#type == TxType::Income)
            .count();
        Stats {
            overall: self.aggregate_totals(),
            month,
            month_totals,
            transactions: self.transactions.len(),
            income_transactions,
            expense_transactions: self.transactions.len() - income_transactions,
        }
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Category name can't be empty"));
        }
        if self.is_known_category(name) {
            return Err(Error::validation(format!(
                "Category '{}' already exists",
                name
            )));
        }
        self.categories.push(name.to_string());
        Ok(())
    }

    /// Removes a user-added category. Transactions already filed under it
    /// keep their category name.
    pub fn remove_category(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if DEFAULT_CATEGORIES.contains(&name) {
            return Err(Error::validation(format!(
                "Default category '{}' cannot be removed",
                name
            )));
        }
        let before = self.categories.len();
        self.categories.retain(|c| c != name);
        if self.categories.len() == before {
            return Err(Error::validation(format!("Category '{}' not found", name)));
        }
        Ok(())
    }

    /// Appends `name` unless it is empty or already present.
    pub(crate) fn merge_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.is_known_category(name) {
            return false;
        }
        self.categories.push(name.to_string());
        true
    }

    /// Inserts or replaces the monthly limit for `category`.
    pub fn set_budget(&mut self, category: &str, limit: Decimal) -> Result<()> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::validation("Please select a category"));
        }
        let limit = limit.round_dp(2);
        if limit <= Decimal::ZERO {
            return Err(Error::validation(format!(
                "Invalid budget '{}', expected a positive number",
                limit
            )));
        }
        if !money::in_range(&limit) {
            return Err(amount_too_large(&limit));
        }
        self.budget_limits.insert(category.to_string(), limit);
        debug!(category, %limit, "budget set");
        Ok(())
    }

    /// Spending against the limit for `category` in the month containing
    /// `today`. `None` when no limit is set.
    pub fn budget_status(&self, category: &str, today: NaiveDate) -> Option<BudgetStatus> {
        let limit = *self.budget_limits.get(category)?;
        let month = month_key(today);
        let spent: Decimal = self
            .transactions
            .iter()
            .filter(|t| {
                t.r#type == TxType::Expense && t.category == category && month_key(t.date) == month
            })
            .map(|t| t.amount)
            .sum();
        let remaining = limit - spent;
        let (status, alert) = if remaining < Decimal::ZERO {
            (BudgetState::Over, Some(BudgetAlert::Over { by: -remaining }))
        } else if remaining < limit * Decimal::new(2, 1) {
            (BudgetState::Within, Some(BudgetAlert::NearLimit { remaining }))
        } else {
            (BudgetState::Within, None)
        };
        Some(BudgetStatus {
            category: category.to_string(),
            limit,
            spent,
            remaining,
            status,
            alert,
        })
    }

    /// Status for every category with a limit, sorted by category.
    pub fn budget_overview(&self, today: NaiveDate) -> Vec<BudgetStatus> {
        self.budget_limits
            .keys()
            .filter_map(|c| self.budget_status(c, today))
            .collect()
    }

    pub(crate) fn merge_budget(&mut self, category: &str, limit: Decimal) {
        self.budget_limits.insert(category.to_string(), limit);
    }
}

/// The id to hand out next: past both the stored mark and every used id.
pub(crate) fn resume_id(ids: impl Iterator<Item = i64>, next_id: Option<i64>) -> Result<i64> {
    let max_id = ids.max().unwrap_or(0);
    let after_max = max_id
        .checked_add(1)
        .ok_or_else(|| Error::validation(format!("id {} leaves no room for new records", max_id)))?;
    Ok(next_id.unwrap_or(0).max(after_max))
}

pub(crate) fn next_after(id: i64) -> Result<i64> {
    id.checked_add(1)
        .ok_or_else(|| Error::validation("No ids left for new records"))
}

pub(crate) fn has_room(next_id: i64, n: usize) -> bool {
    i64::try_from(n)
        .ok()
        .and_then(|n| next_id.checked_add(n))
        .is_some()
}

fn totals_of<'a>(txs: impl Iterator<Item = &'a Transaction>) -> Totals {
    let mut totals = Totals::default();
    for tx in txs {
        totals.record(tx);
    }
    totals
}
