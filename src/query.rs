// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Status, Transaction};
use anyhow::bail;
use chrono::Datelike;
use std::cmp::Ordering;
use std::str::FromStr;

/// Entries whose date falls inside the given calendar month and year.
/// Calendar semantics, not a rolling 30-day window.
pub fn month_window(txs: &[Transaction], month: u32, year: i32) -> Vec<Transaction> {
    txs.iter()
        .filter(|t| t.transaction_date.month() == month && t.transaction_date.year() == year)
        .cloned()
        .collect()
}

/// Conjunctive filter; every absent predicate is always-true.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilter {
    pub category: Option<Category>,
    pub status: Option<Status>,
    /// Case-insensitive substring match on the account name.
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        self.category.is_none_or(|c| t.category == c)
            && self.status.is_none_or(|s| t.status == s)
            && self.search.as_ref().is_none_or(|q| {
                t.account_name
                    .to_lowercase()
                    .contains(&q.to_lowercase())
            })
    }

    pub fn apply(&self, txs: &[Transaction]) -> Vec<Transaction> {
        txs.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    AccountName,
    Category,
    Kind,
    Status,
    Actual,
    Budget,
    Date,
    ModeOfPayment,
    Platform,
    CreditCard,
}

impl FromStr for SortColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            c if c.eq_ignore_ascii_case("name") => Ok(SortColumn::AccountName),
            c if c.eq_ignore_ascii_case("category") => Ok(SortColumn::Category),
            c if c.eq_ignore_ascii_case("type") => Ok(SortColumn::Kind),
            c if c.eq_ignore_ascii_case("status") => Ok(SortColumn::Status),
            c if c.eq_ignore_ascii_case("actual") => Ok(SortColumn::Actual),
            c if c.eq_ignore_ascii_case("budget") => Ok(SortColumn::Budget),
            c if c.eq_ignore_ascii_case("date") => Ok(SortColumn::Date),
            c if c.eq_ignore_ascii_case("mode") => Ok(SortColumn::ModeOfPayment),
            c if c.eq_ignore_ascii_case("platform") => Ok(SortColumn::Platform),
            c if c.eq_ignore_ascii_case("card") => Ok(SortColumn::CreditCard),
            other => bail!(
                "Unknown sort column '{}' (use name|category|type|status|actual|budget|date|mode|platform|card)",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Single active sort column. Selecting a column sorts ascending;
/// selecting it again flips to descending; a different column resets
/// to ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn toggle(&mut self, column: SortColumn) {
        self.direction =
            if self.column == Some(column) && self.direction == SortDirection::Ascending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
        self.column = Some(column);
    }
}

fn compare(a: &Transaction, b: &Transaction, column: SortColumn) -> Ordering {
    match column {
        SortColumn::AccountName => a.account_name.cmp(&b.account_name),
        SortColumn::Category => a.category.as_str().cmp(b.category.as_str()),
        SortColumn::Kind => a.kind.cmp(&b.kind),
        SortColumn::Status => a.status.as_str().cmp(b.status.as_str()),
        SortColumn::Actual => a.actual_amount.cmp(&b.actual_amount),
        SortColumn::Budget => a.budget_amount.cmp(&b.budget_amount),
        SortColumn::Date => a.transaction_date.cmp(&b.transaction_date),
        SortColumn::ModeOfPayment => a.mode_of_payment.cmp(&b.mode_of_payment),
        SortColumn::Platform => a.platform.cmp(&b.platform),
        SortColumn::CreditCard => a.credit_card_id.cmp(&b.credit_card_id),
    }
}

/// Stable sort: ties keep the filtered sequence's relative order, so
/// re-sorting an already-sorted sequence is a no-op.
pub fn sort_transactions(txs: &mut [Transaction], sort: &SortState) {
    let Some(column) = sort.column else {
        return;
    };
    txs.sort_by(|a, b| {
        let ord = compare(a, b, column);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
