// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of ledger categories. Unknown strings are rejected at the
/// boundary; the aggregation engine matches exhaustively on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Income,
    Expense,
    Investment,
    Other,
    Settlement,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Income,
        Category::Expense,
        Category::Investment,
        Category::Other,
        Category::Settlement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
            Category::Investment => "Investment",
            Category::Other => "Other",
            Category::Settlement => "Settlement",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            c if c.eq_ignore_ascii_case("income") => Ok(Category::Income),
            c if c.eq_ignore_ascii_case("expense") => Ok(Category::Expense),
            c if c.eq_ignore_ascii_case("investment") => Ok(Category::Investment),
            c if c.eq_ignore_ascii_case("other") => Ok(Category::Other),
            c if c.eq_ignore_ascii_case("settlement") => Ok(Category::Settlement),
            other => bail!(
                "Unknown category '{}' (use Income|Expense|Investment|Other|Settlement)",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "In progress")]
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not started",
            Status::InProgress => "In progress",
            Status::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            c if c.eq_ignore_ascii_case("not started") => Ok(Status::NotStarted),
            c if c.eq_ignore_ascii_case("in progress") => Ok(Status::InProgress),
            c if c.eq_ignore_ascii_case("done") => Ok(Status::Done),
            other => bail!(
                "Unknown status '{}' (use 'Not started'|'In progress'|'Done')",
                other
            ),
        }
    }
}

/// Display-only color token for the card dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    Red,
    Blue,
    Green,
    Purple,
    Yellow,
    Indigo,
    Pink,
    Teal,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Red => "Red",
            ColorTag::Blue => "Blue",
            ColorTag::Green => "Green",
            ColorTag::Purple => "Purple",
            ColorTag::Yellow => "Yellow",
            ColorTag::Indigo => "Indigo",
            ColorTag::Pink => "Pink",
            ColorTag::Teal => "Teal",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            c if c.eq_ignore_ascii_case("red") => Ok(ColorTag::Red),
            c if c.eq_ignore_ascii_case("blue") => Ok(ColorTag::Blue),
            c if c.eq_ignore_ascii_case("green") => Ok(ColorTag::Green),
            c if c.eq_ignore_ascii_case("purple") => Ok(ColorTag::Purple),
            c if c.eq_ignore_ascii_case("yellow") => Ok(ColorTag::Yellow),
            c if c.eq_ignore_ascii_case("indigo") => Ok(ColorTag::Indigo),
            c if c.eq_ignore_ascii_case("pink") => Ok(ColorTag::Pink),
            c if c.eq_ignore_ascii_case("teal") => Ok(ColorTag::Teal),
            other => bail!("Unknown color '{}'", other),
        }
    }
}

/// A ledger entry. Wire field names keep the durable camelCase schema;
/// `id == 0` marks a record not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: i64,
    pub account_name: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Status,
    pub actual_amount: Decimal,
    pub budget_amount: Decimal,
    pub transaction_date: NaiveDate,
    pub mode_of_payment: String,
    pub platform: String,
    #[serde(default)]
    pub credit_card_id: Option<i64>,
}

impl Transaction {
    /// Authoritative rule: a transaction belongs to the credit-card view
    /// iff it references a card, regardless of category.
    pub fn is_credit_card_transaction(&self) -> bool {
        self.credit_card_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub number: String,
    pub color_tag: ColorTag,
    /// Billing anchor, day of month. Out-of-range values are kept as data
    /// and surface as "invalid settlement day" when a cycle is computed.
    pub settlement_day: i64,
}
