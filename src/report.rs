// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CreditCard, Transaction};
use crate::query::month_window;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Per-category sums of actual amounts over one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub investment: Decimal,
    pub other: Decimal,
    pub settlement: Decimal,
}

impl CategoryTotals {
    pub fn for_month(txs: &[Transaction], month: u32, year: i32) -> Self {
        let mut totals = CategoryTotals {
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            investment: Decimal::ZERO,
            other: Decimal::ZERO,
            settlement: Decimal::ZERO,
        };
        for t in month_window(txs, month, year) {
            match t.category {
                Category::Income => totals.income += t.actual_amount,
                Category::Expense => totals.expense += t.actual_amount,
                Category::Investment => totals.investment += t.actual_amount,
                Category::Other => totals.other += t.actual_amount,
                Category::Settlement => totals.settlement += t.actual_amount,
            }
        }
        totals
    }

    pub fn total(&self, category: Category) -> Decimal {
        match category {
            Category::Income => self.income,
            Category::Expense => self.expense,
            Category::Investment => self.investment,
            Category::Other => self.other,
            Category::Settlement => self.settlement,
        }
    }

    /// Income minus ordinary spend. Settlement is excluded: a card bill
    /// being paid is not new spend.
    pub fn remaining_balance(&self) -> Decimal {
        self.income - (self.expense + self.investment + self.other)
    }
}

/// Half-open window `[start, end)` anchored to a card's settlement day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingCycle {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingCycle {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn period_text(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d, %Y"),
            self.end.format("%b %-d, %Y")
        )
    }
}

/// The cycle containing `today`: `[this month's day, next month's day)`
/// once the settlement day has passed, otherwise
/// `[last month's day, this month's day)`. A day outside 1-31 yields
/// `None` ("invalid settlement day"); a day past the end of a short month
/// rolls into the following month.
pub fn billing_cycle(settlement_day: i64, today: NaiveDate) -> Option<BillingCycle> {
    if !(1..=31).contains(&settlement_day) {
        return None;
    }
    let day = settlement_day as u32;
    let month = today.month() as i32;
    let (start_month, end_month) = if today.day() >= day {
        (month, month + 1)
    } else {
        (month - 1, month)
    };
    Some(BillingCycle {
        start: month_day(today.year(), start_month, day)?,
        end: month_day(today.year(), end_month, day)?,
    })
}

/// Day `day` of the given month, with the month normalized into 1-12 and
/// day overflow carried forward (Feb 31 -> Mar 3).
fn month_day(year: i32, month: i32, day: u32) -> Option<NaiveDate> {
    let (year, month) = match month {
        m if m < 1 => (year - 1, (m + 12) as u32),
        m if m > 12 => (year + 1, (m - 12) as u32),
        m => (year, m as u32),
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// Net spend on one card over the given entries:
/// expenses minus settlements, scoped to that card.
pub fn card_total(txs: &[Transaction], card_id: i64) -> Decimal {
    let mut total = Decimal::ZERO;
    for t in txs.iter().filter(|t| t.credit_card_id == Some(card_id)) {
        match t.category {
            Category::Expense => total += t.actual_amount,
            Category::Settlement => total -= t.actual_amount,
            Category::Income | Category::Investment | Category::Other => {}
        }
    }
    total
}

/// Net spend on one card within its current billing cycle, or `None`
/// when the card's settlement day is invalid.
pub fn card_spend(txs: &[Transaction], card: &CreditCard, today: NaiveDate) -> Option<Decimal> {
    let cycle = billing_cycle(card.settlement_day, today)?;
    let windowed: Vec<Transaction> = txs
        .iter()
        .filter(|t| cycle.contains(t.transaction_date))
        .cloned()
        .collect();
    Some(card_total(&windowed, card.id))
}
