// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Status, Transaction};
use crate::query::{SortDirection, SortState, TransactionFilter, month_window, sort_transactions};
use crate::store::{CardStore, TransactionStore};
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let status: Status = sub.get_one::<String>("status").unwrap().parse()?;
    let actual = parse_decimal(sub.get_one::<String>("actual").unwrap())?;
    let budget = parse_decimal(sub.get_one::<String>("budget").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;

    let credit_card_id = match sub.get_one::<String>("card") {
        Some(card_name) => Some(
            CardStore::new(conn)
                .id_for_name(card_name)?
                .with_context(|| format!("Card '{}' not found", card_name))?,
        ),
        None => None,
    };

    let entry = Transaction {
        id: sub.get_one::<i64>("id").copied().unwrap_or(0),
        account_name: name.clone(),
        category,
        kind: sub.get_one::<String>("type").unwrap().clone(),
        status,
        actual_amount: actual,
        budget_amount: budget,
        transaction_date: date,
        mode_of_payment: sub.get_one::<String>("mode").unwrap().clone(),
        platform: sub.get_one::<String>("platform").unwrap().clone(),
        credit_card_id,
    };
    let saved = TransactionStore::new(conn).upsert(&entry)?;
    println!(
        "Recorded {} {} on {} ('{}', entry {})",
        category, actual, date, name, saved.id
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    TransactionStore::new(conn).remove(id)?;
    println!("Removed entry {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                    r.status.clone(),
                    r.actual.clone(),
                    r.budget.clone(),
                    r.date.clone(),
                    r.mode.clone(),
                    r.platform.clone(),
                    r.card.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Name", "Category", "Type", "Status", "Actual", "Budget", "Date",
                    "Mode", "Platform", "Card"
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub actual: String,
    pub budget: String,
    pub date: String,
    pub mode: String,
    pub platform: String,
    pub card: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut txs = TransactionStore::new(conn).list()?;

    if let (Some(month), Some(year)) = (
        sub.get_one::<u32>("month").copied(),
        sub.get_one::<i32>("year").copied(),
    ) {
        txs = month_window(&txs, month, year);
    }

    let filter = TransactionFilter {
        category: sub
            .get_one::<String>("category")
            .map(|s| s.parse())
            .transpose()?,
        status: sub
            .get_one::<String>("status")
            .map(|s| s.parse())
            .transpose()?,
        search: sub.get_one::<String>("search").cloned(),
    };
    let mut txs = filter.apply(&txs);

    let mut sort = SortState::default();
    if let Some(col) = sub.get_one::<String>("sort") {
        sort.column = Some(col.parse()?);
        if sub.get_flag("desc") {
            sort.direction = SortDirection::Descending;
        }
    }
    sort_transactions(&mut txs, &sort);

    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    let cards: HashMap<i64, String> = CardStore::new(conn)
        .list()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok(txs.iter().map(|t| row_for(t, &cards)).collect())
}

pub(crate) fn row_for(t: &Transaction, cards: &HashMap<i64, String>) -> TransactionRow {
    let card = match t.credit_card_id {
        None => "None".to_string(),
        Some(id) => cards.get(&id).cloned().unwrap_or_else(|| {
            tracing::debug!(transaction_id = t.id, card_id = id, "dangling card reference");
            "Unknown".to_string()
        }),
    };
    TransactionRow {
        id: t.id,
        name: t.account_name.clone(),
        category: t.category.to_string(),
        kind: t.kind.clone(),
        status: t.status.to_string(),
        actual: fmt_amount(&t.actual_amount),
        budget: fmt_amount(&t.budget_amount),
        date: t.transaction_date.to_string(),
        mode: t.mode_of_payment.clone(),
        platform: t.platform.clone(),
        card,
    }
}
