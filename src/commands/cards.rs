// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, ColorTag, CreditCard, Status, Transaction};
use crate::query::{SortDirection, SortState, sort_transactions};
use crate::report::{billing_cycle, card_total};
use crate::store::{CardStore, TransactionStore};
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("report", sub)) => report(conn, sub)?,
        Some(("tx", sub)) => match sub.subcommand() {
            Some(("add", sub)) => tx_add(conn, sub)?,
            Some(("list", sub)) => tx_list(conn, sub)?,
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let color: ColorTag = sub.get_one::<String>("color").unwrap().parse()?;
    let day = *sub.get_one::<i64>("settlement-day").unwrap();
    if !(1..=31).contains(&day) {
        bail!("Settlement day must be between 1 and 31, got {}", day);
    }
    let card = CreditCard {
        id: sub.get_one::<i64>("id").copied().unwrap_or(0),
        name: name.clone(),
        number: sub.get_one::<String>("number").unwrap().clone(),
        color_tag: color,
        settlement_day: day,
    };
    let saved = CardStore::new(conn).upsert(&card)?;
    println!("Saved card '{}' (settles day {}, card {})", name, day, saved.id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let cards = CardStore::new(conn).list()?;
    if !maybe_print_json(json_flag, jsonl_flag, &cards)? {
        let rows: Vec<Vec<String>> = cards
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.number.clone(),
                    c.color_tag.to_string(),
                    c.settlement_day.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Number", "Color", "Settlement Day"], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let store = CardStore::new(conn);
    let id = store
        .id_for_name(name)?
        .with_context(|| format!("Card '{}' not found", name))?;
    store.remove(id)?;
    println!("Removed card '{}' and its linked transactions", name);
    Ok(())
}

#[derive(Serialize)]
struct CardReportRow {
    name: String,
    number: String,
    settlement_day: i64,
    cycle: String,
    spent: String,
}

/// Per-card net spend. With no card filter the total runs across all
/// time; with `--card` it is windowed to that card's current cycle.
fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Local::now().date_naive();

    let cards = CardStore::new(conn).list()?;
    let card_txs: Vec<Transaction> = TransactionStore::new(conn)
        .list()?
        .into_iter()
        .filter(Transaction::is_credit_card_transaction)
        .collect();

    let selected = match sub.get_one::<String>("card") {
        Some(name) => {
            let card = cards
                .iter()
                .find(|c| &c.name == name)
                .with_context(|| format!("Card '{}' not found", name))?;
            vec![card.clone()]
        }
        None => cards,
    };
    let windowed = sub.get_one::<String>("card").is_some();

    let mut data = Vec::new();
    for card in &selected {
        let cycle = billing_cycle(card.settlement_day, today);
        let cycle_text = match cycle {
            Some(cycle) => cycle.period_text(),
            None => "Invalid settlement day".to_string(),
        };
        let spent = match (cycle, windowed) {
            // A selected card without a computable cycle has no window to
            // total over.
            (None, true) => "-".to_string(),
            (Some(cycle), true) => {
                let scoped: Vec<Transaction> = card_txs
                    .iter()
                    .filter(|t| cycle.contains(t.transaction_date))
                    .cloned()
                    .collect();
                fmt_amount(&card_total(&scoped, card.id))
            }
            (_, false) => fmt_amount(&card_total(&card_txs, card.id)),
        };
        data.push(CardReportRow {
            name: card.name.clone(),
            number: card.number.clone(),
            settlement_day: card.settlement_day,
            cycle: cycle_text,
            spent,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.number.clone(),
                    r.settlement_day.to_string(),
                    r.cycle.clone(),
                    r.spent.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Card", "Number", "Settlement Day", "Billing Cycle", "Spent"],
                rows
            )
        );
    }
    Ok(())
}

/// The card form records either an Expense or a Bill; a bill is stored
/// as a Settlement entry against the card.
fn card_category(s: &str) -> Result<Category> {
    match s.trim() {
        c if c.eq_ignore_ascii_case("bill") => Ok(Category::Settlement),
        c if c.eq_ignore_ascii_case("expense") => Ok(Category::Expense),
        other => bail!("Unknown card category '{}' (use Expense|Bill)", other),
    }
}

fn tx_add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let actual = parse_decimal(sub.get_one::<String>("actual").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let category = card_category(sub.get_one::<String>("category").unwrap())?;
    let card_name = sub.get_one::<String>("card").unwrap();
    let card_id = CardStore::new(conn)
        .id_for_name(card_name)?
        .with_context(|| format!("Card '{}' not found", card_name))?;

    let entry = Transaction {
        id: sub.get_one::<i64>("id").copied().unwrap_or(0),
        account_name: name.clone(),
        category,
        kind: category.as_str().to_string(),
        status: Status::Done,
        actual_amount: actual,
        budget_amount: rust_decimal::Decimal::ZERO,
        transaction_date: date,
        mode_of_payment: "Credit Card".to_string(),
        platform: card_name.clone(),
        credit_card_id: Some(card_id),
    };
    let saved = TransactionStore::new(conn).upsert(&entry)?;
    println!(
        "Recorded {} {} on '{}' ({}, entry {})",
        category, actual, card_name, date, saved.id
    );
    Ok(())
}

fn tx_list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Local::now().date_naive();

    let cards = CardStore::new(conn).list()?;
    let mut txs: Vec<Transaction> = TransactionStore::new(conn)
        .list()?
        .into_iter()
        .filter(Transaction::is_credit_card_transaction)
        .collect();

    if let Some(name) = sub.get_one::<String>("card") {
        let card = cards
            .iter()
            .find(|c| &c.name == name)
            .with_context(|| format!("Card '{}' not found", name))?;
        match billing_cycle(card.settlement_day, today) {
            Some(cycle) => {
                txs.retain(|t| {
                    t.credit_card_id == Some(card.id) && cycle.contains(t.transaction_date)
                });
            }
            None => {
                eprintln!("Invalid settlement day for card '{}'", name);
                txs.clear();
            }
        }
    }

    if let Some(cat) = sub.get_one::<String>("category") {
        let category = card_category(cat)?;
        txs.retain(|t| t.category == category);
    }
    if let Some(q) = sub.get_one::<String>("search") {
        let needle = q.to_lowercase();
        txs.retain(|t| t.account_name.to_lowercase().contains(&needle));
    }

    let mut sort = SortState::default();
    if let Some(col) = sub.get_one::<String>("sort") {
        sort.column = Some(col.parse()?);
        if sub.get_flag("desc") {
            sort.direction = SortDirection::Descending;
        }
    }
    sort_transactions(&mut txs, &sort);

    let names: HashMap<i64, String> = cards.into_iter().map(|c| (c.id, c.name)).collect();
    let data: Vec<CardTxRow> = txs
        .iter()
        .map(|t| {
            let paid = if t.category == Category::Settlement {
                " (Paid)"
            } else {
                ""
            };
            CardTxRow {
                id: t.id,
                name: t.account_name.clone(),
                actual: format!("{}{}", fmt_amount(&t.actual_amount), paid),
                card: match t.credit_card_id {
                    None => "None".to_string(),
                    Some(id) => names.get(&id).cloned().unwrap_or_else(|| {
                        tracing::debug!(transaction_id = t.id, card_id = id, "dangling card reference");
                        "Unknown".to_string()
                    }),
                },
                category: t.category.to_string(),
                date: t.transaction_date.to_string(),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.actual.clone(),
                    r.card.clone(),
                    r.category.clone(),
                    r.date.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Actual", "Card", "Category", "Date"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CardTxRow {
    id: i64,
    name: String,
    actual: String,
    card: String,
    category: String,
    date: String,
}
