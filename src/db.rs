// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "MoneyMesh", "moneymesh"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneymesh.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn = Connection::open(&path).map_err(|source| LedgerError::StorageUnavailable {
        path: path.clone(),
        source,
    })?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// Volatile session used when the durable medium cannot be opened.
/// Nothing written here survives the process.
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory store")?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    // No FK from transactions to credit_cards: a dangling card reference is
    // tolerated data, and the delete cascade is explicit in the card store.
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS credit_cards(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        number TEXT NOT NULL,
        color_tag TEXT NOT NULL,
        settlement_day INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_name TEXT NOT NULL,
        category TEXT NOT NULL,
        type TEXT NOT NULL,
        status TEXT NOT NULL,
        actual_amount TEXT NOT NULL,
        budget_amount TEXT NOT NULL,
        transaction_date TEXT NOT NULL,
        mode_of_payment TEXT NOT NULL,
        platform TEXT NOT NULL,
        credit_card_id INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date);
    CREATE INDEX IF NOT EXISTS idx_transactions_card ON transactions(credit_card_id);
    "#,
    )?;
    Ok(())
}
