// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CreditCard, Transaction};
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

/// Repository over the `transactions` collection. All mutations are
/// single statements against the rowid index; there is no
/// read-modify-write window to lose updates in.
pub struct TransactionStore<'c> {
    conn: &'c Connection,
}

impl<'c> TransactionStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// All ledger entries. Row order is unspecified; callers sort.
    pub fn list(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, account_name, category, type, status, actual_amount, budget_amount,
                    transaction_date, mode_of_payment, platform, credit_card_id
             FROM transactions",
        )?;
        let mut rows = stmt.query([])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(transaction_from_row(r)?);
        }
        Ok(data)
    }

    pub fn get(&self, id: i64) -> Result<Option<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, account_name, category, type, status, actual_amount, budget_amount,
                    transaction_date, mode_of_payment, platform, credit_card_id
             FROM transactions WHERE id=?1",
        )?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(r) => Ok(Some(transaction_from_row(r)?)),
            None => Ok(None),
        }
    }

    /// Replace-by-id when the id matches an existing row, otherwise insert
    /// with a fresh never-reused id. Returns the finalized record.
    pub fn upsert(&self, t: &Transaction) -> Result<Transaction> {
        if t.id != 0 {
            let n = self.conn.execute(
                "UPDATE transactions SET account_name=?2, category=?3, type=?4, status=?5,
                        actual_amount=?6, budget_amount=?7, transaction_date=?8,
                        mode_of_payment=?9, platform=?10, credit_card_id=?11
                 WHERE id=?1",
                params![
                    t.id,
                    t.account_name,
                    t.category.as_str(),
                    t.kind,
                    t.status.as_str(),
                    t.actual_amount.to_string(),
                    t.budget_amount.to_string(),
                    t.transaction_date.to_string(),
                    t.mode_of_payment,
                    t.platform,
                    t.credit_card_id
                ],
            )?;
            if n > 0 {
                return Ok(t.clone());
            }
        }
        self.conn.execute(
            "INSERT INTO transactions(account_name, category, type, status, actual_amount,
                    budget_amount, transaction_date, mode_of_payment, platform, credit_card_id)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
            params![
                t.account_name,
                t.category.as_str(),
                t.kind,
                t.status.as_str(),
                t.actual_amount.to_string(),
                t.budget_amount.to_string(),
                t.transaction_date.to_string(),
                t.mode_of_payment,
                t.platform,
                t.credit_card_id
            ],
        )?;
        let mut out = t.clone();
        out.id = self.conn.last_insert_rowid();
        Ok(out)
    }

    /// No-op when the id is absent.
    pub fn remove(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        Ok(())
    }

    /// Clear the collection and insert every record with a fresh id.
    /// Used by the import codec, inside the caller's SQL transaction.
    pub fn replace_all(&self, items: &[Transaction]) -> Result<Vec<Transaction>> {
        self.conn.execute("DELETE FROM transactions", [])?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let mut fresh = item.clone();
            fresh.id = 0;
            out.push(self.upsert(&fresh)?);
        }
        Ok(out)
    }
}

/// Repository over the `credit_cards` collection.
pub struct CardStore<'c> {
    conn: &'c Connection,
}

impl<'c> CardStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<CreditCard>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, number, color_tag, settlement_day FROM credit_cards",
        )?;
        let mut rows = stmt.query([])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(card_from_row(r)?);
        }
        Ok(data)
    }

    pub fn get(&self, id: i64) -> Result<Option<CreditCard>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, number, color_tag, settlement_day FROM credit_cards WHERE id=?1",
        )?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(r) => Ok(Some(card_from_row(r)?)),
            None => Ok(None),
        }
    }

    pub fn id_for_name(&self, name: &str) -> Result<Option<i64>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM credit_cards WHERE name=?1",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        Ok(id)
    }

    pub fn upsert(&self, c: &CreditCard) -> Result<CreditCard> {
        if c.id != 0 {
            let n = self.conn.execute(
                "UPDATE credit_cards SET name=?2, number=?3, color_tag=?4, settlement_day=?5
                 WHERE id=?1",
                params![
                    c.id,
                    c.name,
                    c.number,
                    c.color_tag.as_str(),
                    c.settlement_day
                ],
            )?;
            if n > 0 {
                return Ok(c.clone());
            }
        }
        self.conn.execute(
            "INSERT INTO credit_cards(name, number, color_tag, settlement_day)
             VALUES (?1,?2,?3,?4)",
            params![c.name, c.number, c.color_tag.as_str(), c.settlement_day],
        )?;
        let mut out = c.clone();
        out.id = self.conn.last_insert_rowid();
        Ok(out)
    }

    /// Delete the card and every ledger entry referencing it, atomically.
    /// The match is by explicit id against the full transaction table.
    pub fn remove(&self, id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let dropped = tx.execute(
            "DELETE FROM transactions WHERE credit_card_id=?1",
            params![id],
        )?;
        tx.execute("DELETE FROM credit_cards WHERE id=?1", params![id])?;
        tx.commit()?;
        if dropped > 0 {
            tracing::debug!(card_id = id, dropped, "card removed with linked transactions");
        }
        Ok(())
    }

    pub fn replace_all(&self, items: &[CreditCard]) -> Result<Vec<CreditCard>> {
        self.conn.execute("DELETE FROM credit_cards", [])?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let mut fresh = item.clone();
            fresh.id = 0;
            out.push(self.upsert(&fresh)?);
        }
        Ok(out)
    }
}

fn transaction_from_row(r: &Row<'_>) -> Result<Transaction> {
    let category: String = r.get(2)?;
    let status: String = r.get(4)?;
    let actual: String = r.get(5)?;
    let budget: String = r.get(6)?;
    let date: String = r.get(7)?;
    Ok(Transaction {
        id: r.get(0)?,
        account_name: r.get(1)?,
        category: category.parse()?,
        kind: r.get(3)?,
        status: status.parse()?,
        actual_amount: actual
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", actual))?,
        budget_amount: budget
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", budget))?,
        transaction_date: chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' in transactions", date))?,
        mode_of_payment: r.get(8)?,
        platform: r.get(9)?,
        credit_card_id: r.get(10)?,
    })
}

fn card_from_row(r: &Row<'_>) -> Result<CreditCard> {
    let color: String = r.get(3)?;
    Ok(CreditCard {
        id: r.get(0)?,
        name: r.get(1)?,
        number: r.get(2)?,
        color_tag: color.parse()?,
        settlement_day: r.get(4)?,
    })
}
