// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::{CreditCard, Transaction};
use crate::store::{CardStore, TransactionStore};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// The portable document shape: both collections, verbatim.
/// A payload lacking either array is a format error on import.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub cards: Vec<CreditCard>,
    pub transactions: Vec<Transaction>,
}

pub fn export_document(conn: &Connection) -> Result<ExportDocument> {
    Ok(ExportDocument {
        cards: CardStore::new(conn).list()?,
        transactions: TransactionStore::new(conn).list()?,
    })
}

pub fn export_json<W: Write>(conn: &Connection, writer: W) -> Result<()> {
    let doc = export_document(conn)?;
    serde_json::to_writer_pretty(writer, &doc).context("Serialize export document")?;
    Ok(())
}

/// The spreadsheet rendering: two sheets as two CSV files in `dir`,
/// cards verbatim and transactions with the card reference denormalized
/// to the card's display name.
pub fn export_csv(conn: &Connection, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let doc = export_document(conn)?;
    let names: HashMap<i64, &str> = doc.cards.iter().map(|c| (c.id, c.name.as_str())).collect();

    let cards_path = dir.join("CreditCards.csv");
    let mut wtr = csv::Writer::from_path(&cards_path)
        .with_context(|| format!("Open CSV {}", cards_path.display()))?;
    wtr.write_record(["id", "name", "number", "colorTag", "settlementDay"])?;
    for c in &doc.cards {
        wtr.write_record([
            c.id.to_string(),
            c.name.clone(),
            c.number.clone(),
            c.color_tag.to_string(),
            c.settlement_day.to_string(),
        ])?;
    }
    wtr.flush()?;

    let txs_path = dir.join("Transactions.csv");
    let mut wtr = csv::Writer::from_path(&txs_path)
        .with_context(|| format!("Open CSV {}", txs_path.display()))?;
    wtr.write_record([
        "id",
        "accountName",
        "category",
        "type",
        "status",
        "actualAmount",
        "budgetAmount",
        "transactionDate",
        "modeOfPayment",
        "platform",
        "creditCard",
    ])?;
    for t in &doc.transactions {
        let card_name = match t.credit_card_id {
            None => "None",
            Some(id) => names.get(&id).copied().unwrap_or_else(|| {
                tracing::warn!(transaction_id = t.id, card_id = id, "dangling card reference");
                "Unknown"
            }),
        };
        wtr.write_record([
            t.id.to_string(),
            t.account_name.clone(),
            t.category.to_string(),
            t.kind.clone(),
            t.status.to_string(),
            t.actual_amount.to_string(),
            t.budget_amount.to_string(),
            t.transaction_date.to_string(),
            t.mode_of_payment.clone(),
            t.platform.clone(),
            card_name.to_string(),
        ])?;
    }
    wtr.flush()?;

    Ok((cards_path, txs_path))
}

/// Replace both collections with the document's records. Incoming ids are
/// never trusted: every record gets a fresh id, and each transaction's
/// card link is re-resolved by card *name* (incoming id -> incoming name
/// -> newly assigned id). Malformed input aborts before anything is
/// written. Returns (cards, transactions) counts.
pub fn import_json<R: Read>(conn: &Connection, reader: R) -> Result<(usize, usize)> {
    let doc: ExportDocument = serde_json::from_reader(reader)
        .map_err(|e| LedgerError::ImportFormat(e.to_string()))?;

    let name_by_old: HashMap<i64, &str> =
        doc.cards.iter().map(|c| (c.id, c.name.as_str())).collect();

    let tx = conn.unchecked_transaction()?;
    let new_cards = CardStore::new(&tx).replace_all(&doc.cards)?;
    let id_by_name: HashMap<&str, i64> =
        new_cards.iter().map(|c| (c.name.as_str(), c.id)).collect();

    let mut incoming = doc.transactions.clone();
    for t in &mut incoming {
        let relinked = t.credit_card_id.and_then(|old| {
            name_by_old
                .get(&old)
                .and_then(|name| id_by_name.get(name).copied())
        });
        if t.credit_card_id.is_some() && relinked.is_none() {
            tracing::warn!(
                account_name = %t.account_name,
                card_id = t.credit_card_id,
                "imported card reference matches no card name; clearing it"
            );
        }
        t.credit_card_id = relinked;
    }
    let new_txs = TransactionStore::new(&tx).replace_all(&incoming)?;
    tx.commit()?;

    Ok((new_cards.len(), new_txs.len()))
}
