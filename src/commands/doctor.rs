// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{CardStore, TransactionStore};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashSet;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    let cards = CardStore::new(conn).list()?;
    let card_ids: HashSet<i64> = cards.iter().map(|c| c.id).collect();

    // 1) Transactions pointing at a card that no longer exists
    for t in TransactionStore::new(conn).list()? {
        if let Some(id) = t.credit_card_id {
            if !card_ids.contains(&id) {
                rows.push(vec![
                    "dangling_card_reference".into(),
                    format!("entry {} '{}' -> card {}", t.id, t.account_name, id),
                ]);
            }
        }
    }

    // 2) Cards whose billing cycle cannot be computed
    for c in &cards {
        if !(1..=31).contains(&c.settlement_day) {
            rows.push(vec![
                "invalid_settlement_day".into(),
                format!("card '{}' day {}", c.name, c.settlement_day),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
