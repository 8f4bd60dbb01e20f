// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::report::CategoryTotals;
use crate::store::TransactionStore;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
struct Summary {
    #[serde(flatten)]
    totals: CategoryTotals,
    remaining_balance: Decimal,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let month = *m.get_one::<u32>("month").unwrap();
    let year = *m.get_one::<i32>("year").unwrap();

    let txs = TransactionStore::new(conn).list()?;
    let totals = CategoryTotals::for_month(&txs, month, year);
    let balance = totals.remaining_balance();

    let summary = Summary {
        totals: totals.clone(),
        remaining_balance: balance,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let mut rows: Vec<Vec<String>> = Category::ALL
            .iter()
            .map(|c| vec![format!("Total {}", c), fmt_amount(&summary.totals.total(*c))])
            .collect();
        rows.push(vec!["Remaining Balance".to_string(), format!("{:.2}", balance)]);
        let period = format!("{:02}/{}", month, year);
        println!("{}", pretty_table(&[period.as_str(), "Amount"], rows));
    }
    Ok(())
}
