// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();

    match fmt.as_str() {
        "json" => {
            let file = fs::File::create(out).with_context(|| format!("Create {}", out))?;
            codec::export_json(conn, BufWriter::new(file))?;
            println!("Exported ledger to {}", out);
        }
        "csv" => {
            fs::create_dir_all(out).with_context(|| format!("Create directory {}", out))?;
            let (cards_path, txs_path) = codec::export_csv(conn, Path::new(out))?;
            println!(
                "Exported {} and {}",
                cards_path.display(),
                txs_path.display()
            );
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    Ok(())
}
