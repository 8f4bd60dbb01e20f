// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::codec;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs::File;
use std::io::BufReader;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let file = File::open(path).with_context(|| format!("Open import file {}", path))?;
    let (cards, txs) = codec::import_json(conn, BufReader::new(file))
        .context("Import aborted; existing data unchanged")?;
    println!("Imported {} cards and {} transactions from {}", cards, txs, path);
    Ok(())
}
