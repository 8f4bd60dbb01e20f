// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

/// Typed failures of the ledger core. Everything else travels as
/// `anyhow::Error` through the command layer.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The durable medium could not be opened. Callers degrade to an
    /// in-memory, non-persistent session instead of crashing.
    #[error("storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The import payload is not the expected document shape. The import
    /// is aborted and existing data is left untouched.
    #[error("import document is not in the expected format: {0}")]
    ImportFormat(String),
}
