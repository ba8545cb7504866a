/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use nordic_collate::CollationError;
use thiserror::Error;

/// Errors that abort an extraction run.
///
/// None of these are recoverable mid-run: the output is a single document
/// and a partially assembled tree is not a valid result.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("configuration error: {0}")]
    Configuration(#[from] CollationError),

    #[error("schema mismatch in {context} row: expected {expected} columns, found {found}")]
    SchemaMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid {column} column in {context} row: {message}")]
    InvalidColumn {
        context: &'static str,
        column: &'static str,
        message: String,
    },

    #[error("cannot parse markup ({message}): {fragment}")]
    Markup { message: String, fragment: String },

    #[error("unknown mode: {0} (expected \"nordic\" or \"english\")")]
    UnknownMode(String),

    #[error("cannot snapshot database {path}: {source}")]
    Snapshot {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
