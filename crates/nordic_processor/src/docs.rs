/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Export of the narrative documents stored next to the dictionary.

use std::fs;
use std::path::PathBuf;

use log::info;
use rusqlite::Connection;

use crate::ProcessorError;

/// A narrative document written by [`export_documents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub id: i64,
    pub title: Option<String>,
    pub path: PathBuf,
}

/// Write every row of the `document` table to `<prefix><id>.html`.
///
/// The prefix may include a directory, which must already exist.
pub fn export_documents(
    conn: &Connection,
    prefix: &str,
) -> Result<Vec<ExportedDocument>, ProcessorError> {
    let mut stmt = conn.prepare("SELECT id, title, text FROM document ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut exported = Vec::new();
    for row in rows {
        let (id, title, text) = row?;
        info!("{}", title.as_deref().unwrap_or("(untitled)"));
        let path = PathBuf::from(format!("{prefix}{id}.html"));
        fs::write(&path, text.unwrap_or_default())?;
        exported.push(ExportedDocument { id, title, path });
    }
    Ok(exported)
}
