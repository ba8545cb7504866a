/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! SQLite row source over a repaired snapshot of the dictionary database.
//!
//! The source database is never modified. It is copied to a named temporary
//! file, the copy is repaired once (orphaned relation rows deleted, join
//! views created), and every query runs against the copy. The temporary
//! file is removed when the row source is dropped.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, trace};
use nordic_collate::Collator;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, Params};
use tempfile::NamedTempFile;

use super::{Cell, RawRow, RelatedKind, RowSource, Rows};
use crate::mode::Mode;
use crate::ProcessorError;

/// Name under which the headword collation is registered with SQLite.
pub const COLLATION_NAME: &str = "nordic";

const NORDIC_ENTITIES: &str = "
  SELECT grammar.name AS part_of_speech,
         language.short_name AS language_code,
         nordic_headword.name AS nordic_headword_name,
         nordic_headword.article AS article,
         nordic_headword.expressions AS expressions,
         nordic_headword.refs AS refs,
         nordic_headword.id AS nhw_id
    FROM nordic_headword
    LEFT JOIN grammar ON nordic_headword.grammar_id = grammar.id
    LEFT JOIN language ON nordic_headword.language_id = language.id
   ORDER BY nordic_headword.name COLLATE nordic, nordic_headword.id
";

const ENGLISH_ENTITIES: &str = "
  SELECT NULL AS part_of_speech,
         NULL AS language_code,
         english_headword.name AS english_headword_name,
         NULL AS article,
         NULL AS expressions,
         NULL AS refs,
         english_headword.id AS ehw_id
    FROM english_headword
   ORDER BY english_headword.name COLLATE nordic, english_headword.id
";

const TRANSLATIONS: &str = "
  SELECT tl_id, nhw_id, lang_short_name, english_name, evidence, law_short_name
    FROM translations
   WHERE nhw_id = ?1
   ORDER BY tl_id
";

const ENGLISH_TRANSLATIONS: &str = "
  SELECT tl_id, ehw_id, lang_short_name, nordic_name, evidence, law_short_name
    FROM english_translations
   WHERE ehw_id = ?1
   ORDER BY tl_id
";

const ALTERNATIVES: &str = "
  SELECT alternative.name, language.short_name
    FROM alternative
    LEFT JOIN language ON alternative.language_id = language.id
   WHERE alternative.nordic_headword_id = ?1
   ORDER BY alternative.id
";

const COMPARISONS: &str = "
  SELECT comparison.nordic_headword2_id, nordic_headword.name
    FROM comparison
    LEFT JOIN nordic_headword ON comparison.nordic_headword2_id = nordic_headword.id
   WHERE comparison.nordic_headword1_id = ?1
   ORDER BY comparison.id
";

const ORPHANED_TRANSLATION_LINKS: [&str; 2] = [
    "DELETE FROM translation_link
      WHERE nordic_headword_id IS NULL
         OR nordic_headword_id NOT IN (SELECT id FROM nordic_headword)",
    "DELETE FROM translation_link
      WHERE english_headword_id IS NULL
         OR english_headword_id NOT IN (SELECT id FROM english_headword)",
];

const ORPHANED_COMPARISONS: [&str; 2] = [
    "DELETE FROM comparison
      WHERE nordic_headword1_id IS NULL
         OR nordic_headword1_id NOT IN (SELECT id FROM nordic_headword)",
    "DELETE FROM comparison
      WHERE nordic_headword2_id IS NULL
         OR nordic_headword2_id NOT IN (SELECT id FROM nordic_headword)",
];

const VIEWS: &str = "
  DROP VIEW IF EXISTS translations;
  CREATE VIEW translations AS
  SELECT translation_link.id AS tl_id,
         translation_link.nordic_headword_id AS nhw_id,
         language.short_name AS lang_short_name,
         english_headword.name AS english_name,
         translation_link.evidence AS evidence,
         law.short_name AS law_short_name
    FROM translation_link
    LEFT JOIN english_headword
           ON translation_link.english_headword_id = english_headword.id
    LEFT JOIN language_law_instance
           ON language_law_instance.translation_link_id = translation_link.id
    LEFT JOIN language
           ON language_law_instance.language_id = language.id
    LEFT JOIN law ON language_law_instance.law_id = law.id;

  DROP VIEW IF EXISTS english_translations;
  CREATE VIEW english_translations AS
  SELECT translation_link.id AS tl_id,
         translation_link.english_headword_id AS ehw_id,
         language.short_name AS lang_short_name,
         nordic_headword.name AS nordic_name,
         translation_link.evidence AS evidence,
         law.short_name AS law_short_name
    FROM translation_link
    LEFT JOIN nordic_headword
           ON translation_link.nordic_headword_id = nordic_headword.id
    LEFT JOIN language_law_instance
           ON language_law_instance.translation_link_id = translation_link.id
    LEFT JOIN language
           ON language_law_instance.language_id = language.id
    LEFT JOIN law ON language_law_instance.law_id = law.id;
";

/// Rows removed by [`repair`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub translation_links_removed: usize,
    pub comparisons_removed: usize,
}

impl fmt::Display for RepairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removed {} orphaned translation links and {} orphaned comparisons",
            self.translation_links_removed, self.comparisons_removed
        )
    }
}

/// Delete relation rows with a missing endpoint and create the join views.
///
/// Destructive; only ever run this on a snapshot.
pub fn repair(conn: &mut Connection) -> Result<RepairReport, ProcessorError> {
    let tx = conn.transaction()?;
    let mut report = RepairReport::default();
    for sql in ORPHANED_TRANSLATION_LINKS {
        report.translation_links_removed += tx.execute(sql, [])?;
    }
    for sql in ORPHANED_COMPARISONS {
        report.comparisons_removed += tx.execute(sql, [])?;
    }
    tx.execute_batch(VIEWS)?;
    tx.commit()?;
    Ok(report)
}

/// Register `collator` as the `nordic` collation on `conn`.
pub fn register_collation(conn: &Connection, collator: Arc<Collator>) -> Result<(), ProcessorError> {
    conn.create_collation(COLLATION_NAME, move |a, b| collator.compare(a, b))?;
    Ok(())
}

/// Open a database without write access.
pub fn open_read_only(path: &Path) -> Result<Connection, ProcessorError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}

/// Row source backed by an SQLite connection.
pub struct SqliteRowSource {
    conn: Connection,
    // Declared after `conn` so the connection closes before the file goes.
    snapshot: Option<NamedTempFile>,
}

impl SqliteRowSource {
    /// Snapshot the database at `source`, repair the copy and open it.
    pub fn open_snapshot(source: &Path, collator: Arc<Collator>) -> Result<Self, ProcessorError> {
        let snapshot_error = |e: std::io::Error| ProcessorError::Snapshot {
            path: source.display().to_string(),
            source: e,
        };
        if !source.is_file() {
            return Err(snapshot_error(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such database file",
            )));
        }

        let snapshot = NamedTempFile::new().map_err(snapshot_error)?;
        std::fs::copy(source, snapshot.path()).map_err(snapshot_error)?;
        debug!(
            "copied {} to snapshot {}",
            source.display(),
            snapshot.path().display()
        );

        let mut conn = Connection::open(snapshot.path())?;
        let report = repair(&mut conn)?;
        info!("{report}");

        let mut row_source = Self::from_connection(conn, collator)?;
        row_source.snapshot = Some(snapshot);
        Ok(row_source)
    }

    /// Use an already repaired connection as is.
    pub fn from_connection(conn: Connection, collator: Arc<Collator>) -> Result<Self, ProcessorError> {
        register_collation(&conn, collator)?;
        Ok(Self {
            conn,
            snapshot: None,
        })
    }

    /// Path of the temporary snapshot, if this source owns one.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_ref().map(NamedTempFile::path)
    }

    fn fetch<P: Params>(&self, sql: &str, params: P) -> Result<Rows, ProcessorError> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let width = stmt.column_count();
        let mapped = stmt.query_map(params, |row| {
            (0..width)
                .map(|idx| row.get::<_, Value>(idx).map(Cell::from))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?;

        let mut rows = Vec::new();
        for cells in mapped {
            let row = RawRow::new(cells?);
            trace!("{:?}", row.cells());
            rows.push(row);
        }
        Ok(rows.into_iter())
    }
}

impl RowSource for SqliteRowSource {
    fn entities(&self, mode: Mode) -> Result<Rows, ProcessorError> {
        let sql = match mode {
            Mode::Nordic => NORDIC_ENTITIES,
            Mode::English => ENGLISH_ENTITIES,
        };
        self.fetch(sql, [])
    }

    fn related(&self, kind: RelatedKind, entity_id: i64) -> Result<Rows, ProcessorError> {
        let sql = match kind {
            RelatedKind::Translation => TRANSLATIONS,
            RelatedKind::EnglishTranslation => ENGLISH_TRANSLATIONS,
            RelatedKind::Alternative => ALTERNATIVES,
            RelatedKind::Comparison => COMPARISONS,
        };
        self.fetch(sql, params![entity_id])
    }
}
