/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Row sources: the read-only boundary between the store and the assembler.

pub mod sqlite;

use std::collections::HashMap;
use std::sync::Arc;

use nordic_collate::Collator;

use crate::mode::Mode;
use crate::rows::EntityRow;
use crate::ProcessorError;

/// A single column value, mirroring SQLite's storage classes.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Cell {
    /// The value as text; `None` for SQL NULL.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Integer(i) => Some(i.to_string()),
            Cell::Real(f) => Some(f.to_string()),
            Cell::Text(s) => Some(s.clone()),
            Cell::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
        }
    }

    /// The value as an integer, accepting numeric text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Integer(i)
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Cell::Null, Cell::from)
    }
}

impl From<rusqlite::types::Value> for Cell {
    fn from(value: rusqlite::types::Value) -> Self {
        use rusqlite::types::Value;
        match value {
            Value::Null => Cell::Null,
            Value::Integer(i) => Cell::Integer(i),
            Value::Real(f) => Cell::Real(f),
            Value::Text(s) => Cell::Text(s),
            Value::Blob(b) => Cell::Blob(b),
        }
    }
}

/// One untyped result row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow(Vec<Cell>);

impl RawRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.0.get(index)
    }

    pub fn text(&self, index: usize) -> Option<String> {
        self.get(index).and_then(Cell::as_text)
    }

    pub fn integer(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(Cell::as_integer)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

impl From<Vec<Cell>> for RawRow {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

/// A finite, single-pass sequence of rows. Every fetch issues a fresh query.
pub type Rows = std::vec::IntoIter<RawRow>;

/// Kinds of rows hanging off an entity by foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedKind {
    /// Translation links of a Nordic headword.
    Translation,
    /// Translation links seen from the English headword they point at.
    EnglishTranslation,
    /// Alternative spellings of a Nordic headword.
    Alternative,
    /// Nordic headwords a Nordic headword is compared with.
    Comparison,
}

/// Read-only access to the dictionary rows.
///
/// Implementations are responsible for ordering: entity rows must arrive
/// sorted by the headword collation over the name column, and related rows
/// in a stable order. The assembler never re-sorts.
pub trait RowSource {
    /// All entity rows of the given kind.
    fn entities(&self, mode: Mode) -> Result<Rows, ProcessorError>;

    /// Rows of `kind` belonging to the entity with id `entity_id`.
    fn related(&self, kind: RelatedKind, entity_id: i64) -> Result<Rows, ProcessorError>;
}

/// An in-memory row source.
///
/// Rows are returned in insertion order unless a collator is attached, in
/// which case entity rows are sorted by their name column on every fetch.
#[derive(Debug, Default, Clone)]
pub struct MemoryRowSource {
    entities: HashMap<Mode, Vec<RawRow>>,
    related: HashMap<(RelatedKind, i64), Vec<RawRow>>,
    collator: Option<Arc<Collator>>,
}

impl MemoryRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collator(mut self, collator: Arc<Collator>) -> Self {
        self.collator = Some(collator);
        self
    }

    pub fn push_entity(&mut self, mode: Mode, row: impl Into<RawRow>) -> &mut Self {
        self.entities.entry(mode).or_default().push(row.into());
        self
    }

    pub fn push_related(
        &mut self,
        kind: RelatedKind,
        entity_id: i64,
        row: impl Into<RawRow>,
    ) -> &mut Self {
        self.related
            .entry((kind, entity_id))
            .or_default()
            .push(row.into());
        self
    }
}

impl RowSource for MemoryRowSource {
    fn entities(&self, mode: Mode) -> Result<Rows, ProcessorError> {
        let mut rows = self.entities.get(&mode).cloned().unwrap_or_default();
        if let Some(collator) = &self.collator {
            rows.sort_by(|a, b| {
                let a_name = a.text(EntityRow::NAME_COLUMN).unwrap_or_default();
                let b_name = b.text(EntityRow::NAME_COLUMN).unwrap_or_default();
                collator.compare(&a_name, &b_name)
            });
        }
        Ok(rows.into_iter())
    }

    fn related(&self, kind: RelatedKind, entity_id: i64) -> Result<Rows, ProcessorError> {
        Ok(self
            .related
            .get(&(kind, entity_id))
            .cloned()
            .unwrap_or_default()
            .into_iter())
    }
}
