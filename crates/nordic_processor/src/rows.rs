/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Typed views over raw result rows.
//!
//! Every conversion checks the column count first. A row of the wrong shape
//! means the queries and the schema have drifted apart, which is fatal.

use crate::source::RawRow;
use crate::ProcessorError;

fn expect_columns(context: &'static str, row: &RawRow, expected: usize) -> Result<(), ProcessorError> {
    if row.len() != expected {
        return Err(ProcessorError::SchemaMismatch {
            context,
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

fn required_id(
    context: &'static str,
    column: &'static str,
    row: &RawRow,
    index: usize,
) -> Result<i64, ProcessorError> {
    row.integer(index).ok_or_else(|| ProcessorError::InvalidColumn {
        context,
        column,
        message: format!("expected an integer id, found {:?}", row.get(index)),
    })
}

/// A headword row: `part_of_speech, language_code, name, article,
/// expressions, refs, id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRow {
    pub part_of_speech: Option<String>,
    pub language_code: Option<String>,
    pub name: Option<String>,
    pub article: Option<String>,
    pub expressions: Option<String>,
    pub refs: Option<String>,
    pub id: i64,
}

impl EntityRow {
    pub const COLUMNS: usize = 7;
    pub const NAME_COLUMN: usize = 2;

    pub fn from_raw(row: &RawRow) -> Result<Self, ProcessorError> {
        expect_columns("entity", row, Self::COLUMNS)?;
        Ok(Self {
            part_of_speech: row.text(0),
            language_code: row.text(1),
            name: row.text(Self::NAME_COLUMN),
            article: row.text(3),
            expressions: row.text(4),
            refs: row.text(5),
            id: required_id("entity", "id", row, 6)?,
        })
    }
}

/// A translation link row: `tl_id, parent_id, lang_short_name, gloss,
/// evidence, law_short_name`.
///
/// `gloss` is the name of the headword on the other side of the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    pub id: i64,
    pub parent_id: i64,
    pub language_code: Option<String>,
    pub gloss: Option<String>,
    pub evidence: Option<String>,
    pub law: Option<String>,
}

impl TranslationRow {
    pub const COLUMNS: usize = 6;

    pub fn from_raw(row: &RawRow) -> Result<Self, ProcessorError> {
        expect_columns("translation", row, Self::COLUMNS)?;
        Ok(Self {
            id: required_id("translation", "tl_id", row, 0)?,
            parent_id: required_id("translation", "parent_id", row, 1)?,
            language_code: row.text(2),
            gloss: row.text(3),
            evidence: row.text(4),
            law: row.text(5),
        })
    }
}

/// An alternative spelling row: `name, language_code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeRow {
    pub name: Option<String>,
    pub language_code: Option<String>,
}

impl AlternativeRow {
    pub const COLUMNS: usize = 2;

    pub fn from_raw(row: &RawRow) -> Result<Self, ProcessorError> {
        expect_columns("alternative", row, Self::COLUMNS)?;
        Ok(Self {
            name: row.text(0),
            language_code: row.text(1),
        })
    }
}

/// A comparison row: `id, name` of the compared headword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub id: i64,
    pub name: Option<String>,
}

impl ComparisonRow {
    pub const COLUMNS: usize = 2;

    pub fn from_raw(row: &RawRow) -> Result<Self, ProcessorError> {
        expect_columns("comparison", row, Self::COLUMNS)?;
        Ok(Self {
            id: required_id("comparison", "id", row, 0)?,
            name: row.text(1),
        })
    }
}
