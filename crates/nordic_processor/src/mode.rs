/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Document modes and their dispatch table.
//!
//! Both entity kinds go through the same assembler; everything that differs
//! between them (tags, related-row wiring, per-row transforms, free-text
//! fields) lives in one static [`ModeSpec`] per mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Element;
use crate::rows::{AlternativeRow, ComparisonRow, EntityRow, TranslationRow};
use crate::source::{RawRow, RelatedKind};
use crate::text::{fixup_text, patch_braces, SanitizeOptions, GLOSS_TAG};
use crate::ProcessorError;

/// Which kind of headword a document is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Nordic,
    English,
}

impl Mode {
    pub fn spec(self) -> &'static ModeSpec {
        match self {
            Mode::Nordic => &NORDIC,
            Mode::English => &ENGLISH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Nordic => "nordic",
            Mode::English => "english",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nordic" => Ok(Mode::Nordic),
            "english" => Ok(Mode::English),
            _ => Err(ProcessorError::UnknownMode(s.to_string())),
        }
    }
}

/// Maps one related row to one child element.
pub type Transform = fn(&RawRow, &SanitizeOptions) -> Result<Element, ProcessorError>;

/// A child collection of an entity element.
pub struct CollectionSpec {
    pub kind: RelatedKind,
    /// Tag of the collection element, emitted even when it has no children.
    pub tag: &'static str,
    pub transform: Transform,
}

/// A free-text entity column emitted only when non-empty after cleanup.
pub struct OptionalField {
    pub tag: &'static str,
    pub value: fn(&EntityRow) -> Option<&str>,
}

/// Everything the assembler needs to know about a mode.
pub struct ModeSpec {
    pub root_tag: &'static str,
    pub entity_tag: &'static str,
    /// Collections in output order.
    pub collections: &'static [CollectionSpec],
    /// Free-text fields in output order.
    pub optional_fields: &'static [OptionalField],
}

pub const NAME_TAG: &str = "name";
pub const TYPE_TAG: &str = "type";
pub const LANGUAGE_TAG: &str = "language";
pub const ID_TAG: &str = "id";

static NORDIC: ModeSpec = ModeSpec {
    root_tag: "nordic_headwords",
    entity_tag: "nordic_headword",
    collections: &[
        CollectionSpec {
            kind: RelatedKind::Comparison,
            tag: "comparisons",
            transform: comparison,
        },
        CollectionSpec {
            kind: RelatedKind::Translation,
            tag: "translations",
            transform: nordic_translation,
        },
        CollectionSpec {
            kind: RelatedKind::Alternative,
            tag: "alternatives",
            transform: alternative,
        },
    ],
    optional_fields: &[
        OptionalField {
            tag: "article",
            value: entity_article,
        },
        OptionalField {
            tag: "refs",
            value: entity_refs,
        },
        OptionalField {
            tag: "expressions",
            value: entity_expressions,
        },
    ],
};

static ENGLISH: ModeSpec = ModeSpec {
    root_tag: "english_headwords",
    entity_tag: "english_headword",
    collections: &[CollectionSpec {
        kind: RelatedKind::EnglishTranslation,
        tag: "translations",
        transform: english_translation,
    }],
    optional_fields: &[],
};

fn entity_article(row: &EntityRow) -> Option<&str> {
    row.article.as_deref()
}

fn entity_refs(row: &EntityRow) -> Option<&str> {
    row.refs.as_deref()
}

fn entity_expressions(row: &EntityRow) -> Option<&str> {
    row.expressions.as_deref()
}

fn nordic_translation(row: &RawRow, options: &SanitizeOptions) -> Result<Element, ProcessorError> {
    let row = TranslationRow::from_raw(row)?;
    let gloss = match row.gloss.as_deref() {
        Some(text) => patch_braces(text),
        None => Element::new(GLOSS_TAG),
    };
    translation(gloss, row, options)
}

fn english_translation(row: &RawRow, options: &SanitizeOptions) -> Result<Element, ProcessorError> {
    let row = TranslationRow::from_raw(row)?;
    let gloss = Element::optional_text("nordic", row.gloss.as_deref());
    translation(gloss, row, options)
}

fn translation(
    gloss: Element,
    row: TranslationRow,
    options: &SanitizeOptions,
) -> Result<Element, ProcessorError> {
    let mut node = Element::new("translation").with_child(gloss);
    if let Some(code) = row.language_code {
        node.push(Element::text_element(LANGUAGE_TAG, code));
    }
    if let Some(law) = row.law {
        node.push(Element::text_element("law", law));
    }
    if let Some(evidence) = fixup_text(row.evidence.as_deref(), options)? {
        node.push(Element::new("evidence").with_children(evidence.into_nodes()));
    }
    Ok(node)
}

fn alternative(row: &RawRow, _options: &SanitizeOptions) -> Result<Element, ProcessorError> {
    let row = AlternativeRow::from_raw(row)?;
    Ok(Element::new("alternative")
        .with_child(Element::optional_text(NAME_TAG, row.name.as_deref()))
        .with_child(Element::optional_text(LANGUAGE_TAG, row.language_code.as_deref())))
}

fn comparison(row: &RawRow, _options: &SanitizeOptions) -> Result<Element, ProcessorError> {
    let row = ComparisonRow::from_raw(row)?;
    Ok(Element::new("comparison")
        .with_child(Element::optional_text(NAME_TAG, row.name.as_deref()))
        .with_child(Element::text_element(ID_TAG, row.id.to_string())))
}
