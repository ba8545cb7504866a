/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Nordic Processor
//!
//! This crate turns the flat tables of the Nordic headword database into one
//! nested XML document. Entity rows arrive from a [`RowSource`] already sorted
//! by the headword collation; for each entity the related translations,
//! alternative spellings and comparisons are fetched by id, free text is
//! cleaned up, and everything is assembled into a single [`Element`] tree that
//! [`render`] serializes.
//!
//! # Example
//!
//! ```rust
//! use nordic_processor::{Assembler, Cell, MemoryRowSource, Mode, RelatedKind, render};
//!
//! let mut source = MemoryRowSource::new();
//! source.push_entity(
//!     Mode::Nordic,
//!     vec![
//!         Cell::from("noun"),
//!         Cell::from("da"),
//!         Cell::from("hus"),
//!         Cell::from("<p>a house</p>"),
//!         Cell::Null,
//!         Cell::Null,
//!         Cell::Integer(1),
//!     ],
//! );
//! source.push_related(
//!     RelatedKind::Translation,
//!     1,
//!     vec![
//!         Cell::Integer(10),
//!         Cell::Integer(1),
//!         Cell::from("en"),
//!         Cell::from("house"),
//!         Cell::Null,
//!         Cell::Null,
//!     ],
//! );
//!
//! let document = Assembler::default()
//!     .assemble_document(Mode::Nordic, &source)
//!     .unwrap();
//! let xml = render::to_xml_string(&document).unwrap();
//! assert!(xml.contains("<article>a house</article>"));
//! assert!(xml.contains("<english>house</english>"));
//! ```

pub mod assembler;
pub mod docs;
pub mod document;
pub mod error;
pub mod mode;
pub mod render;
pub mod rows;
pub mod source;
pub mod text;

pub use assembler::Assembler;
pub use docs::{export_documents, ExportedDocument};
pub use document::{Element, Node};
pub use error::ProcessorError;
pub use mode::{Mode, ModeSpec};
pub use rows::{AlternativeRow, ComparisonRow, EntityRow, TranslationRow};
pub use source::sqlite::{RepairReport, SqliteRowSource};
pub use source::{Cell, MemoryRowSource, RawRow, RelatedKind, RowSource, Rows};
pub use text::{fixup_text, patch_braces, Fixed, SanitizeOptions};

// Re-export the collation types for convenience
pub use nordic_collate::{Alphabet, CollationError, Collator};
