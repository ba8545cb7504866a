/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use std::sync::Arc;

use nordic_processor::source::sqlite::{open_read_only, repair};
use nordic_processor::{
    export_documents, render, Assembler, Collator, Element, Mode, ProcessorError, RelatedKind,
    RepairReport, RowSource, SqliteRowSource,
};
use rusqlite::Connection;

fn open_fixture() -> (tempfile::TempDir, std::path::PathBuf, SqliteRowSource) {
    let dir = tempfile::tempdir().unwrap();
    let db = build_fixture_db(dir.path());
    let source = SqliteRowSource::open_snapshot(&db, Arc::new(Collator::default())).unwrap();
    (dir, db, source)
}

fn entry<'a>(document: &'a Element, name: &str) -> &'a Element {
    document
        .elements()
        .find(|e| e.child("name").map(Element::text).as_deref() == Some(name))
        .unwrap_or_else(|| panic!("no entry named {name}"))
}

#[test]
fn test_repair_removes_orphaned_relations() {
    let dir = tempfile::tempdir().unwrap();
    let db = build_fixture_db(dir.path());
    let mut conn = Connection::open(&db).unwrap();

    let report = repair(&mut conn).unwrap();
    assert_eq!(
        report,
        RepairReport {
            translation_links_removed: 2,
            comparisons_removed: 2,
        }
    );

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 3);

    // A second pass finds nothing left to delete.
    assert_eq!(repair(&mut conn).unwrap(), RepairReport::default());
}

#[test]
fn test_snapshot_leaves_source_untouched() {
    let (_dir, db, source) = open_fixture();
    let snapshot = source.snapshot_path().unwrap().to_path_buf();
    assert!(snapshot.exists());
    assert_ne!(snapshot, db);

    let original = open_read_only(&db).unwrap();
    let links: i64 = original
        .query_row("SELECT COUNT(*) FROM translation_link", [], |row| row.get(0))
        .unwrap();
    assert_eq!(links, 5);
    let has_view: i64 = original
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'view'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(has_view, 0);

    drop(source);
    assert!(!snapshot.exists());
}

#[test]
fn test_missing_database_is_a_snapshot_error() {
    let dir = tempfile::tempdir().unwrap();
    let result =
        SqliteRowSource::open_snapshot(&dir.path().join("absent.db"), Arc::new(Collator::default()));
    assert!(matches!(result, Err(ProcessorError::Snapshot { .. })));
}

#[test]
fn test_entities_are_ordered_by_collation() {
    let (_dir, _db, source) = open_fixture();

    let nordic: Vec<_> = source
        .entities(Mode::Nordic)
        .unwrap()
        .map(|row| row.text(2).unwrap())
        .collect();
    assert_eq!(nordic, vec!["and", "hus", "Æble", "øl"]);

    let english: Vec<_> = source
        .entities(Mode::English)
        .unwrap()
        .map(|row| row.text(2).unwrap())
        .collect();
    assert_eq!(english, vec!["a {duck}", "beer", "house"]);
}

#[test]
fn test_related_rows_skip_removed_links() {
    let (_dir, _db, source) = open_fixture();
    let ids: Vec<_> = source
        .related(RelatedKind::Translation, 4)
        .unwrap()
        .map(|row| row.integer(0).unwrap())
        .collect();
    assert_eq!(ids, vec![5]);
    assert_eq!(source.related(RelatedKind::Comparison, 1).unwrap().count(), 1);
    assert_eq!(source.related(RelatedKind::Alternative, 2).unwrap().count(), 0);
}

#[test]
fn test_nordic_extraction() {
    let (_dir, _db, source) = open_fixture();
    let document = Assembler::default()
        .assemble_document(Mode::Nordic, &source)
        .unwrap();
    assert_eq!(document.children.len(), 4);

    let hus = entry(&document, "hus");
    assert_eq!(
        child_tags(hus),
        vec![
            "name",
            "type",
            "language",
            "comparisons",
            "translations",
            "alternatives",
            "id",
            "article",
            "refs"
        ]
    );
    assert_eq!(hus.child("article").unwrap().text(), "a house");
    assert_eq!(hus.child("refs").unwrap().text(), "See also <bo>");

    let translation = hus
        .child("translations")
        .unwrap()
        .child("translation")
        .unwrap();
    assert_eq!(
        child_tags(translation),
        vec!["english", "language", "law", "evidence"]
    );
    assert_eq!(translation.child("law").unwrap().text(), "JL");
    let evidence = translation.child("evidence").unwrap();
    assert_eq!(evidence.child("i").unwrap().text(), "attested");
    assert_eq!(evidence.text(), "attested in 1241");

    let comparison = hus
        .child("comparisons")
        .unwrap()
        .child("comparison")
        .unwrap();
    assert_eq!(comparison.child("name").unwrap().text(), "øl");
    assert_eq!(comparison.child("id").unwrap().text(), "2");

    let alternative = hus
        .child("alternatives")
        .unwrap()
        .child("alternative")
        .unwrap();
    assert_eq!(alternative.child("name").unwrap().text(), "huus");
    assert_eq!(alternative.child("language").unwrap().text(), "sv");

    let ol = entry(&document, "øl");
    assert!(ol.child("expressions").is_none());
    assert!(ol.child("article").is_none());

    let aeble = entry(&document, "Æble");
    assert!(aeble.child("type").unwrap().children.is_empty());
    assert!(aeble.child("translations").unwrap().children.is_empty());

    let xml = render::to_xml_string(&document).unwrap();
    assert!(xml.contains("<english>a <untranslatable>duck</untranslatable></english>"));
    assert!(xml.contains("<expressions>flyve som en <i>and</i></expressions>"));
    assert!(xml.contains("<refs>See also &lt;bo&gt;</refs>"));
    roxmltree::Document::parse(&xml).expect("output should be well-formed");
}

#[test]
fn test_english_extraction() {
    let (_dir, _db, source) = open_fixture();
    let document = Assembler::default()
        .assemble_document(Mode::English, &source)
        .unwrap();
    assert_eq!(document.name, "english_headwords");

    let house = entry(&document, "house");
    let glosses: Vec<_> = house
        .child("translations")
        .unwrap()
        .elements()
        .map(|t| t.child("nordic").unwrap().text())
        .collect();
    assert_eq!(glosses, vec!["hus"]);

    let duck = entry(&document, "a {duck}");
    let translation = duck
        .child("translations")
        .unwrap()
        .child("translation")
        .unwrap();
    assert_eq!(translation.child("nordic").unwrap().text(), "and");
}

#[test]
fn test_export_documents_from_read_only_connection() {
    let dir = tempfile::tempdir().unwrap();
    let db = build_fixture_db(dir.path());
    let conn = open_read_only(&db).unwrap();

    let prefix = format!("{}/narrative_doc_", dir.path().display());
    let exported = export_documents(&conn, &prefix).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].title.as_deref(), Some("Introduction"));
    let html = std::fs::read_to_string(&exported[0].path).unwrap();
    assert_eq!(html, "<p>Intro</p>");
}
