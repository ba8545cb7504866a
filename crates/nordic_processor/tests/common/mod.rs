/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nordic_processor::{Cell, Element};
use rusqlite::Connection;

// --- Helper Functions for Test Data Construction ---

/// An entity row in query column order.
pub fn entity_row(
    name: &str,
    part_of_speech: Option<&str>,
    language: Option<&str>,
    article: Option<&str>,
    id: i64,
) -> Vec<Cell> {
    vec![
        Cell::from(part_of_speech),
        Cell::from(language),
        Cell::from(name),
        Cell::from(article),
        Cell::Null,
        Cell::Null,
        Cell::Integer(id),
    ]
}

/// A translation row in query column order.
pub fn translation_row(
    id: i64,
    parent: i64,
    language: Option<&str>,
    gloss: &str,
    evidence: Option<&str>,
    law: Option<&str>,
) -> Vec<Cell> {
    vec![
        Cell::Integer(id),
        Cell::Integer(parent),
        Cell::from(language),
        Cell::from(gloss),
        Cell::from(evidence),
        Cell::from(law),
    ]
}

/// Names of the direct child elements.
pub fn child_tags(element: &Element) -> Vec<&str> {
    element.elements().map(|e| e.name.as_str()).collect()
}

/// Build a small dictionary database at `dir/live.db`.
///
/// Contains two orphaned and two dangling relation rows that the snapshot
/// repair is expected to remove.
pub fn build_fixture_db(dir: &Path) -> PathBuf {
    let path = dir.join("live.db");
    let conn = Connection::open(&path).expect("fixture database should open");
    conn.execute_batch(
        "
        CREATE TABLE grammar (id INTEGER PRIMARY KEY, name TEXT);
        CREATE TABLE language (id INTEGER PRIMARY KEY, short_name TEXT);
        CREATE TABLE law (id INTEGER PRIMARY KEY, short_name TEXT);
        CREATE TABLE nordic_headword (
            id INTEGER PRIMARY KEY, name TEXT, grammar_id INTEGER, language_id INTEGER,
            article TEXT, expressions TEXT, refs TEXT
        );
        CREATE TABLE english_headword (id INTEGER PRIMARY KEY, name TEXT);
        CREATE TABLE translation_link (
            id INTEGER PRIMARY KEY, nordic_headword_id INTEGER,
            english_headword_id INTEGER, evidence TEXT
        );
        CREATE TABLE language_law_instance (
            id INTEGER PRIMARY KEY, translation_link_id INTEGER,
            language_id INTEGER, law_id INTEGER
        );
        CREATE TABLE alternative (
            id INTEGER PRIMARY KEY, nordic_headword_id INTEGER, name TEXT, language_id INTEGER
        );
        CREATE TABLE comparison (
            id INTEGER PRIMARY KEY, nordic_headword1_id INTEGER, nordic_headword2_id INTEGER
        );
        CREATE TABLE document (id INTEGER PRIMARY KEY, title TEXT, text TEXT);

        INSERT INTO grammar VALUES (1, 'noun');
        INSERT INTO language VALUES (1, 'da'), (2, 'en'), (3, 'sv');
        INSERT INTO law VALUES (1, 'JL');

        INSERT INTO nordic_headword VALUES
            (1, 'hus', 1, 1, '<p>a house</p>', NULL, 'See also &lt;bo&gt;'),
            (2, 'øl', 1, 1, NULL, '', NULL),
            (3, 'Æble', NULL, NULL, NULL, NULL, NULL),
            (4, 'and', 1, 1, NULL, 'flyve som en <i>and</i>', NULL);
        INSERT INTO english_headword VALUES (1, 'house'), (2, 'beer'), (3, 'a {duck}');

        INSERT INTO translation_link VALUES
            (1, 1, 1, '<i>attested</i> in 1241'),
            (2, 2, 2, NULL),
            (3, NULL, 1, NULL),
            (4, 4, 99, NULL),
            (5, 4, 3, NULL);
        INSERT INTO language_law_instance VALUES (1, 1, 2, 1);

        INSERT INTO alternative VALUES (1, 1, 'huus', 3);
        INSERT INTO comparison VALUES (1, 1, 2), (2, 1, NULL), (3, 77, 1);

        INSERT INTO document VALUES (1, 'Introduction', '<p>Intro</p>');
        ",
    )
    .expect("fixture schema should load");
    path
}
