/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! nordic_collate - headword ordering over a configurable alphabet
//!
//! Dictionary headwords are sorted by the position of their letters in an
//! externally supplied alphabet table rather than by code point, so that
//! `þ`, `æ`, `ø` and `å` land after `z` the way a Nordic reader expects.
//! Characters missing from the table fall back to plain code-point order.
//!
//! ```rust
//! use nordic_collate::{Alphabet, Collator};
//! use std::cmp::Ordering;
//!
//! let collator = Collator::new(Alphabet::nordic());
//! assert_eq!(collator.compare("zebra", "æble"), Ordering::Less);
//! assert_eq!(collator.compare("Ål", "ål"), Ordering::Equal);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Alphabet table compiled into the crate, one letter per line.
const DEFAULT_ALPHABET: &str = include_str!("../data/all-chars");

/// Errors raised while building an alphabet table.
#[derive(Debug, Error)]
pub enum CollationError {
    #[error("alphabet table lists {letter:?} twice, ignoring case (lines {first} and {second})")]
    DuplicateLetter {
        letter: char,
        first: usize,
        second: usize,
    },

    #[error("alphabet table line {line} holds {entry:?}, expected a single character")]
    NotALetter { line: usize, entry: String },

    #[error("failed to read alphabet table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An ordered list of letters, duplicate-free after lower-casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Build a table from letters in sort order.
    pub fn new(letters: Vec<char>) -> Result<Self, CollationError> {
        let mut seen: HashMap<char, usize> = HashMap::with_capacity(letters.len());
        for (idx, letter) in letters.iter().enumerate() {
            if let Some(first) = seen.insert(fold(*letter), idx) {
                return Err(CollationError::DuplicateLetter {
                    letter: *letter,
                    first: first + 1,
                    second: idx + 1,
                });
            }
        }
        Ok(Self { letters })
    }

    /// Parse a table with one letter per line. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, CollationError> {
        let mut letters = Vec::new();
        let mut lines_of: HashMap<char, usize> = HashMap::new();

        for (idx, line) in text.lines().enumerate() {
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            let mut chars = entry.chars();
            let (Some(letter), None) = (chars.next(), chars.next()) else {
                return Err(CollationError::NotALetter {
                    line: idx + 1,
                    entry: entry.to_string(),
                });
            };
            if let Some(first) = lines_of.insert(fold(letter), idx + 1) {
                return Err(CollationError::DuplicateLetter {
                    letter,
                    first,
                    second: idx + 1,
                });
            }
            letters.push(letter);
        }

        Ok(Self { letters })
    }

    /// Read and parse a table from a side file.
    pub fn load(path: &Path) -> Result<Self, CollationError> {
        let text = fs::read_to_string(path).map_err(|source| CollationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// The built-in Nordic table.
    pub fn nordic() -> Self {
        Self::parse(DEFAULT_ALPHABET).expect("bundled alphabet table is valid")
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::nordic()
    }
}

/// Case-insensitive comparator driven by an [`Alphabet`].
#[derive(Debug, Clone)]
pub struct Collator {
    positions: HashMap<char, usize>,
}

impl Collator {
    pub fn new(alphabet: Alphabet) -> Self {
        let positions = alphabet
            .letters
            .into_iter()
            .enumerate()
            .map(|(idx, letter)| (fold(letter), idx))
            .collect();
        Self { positions }
    }

    /// Compare two strings letter by letter.
    ///
    /// The first pair of letters that differ after lower-casing decides the
    /// order: by table position when both are in the table, otherwise by the
    /// code points of the original characters. A string that runs out first
    /// sorts first.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let mut left = a.chars();
        let mut right = b.chars();
        loop {
            let (l, r) = match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(l), Some(r)) => (l, r),
            };

            let (fl, fr) = (fold(l), fold(r));
            if fl == fr {
                continue;
            }

            return match (self.positions.get(&fl), self.positions.get(&fr)) {
                (Some(il), Some(ir)) => il.cmp(ir),
                _ => l.cmp(&r),
            };
        }
    }

    /// Position of a letter in the table, after lower-casing.
    pub fn position(&self, c: char) -> Option<usize> {
        self.positions.get(&fold(c)).copied()
    }

    /// Sort strings in place.
    pub fn sort<S: AsRef<str>>(&self, items: &mut [S]) {
        items.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}

impl Default for Collator {
    fn default() -> Self {
        Self::new(Alphabet::nordic())
    }
}

/// Lower-case a character, keeping it as is when the lower-case form
/// spans several characters.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
